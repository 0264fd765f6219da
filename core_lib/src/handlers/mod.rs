pub mod health;
pub mod routes;
pub mod templates;

pub use routes::create_routes;
