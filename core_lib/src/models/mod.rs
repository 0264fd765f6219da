pub mod request;
pub mod templates;
