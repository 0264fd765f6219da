use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::generator::GeneratorConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Explicit origin allow-list; empty means a permissive layer.
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generator: GeneratorConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3333,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3333".to_string(),
                "http://127.0.0.1:3333".to_string(),
            ],
            allow_credentials: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.generator.command.is_empty() {
            return Err(ConfigError::Message(
                "Generator command cannot be empty".to_string(),
            ));
        }

        if self.generator.script.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "Generator script path cannot be empty".to_string(),
            ));
        }

        if self.generator.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Generator timeout must be greater than 0".to_string(),
            ));
        }

        if self.generator.default_target_company.is_empty() {
            return Err(ConfigError::Message(
                "Default target company cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
