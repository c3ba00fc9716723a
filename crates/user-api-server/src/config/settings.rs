use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    /// Bearer credentials accepted by the authentication gate.
    pub api_tokens: Vec<String>,
    /// Paths served without a credential.
    pub public_paths: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistryConfig {
    pub enforce_unique_email: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("security.api_tokens", Vec::<String>::new())?
            .set_default(
                "security.public_paths",
                vec!["/health".to_string(), "/api-docs".to_string()],
            )?
            .set_default("registry.enforce_unique_email", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
