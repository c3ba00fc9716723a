//! Configuration management.

pub mod settings;

pub use settings::{RegistryConfig, SecurityConfig, ServerConfig, Settings};
