//! Configuration file parsing for the server
//!
//! Loads settings from TOML: bind address, completion-service endpoint
//! and model, plus embedded analysis and batch sections.

use fallakte_analysis::AnalysisConfig;
use fallakte_batch::BatchConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Section failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8081)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Completion-service endpoint
    #[serde(default = "default_ollama_endpoint")]
    pub ollama_endpoint: String,

    /// Model name for the completion service
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-document analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Batch scheduling settings
    #[serde(default)]
    pub batch: BatchConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8081
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:3b".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            ollama_endpoint: default_ollama_endpoint(),
            model: default_model(),
            analysis: AnalysisConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ollama_endpoint.is_empty() {
            return Err(ConfigError::Invalid("ollama_endpoint is empty".to_string()));
        }
        if self.model.is_empty() {
            return Err(ConfigError::Invalid("model is empty".to_string()));
        }
        self.analysis.validate().map_err(ConfigError::Invalid)?;
        self.batch.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.batch.concurrency, 3);
        assert_eq!(config.analysis.max_text_length, 5_000);
    }

    #[test]
    fn test_parse_toml_with_sections() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            ollama_endpoint = "http://ollama:11434"
            model = "llama3.1:8b"

            [analysis]
            max_text_length = 8000
            max_tokens = 2000
            extraction_timeout_secs = 60
            completion_timeout_secs = 300

            [batch]
            concurrency = 5
            max_documents = 20
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.analysis.max_text_length, 8000);
        assert_eq!(config.batch.concurrency, 5);
    }

    #[test]
    fn test_sections_are_optional() {
        let config: ServerConfig = toml::from_str("bind_port = 9100").unwrap();
        assert_eq!(config.bind_port, 9100);
        assert_eq!(config.batch.max_documents, 50);
    }

    #[test]
    fn test_invalid_section_rejected() {
        let toml = r#"
            [batch]
            concurrency = 0
            max_documents = 50
        "#;
        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }
}
