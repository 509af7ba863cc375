//! Configuration for batch scheduling

use serde::{Deserialize, Serialize};

/// Configuration for [`BatchScheduler`](crate::BatchScheduler)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of analysis tasks allowed in flight at once
    ///
    /// The completion service is a shared single-host resource; the low
    /// default keeps the batch from starving interactive users of it.
    pub concurrency: usize,

    /// Maximum documents accepted per batch request
    pub max_documents: usize,
}

impl BatchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        if self.max_documents == 0 {
            return Err("max_documents must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 3,
            max_documents: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.max_documents, 50);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = BatchConfig::default();
        config.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BatchConfig::default();
        let parsed = BatchConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config.concurrency, parsed.concurrency);
        assert_eq!(config.max_documents, parsed.max_documents);
    }
}
