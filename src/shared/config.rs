use std::fs;
use serde::{Deserialize, Serialize};
use crate::shared::errors::SwapError;

/// Default slippage ceiling accepted for outgoing quote requests, in percent
pub const DEFAULT_MAX_SLIPPAGE_PERCENT: f64 = 50.0;

/// Aggregator HTTP endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub max_slippage_percent: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hypersonic.exchange".to_string(),
            request_timeout_ms: 15_000,
            max_slippage_percent: DEFAULT_MAX_SLIPPAGE_PERCENT,
        }
    }
}

/// Transaction confirmation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    pub confirm_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            confirm_timeout_ms: 90_000,
            poll_interval_ms: 2_000,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Загрузчик конфигурации
pub struct ConfigLoader;

impl ConfigLoader {
    /// Загрузить конфигурацию из toml файла
    pub fn load_config(path: &str) -> Result<PipelineConfig, SwapError> {
        let config_content = fs::read_to_string(path)
            .map_err(|e| SwapError::Config(format!("Failed to read config file: {}", e)))?;

        let config: PipelineConfig = toml::from_str(&config_content)
            .map_err(|e| SwapError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.aggregator.base_url, "https://api.hypersonic.exchange");
        assert_eq!(cfg.execution.confirm_timeout_ms, 90_000);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: PipelineConfig = toml::from_str(
            r#"
            [aggregator]
            base_url = "http://localhost:8080"
            request_timeout_ms = 5000
            max_slippage_percent = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.aggregator.base_url, "http://localhost:8080");
        assert_eq!(cfg.execution.poll_interval_ms, 2_000);
    }
}
