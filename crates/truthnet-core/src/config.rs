//! Workflow timing and randomness settings.
//!
//! Defaults reproduce the latencies of the hosted product. A JSON file may
//! override any subset of fields:
//!
//! ```json
//! { "verdict_latency_ms": 500, "seed": 7 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Delay before a verdict is produced.
    pub verdict_latency_ms: u64,
    /// Delay before an evidence item is rated.
    pub evidence_latency_ms: u64,
    /// Delay before a debate argument is scored.
    pub argument_latency_ms: u64,
    /// Delay between both sides being present and the automated participant joining.
    pub participant_delay_ms: u64,
    /// Delay before a quick fact check answers.
    pub fact_check_latency_ms: u64,
    /// Delay before a post draft analysis answers.
    pub post_analysis_latency_ms: u64,
    /// Seed for the simulated services. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            verdict_latency_ms: 2000,
            evidence_latency_ms: 1500,
            argument_latency_ms: 1000,
            participant_delay_ms: 2000,
            fact_check_latency_ms: 1500,
            post_analysis_latency_ms: 2000,
            seed: None,
        }
    }
}

impl WorkflowConfig {
    /// All delays zero. Useful for tests and batch runs.
    pub fn immediate() -> Self {
        Self {
            verdict_latency_ms: 0,
            evidence_latency_ms: 0,
            argument_latency_ms: 0,
            participant_delay_ms: 0,
            fact_check_latency_ms: 0,
            post_analysis_latency_ms: 0,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded workflow config");
        Ok(config)
    }

    pub fn verdict_latency(&self) -> Duration {
        Duration::from_millis(self.verdict_latency_ms)
    }

    pub fn evidence_latency(&self) -> Duration {
        Duration::from_millis(self.evidence_latency_ms)
    }

    pub fn argument_latency(&self) -> Duration {
        Duration::from_millis(self.argument_latency_ms)
    }

    pub fn participant_delay(&self) -> Duration {
        Duration::from_millis(self.participant_delay_ms)
    }

    pub fn fact_check_latency(&self) -> Duration {
        Duration::from_millis(self.fact_check_latency_ms)
    }

    pub fn post_analysis_latency(&self) -> Duration {
        Duration::from_millis(self.post_analysis_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_latencies() {
        let config = WorkflowConfig::default();
        assert_eq!(config.verdict_latency(), Duration::from_secs(2));
        assert_eq!(config.evidence_latency(), Duration::from_millis(1500));
        assert_eq!(config.participant_delay(), Duration::from_secs(2));
        assert_eq!(config.post_analysis_latency(), Duration::from_secs(2));
        assert!(config.seed.is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: WorkflowConfig =
            serde_json::from_str(r#"{"verdict_latency_ms": 10, "seed": 7}"#).unwrap();
        assert_eq!(config.verdict_latency_ms, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.evidence_latency_ms, 1500);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = WorkflowConfig::from_json_file(Path::new("/nonexistent/truthnet.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn parse_error_names_file() {
        let path = std::env::temp_dir().join(format!("truthnet-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = WorkflowConfig::from_json_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("truthnet-config-"));
    }
}
