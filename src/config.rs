//! Configuration for resolution passes
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (loom.toml)
//! - Environment variables (LOOM_*)
//!
//! The config only affects diagnostics and the depth guard; no functional
//! behavior branches on it beyond placeholder generation. It is immutable
//! after construction and threaded explicitly into every pass, so concurrent
//! passes (e.g. tests) cannot interfere through process-wide state.
//!
//! ## Example config file (loom.toml):
//! ```toml
//! max_depth = 100
//! debug_cycles = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Configuration for a schema resolution pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Maximum recursion depth before a placeholder is produced
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Emit verbose cycle-detection diagnostics via tracing
    #[serde(default)]
    pub debug_cycles: bool,

    /// Hard cap on detected cycles, for fail-fast testing.
    /// Exceeding the cap records a warning; resolution still completes.
    #[serde(default)]
    pub max_cycles: Option<usize>,
}

fn default_max_depth() -> usize {
    100
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            debug_cycles: false,
            max_cycles: None,
        }
    }
}

impl ResolveConfig {
    /// Load configuration from default locations and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, optionally from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for location in ["loom.toml", ".loom.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // A nested-key separator of "__" would also become the prefix
        // separator, breaking LOOM_MAX_DEPTH; the prefix stays on "_".
        builder = builder.add_source(
            Environment::with_prefix("LOOM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolveConfig::default();
        assert_eq!(config.max_depth, 100);
        assert!(!config.debug_cycles);
        assert!(config.max_cycles.is_none());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("LOOM_MAX_DEPTH", "17");
        let config = ResolveConfig::load().unwrap();
        std::env::remove_var("LOOM_MAX_DEPTH");
        assert_eq!(config.max_depth, 17);
    }
}
