//! Reducer configuration, loadable from JSON or the environment.
//!
//! ```
//! use ironfold::config::{ModeConfig, ReduceConfig};
//!
//! let cfg = ReduceConfig::from_json_str(r#"{ "mode": "parallel", "partitions": 8, "fanout": 4 }"#)?;
//! assert_eq!(cfg.mode, ModeConfig::Parallel);
//! assert_eq!(cfg.threads, None);
//! # Ok::<_, ironfold::MergeError>(())
//! ```

use crate::error::{MergeError, Result};
use crate::reducer::ExecMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_MODE: &str = "IRONFOLD_MODE";
pub const ENV_THREADS: &str = "IRONFOLD_THREADS";
pub const ENV_PARTITIONS: &str = "IRONFOLD_PARTITIONS";
pub const ENV_FANOUT: &str = "IRONFOLD_FANOUT";

/// Default number of partial results merged per combine step.
pub const DEFAULT_FANOUT: usize = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeConfig {
    Sequential,
    #[default]
    Parallel,
}

/// Serializable settings for a [`Reducer`](crate::Reducer).
///
/// Missing fields take their defaults: parallel mode on the global rayon
/// pool, `2 * num_cpus` partitions, fanout [`DEFAULT_FANOUT`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReduceConfig {
    pub mode: ModeConfig,
    /// Size of a dedicated thread pool; `None` uses the global pool.
    pub threads: Option<usize>,
    /// Number of contiguous partitions folded independently.
    pub partitions: Option<usize>,
    /// Maximum number of partial results merged per combine step.
    pub fanout: usize,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            mode: ModeConfig::default(),
            threads: None,
            partitions: None,
            fanout: DEFAULT_FANOUT,
        }
    }
}

impl ReduceConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// [`MergeError::Config`] on malformed JSON or unknown fields,
    /// [`MergeError::InvalidConfig`] if validation fails.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON file.
    ///
    /// # Errors
    /// [`MergeError::Io`] if the file cannot be read; otherwise as
    /// [`ReduceConfig::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    /// Build from `IRONFOLD_*` environment variables; unset variables keep their defaults.
    ///
    /// # Errors
    /// [`MergeError::InvalidConfig`] if a variable is set but unparsable or out of range.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Like [`ReduceConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    /// As [`ReduceConfig::from_env`].
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(mode) = lookup(ENV_MODE) {
            cfg.mode = match mode.trim().to_ascii_lowercase().as_str() {
                "sequential" => ModeConfig::Sequential,
                "parallel" => ModeConfig::Parallel,
                other => {
                    return Err(MergeError::InvalidConfig(format!(
                        "{ENV_MODE}: unknown mode `{other}`"
                    )));
                }
            };
        }
        if let Some(v) = lookup(ENV_THREADS) {
            cfg.threads = Some(parse_count(ENV_THREADS, &v)?);
        }
        if let Some(v) = lookup(ENV_PARTITIONS) {
            cfg.partitions = Some(parse_count(ENV_PARTITIONS, &v)?);
        }
        if let Some(v) = lookup(ENV_FANOUT) {
            cfg.fanout = parse_count(ENV_FANOUT, &v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// [`MergeError::InvalidConfig`] if `fanout < 2`, `threads == Some(0)`, or
    /// `partitions == Some(0)`.
    pub fn validate(&self) -> Result<()> {
        if self.fanout < 2 {
            return Err(MergeError::InvalidConfig(format!(
                "fanout must be at least 2, got {}",
                self.fanout
            )));
        }
        if self.threads == Some(0) {
            return Err(MergeError::InvalidConfig("threads must be at least 1".into()));
        }
        if self.partitions == Some(0) {
            return Err(MergeError::InvalidConfig("partitions must be at least 1".into()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn exec_mode(&self) -> ExecMode {
        match self.mode {
            ModeConfig::Sequential => ExecMode::Sequential,
            ModeConfig::Parallel => ExecMode::Parallel {
                threads: self.threads,
                partitions: self.partitions,
            },
        }
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|e| MergeError::InvalidConfig(format!("{key}: `{raw}` is not a count ({e})")))
}
