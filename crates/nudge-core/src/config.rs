use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::{Backoff, RetryPolicy};
use crate::transport::CurlTransport;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries allowed after the initial attempt.
    pub max_retries: u32,
    /// Backoff shape: "fixed", "linear" or "exponential".
    #[serde(default)]
    pub backoff: Backoff,
    /// Base delay in seconds (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
    /// Scale each delay by a per-process random factor.
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            backoff: Backoff::Exponential,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
            jitter: false,
        }
    }
}

impl RetryConfig {
    /// Builds the engine policy for this config.
    pub fn to_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy {
            max_retries: self.max_retries,
            backoff: self.backoff,
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
            jitter_seed: None,
        };
        if self.jitter {
            policy.with_jitter()
        } else {
            policy
        }
    }
}

/// Global configuration loaded from `~/.config/nudge/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgeConfig {
    /// Connect timeout per attempt, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout per attempt, in seconds.
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            retry: None,
        }
    }
}

impl NudgeConfig {
    /// Effective retry policy: the `[retry]` section or built-in defaults.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryConfig::to_policy)
            .unwrap_or_default()
    }

    /// Transport carrying this config's timeouts.
    pub fn transport(&self) -> CurlTransport {
        CurlTransport {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nudge")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NudgeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NudgeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: NudgeConfig = toml::from_str(&data)?;
    Ok(cfg)
}
