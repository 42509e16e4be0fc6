use crate::http::{ClientOptions, DEFAULT_USER_AGENT};
use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest accepted `retry.base_delay_secs`.
pub const MAX_BASE_DELAY_SECS: f64 = 3600.0;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per URL (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.1 = 100ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.1,
            max_delay_secs: 10,
        }
    }
}

/// What to do when no URL produced any rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPolicy {
    /// Fail the run with a no-data error and write nothing.
    #[default]
    Error,
    /// Write a table holding only the `URL` header.
    HeaderOnly,
}

/// Global configuration loaded from `~/.config/ripper/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RipperConfig {
    /// Maximum number of URLs fetched concurrently.
    pub max_workers: usize,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Connect timeout per request attempt, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per request attempt, in seconds.
    pub timeout_secs: u64,
    /// Order output row blocks by source URL instead of completion order.
    #[serde(default = "default_true")]
    pub sort_by_url: bool,
    /// Behaviour when every fetch came back empty.
    #[serde(default)]
    pub on_empty: EmptyPolicy,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for RipperConfig {
    fn default() -> Self {
        Self {
            max_workers: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 60,
            sort_by_url: true,
            on_empty: EmptyPolicy::Error,
            retry: None,
        }
    }
}

impl RipperConfig {
    /// Rejects values the runner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            anyhow::bail!("max_workers must be at least 1");
        }
        if let Some(r) = &self.retry {
            if r.max_attempts == 0 {
                anyhow::bail!("retry.max_attempts must be at least 1");
            }
            if !(0.0..=MAX_BASE_DELAY_SECS).contains(&r.base_delay_secs) {
                anyhow::bail!(
                    "retry.base_delay_secs must be between 0 and {} seconds",
                    MAX_BASE_DELAY_SECS
                );
            }
        }
        Ok(())
    }

    /// Retry policy from the `[retry]` section. A base delay that is not a
    /// representable duration keeps the default base delay.
    pub fn retry_policy(&self) -> RetryPolicy {
        let default = RetryPolicy::default();
        let default_base = default.base_delay;
        self.retry
            .as_ref()
            .map(|r| RetryPolicy {
                max_attempts: r.max_attempts,
                base_delay: Duration::try_from_secs_f64(r.base_delay_secs)
                    .unwrap_or(default_base),
                max_delay: Duration::from_secs(r.max_delay_secs),
            })
            .unwrap_or(default)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ripper")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RipperConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RipperConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<RipperConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: RipperConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
