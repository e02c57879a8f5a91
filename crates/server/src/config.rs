use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, ensure};
use logicode_core::domain::{DomainError, Threshold};
use logicode_core::similarity::ReportOptions;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

pub const DEFAULT_CONFIG_PATH: &str = "logicode.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Overridden by the `DATABASE_URL` environment variable.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub similarity: SimilaritySettings,
}

impl ServerConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::from_str("")?
        };

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = Some(url);
        }

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("failed to deserialize server config")?;
        config.similarity.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimilaritySettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub exclude_same_user: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cancel_check_interval")]
    pub cancel_check_interval: usize,
}

impl SimilaritySettings {
    fn validate(&self) -> Result<()> {
        Threshold::new(self.threshold).context("similarity.threshold")?;
        ensure!(self.timeout_secs > 0, "similarity.timeout_secs must be positive");
        ensure!(
            self.cancel_check_interval > 0,
            "similarity.cancel_check_interval must be positive"
        );
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Options for one report, with per-request overrides applied.
    pub fn report_options(
        &self,
        threshold: Option<f64>,
        exclude_same_user: Option<bool>,
    ) -> std::result::Result<ReportOptions, DomainError> {
        Ok(ReportOptions {
            threshold: Threshold::new(threshold.unwrap_or(self.threshold))?,
            exclude_same_user: exclude_same_user.unwrap_or(self.exclude_same_user),
            cancel_check_interval: self.cancel_check_interval,
        })
    }
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            exclude_same_user: false,
            timeout_secs: default_timeout_secs(),
            cancel_check_interval: default_cancel_check_interval(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_threshold() -> f64 {
    Threshold::DEFAULT
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cancel_check_interval() -> usize {
    ReportOptions::DEFAULT_CANCEL_CHECK_INTERVAL
}
