//! RON configuration for the matcher page.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock behaviour: local server, demo-data fallback, 1.5s/2.0s/1.5s animation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use matcher_core::FailurePolicy;
use matcher_engine::{AnimationSchedule, Marker, SubmitSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILENAME: &str = "matcher.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid base url {url:?}: {source}")]
    BaseUrl { url: String, source: url::ParseError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicySetting {
    #[default]
    FallbackToDemoData,
    SurfaceError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub step2_delay_ms: u64,
    pub step3_delay_ms: u64,
    pub settle_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step2_delay_ms: 1500,
            step3_delay_ms: 2000,
            settle_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub failure_policy: FailurePolicySetting,
    pub animation: AnimationConfig,
    pub connect_timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            failure_policy: FailurePolicySetting::default(),
            animation: AnimationConfig::default(),
            connect_timeout_secs: 10,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given; otherwise `matcher.ron` in the working
    /// directory if present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILENAME);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        match self.failure_policy {
            FailurePolicySetting::FallbackToDemoData => FailurePolicy::FallbackToDemoData,
            FailurePolicySetting::SurfaceError => FailurePolicy::SurfaceError,
        }
    }

    pub fn animation_schedule(&self) -> AnimationSchedule {
        AnimationSchedule {
            steps: vec![
                (Duration::from_millis(self.animation.step2_delay_ms), Marker::Step2),
                (Duration::from_millis(self.animation.step3_delay_ms), Marker::Step3),
            ],
            settle: Duration::from_millis(self.animation.settle_ms),
        }
    }

    pub fn submit_settings(&self) -> Result<SubmitSettings, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        let mut settings = SubmitSettings::new(base_url);
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        Ok(settings)
    }
}
