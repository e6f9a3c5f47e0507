//! Configuration management for emotion-guard
//!
//! Holds the per-action-type quota table. Quotas are immutable once a
//! limiter is constructed; they load from an optional `guard.toml` with
//! environment overrides, or fall back to built-in defaults.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::rate_limit::ActionType;

/// One action type's throttling budget: at most `max_requests` within
/// any sliding window of `window_secs` seconds.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Quota {
    /// Get the window length as a Duration
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Quota table covering every action type the bot dispatches
#[derive(Debug, Deserialize, Clone)]
pub struct QuotaConfig {
    pub emotion_entry: Quota,
    pub summary_request: Quota,
    pub export_request: Quota,
    pub general_command: Quota,
    pub message: Quota,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            emotion_entry: Quota { max_requests: 50, window_secs: 3600 },
            summary_request: Quota { max_requests: 20, window_secs: 3600 },
            export_request: Quota { max_requests: 5, window_secs: 3600 },
            general_command: Quota { max_requests: 100, window_secs: 3600 },
            message: Quota { max_requests: 200, window_secs: 3600 },
        }
    }
}

impl QuotaConfig {
    /// Load quotas from guard.toml (if present) with EMOTION_GUARD_*
    /// environment overrides. Missing keys keep their default values.
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("emotion_entry.max_requests", defaults.emotion_entry.max_requests as u64)?
            .set_default("emotion_entry.window_secs", defaults.emotion_entry.window_secs)?
            .set_default("summary_request.max_requests", defaults.summary_request.max_requests as u64)?
            .set_default("summary_request.window_secs", defaults.summary_request.window_secs)?
            .set_default("export_request.max_requests", defaults.export_request.max_requests as u64)?
            .set_default("export_request.window_secs", defaults.export_request.window_secs)?
            .set_default("general_command.max_requests", defaults.general_command.max_requests as u64)?
            .set_default("general_command.window_secs", defaults.general_command.window_secs)?
            .set_default("message.max_requests", defaults.message.max_requests as u64)?
            .set_default("message.window_secs", defaults.message.window_secs)?
            .add_source(File::with_name("guard").required(false))
            .add_source(Environment::with_prefix("EMOTION_GUARD").separator("_"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the quota governing one action type
    pub fn quota(&self, action: ActionType) -> Quota {
        match action {
            ActionType::EmotionEntry => self.emotion_entry,
            ActionType::SummaryRequest => self.summary_request,
            ActionType::ExportRequest => self.export_request,
            ActionType::GeneralCommand => self.general_command,
            ActionType::Message => self.message,
        }
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        for action in ActionType::ALL {
            let quota = self.quota(action);
            if quota.max_requests == 0 {
                return Err(config::ConfigError::Message(format!(
                    "{action}: max_requests must be greater than 0"
                )));
            }
            if quota.window_secs == 0 {
                return Err(config::ConfigError::Message(format!(
                    "{action}: window_secs must be greater than 0"
                )));
            }
        }
        Ok(())
    }
}
