use std::env;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SLACK_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub slack_webhook_url: Option<String>,
    pub slack_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            slack_webhook_url: None,
            slack_timeout: Duration::from_secs(DEFAULT_SLACK_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Builds settings from any variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => defaults.port,
        };

        let slack_timeout = match var("SLACK_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim().parse::<u64>()
                    .with_context(|| format!("SLACK_TIMEOUT_SECS must be a number of seconds, got {:?}", raw))?,
            ),
            None => defaults.slack_timeout,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            slack_webhook_url: var("SLACK_WEBHOOK_URL"),
            slack_timeout,
        })
    }

    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

pub fn get_configuration() -> anyhow::Result<Settings> {
    Settings::from_lookup(|key| env::var(key).ok())
}
