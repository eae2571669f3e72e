use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

/// Body accepted by a Slack incoming webhook.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SlackMessage {
    pub text: String,
}

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Slack webhook URL is not configured")]
    NotConfigured,

    #[error("Slack API error: {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for SlackError {
    /// Keeps the full cause chain but never the webhook URL, which embeds the secret.
    fn from(err: reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        let mut reason = format!("{:#}", anyhow::Error::from(err.without_url()));
        if timed_out && !reason.contains("timed out") {
            reason.push_str(": operation timed out");
        }
        SlackError::Transport(reason)
    }
}

/// Delivers a single text message to the downstream chat channel.
#[async_trait]
pub trait SlackSender: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), SlackError>;
}

/// Posts `{"text": ...}` to a Slack incoming webhook over HTTP.
#[derive(Debug, Clone)]
pub struct SlackWebhookClient {
    http: Client,
    webhook_url: Option<String>,
}

impl SlackWebhookClient {
    pub fn new(webhook_url: Option<String>, timeout: Duration) -> Result<Self, SlackError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self { http, webhook_url })
    }
}

#[async_trait]
impl SlackSender for SlackWebhookClient {
    #[instrument(skip_all, fields(len = text.len()))]
    async fn send_text(&self, text: &str) -> Result<(), SlackError> {
        let webhook_url = self.webhook_url.as_deref().ok_or_else(|| {
            error!("SLACK_WEBHOOK_URL is not set, dropping message");
            SlackError::NotConfigured
        })?;

        let payload = SlackMessage { text: text.to_string() };

        let res = self.http
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let err = SlackError::from(e);
                error!("Slack request failed: {}", err);
                err
            })?;

        let status = res.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Slack rejected the message");
            return Err(SlackError::Status(status.as_u16()));
        }

        info!("Slack accepted the message");
        Ok(())
    }
}
