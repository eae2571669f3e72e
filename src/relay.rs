use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::configuration::Settings;
use crate::model::global_error::AppError;
use crate::model::notification::{Notification, NotifyRequest, OrderNotifyRequest, PaymentNotifyRequest};
use crate::util::slack::{SlackError, SlackSender, SlackWebhookClient};

/// Validates inbound requests, renders them and forwards the text to Slack.
#[derive(Clone)]
pub struct NotificationRelay {
    sender: Arc<dyn SlackSender>,
}

impl NotificationRelay {
    pub fn new(sender: Arc<dyn SlackSender>) -> Self {
        Self { sender }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SlackError> {
        let client = SlackWebhookClient::new(
            settings.slack_webhook_url.clone(),
            settings.slack_timeout,
        )?;
        Ok(Self::new(Arc::new(client)))
    }

    pub async fn notify(&self, req: &NotifyRequest) -> Result<&'static str, AppError> {
        self.relay(req.validate()?).await
    }

    pub async fn notify_order(&self, req: &OrderNotifyRequest) -> Result<&'static str, AppError> {
        self.relay(req.validate()?).await
    }

    pub async fn notify_payment(&self, req: &PaymentNotifyRequest) -> Result<&'static str, AppError> {
        self.relay(req.validate()?).await
    }

    #[instrument(skip_all)]
    async fn relay(&self, notification: Notification) -> Result<&'static str, AppError> {
        let text = notification.render(Utc::now());

        self.sender.send_text(&text).await?;

        let confirmation = notification.confirmation();
        info!("{}", confirmation);
        Ok(confirmation)
    }
}
