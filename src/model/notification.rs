use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::global_error::AppError;

pub const REPORT_PRICE: &str = "$12.00";
pub const ORDER_STATUS: &str = "Order Submitted - Awaiting Payment";
pub const PAYMENT_STATUS: &str = "PAID - Ready for Processing";

/// Timestamps in forwarded messages are always rendered in UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NotifyRequest {
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotifyRequest {
    pub business_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotifyRequest {
    pub business_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub payment_id: Option<String>,
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub business_name: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub order: OrderDetails,
    pub payment_id: String,
    pub order_id: String,
}

/// A request that passed validation and is ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Message(String),
    Order(OrderDetails),
    Payment(PaymentDetails),
}

// Absent, null and "" are all treated as missing.
fn required(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl NotifyRequest {
    pub fn validate(&self) -> Result<Notification, AppError> {
        required(&self.message)
            .map(Notification::Message)
            .ok_or_else(|| AppError::validation("Message is required"))
    }
}

impl OrderNotifyRequest {
    pub fn validate(&self) -> Result<Notification, AppError> {
        self.details()
            .map(Notification::Order)
            .ok_or_else(|| AppError::validation("businessName, email, and address are required"))
    }

    fn details(&self) -> Option<OrderDetails> {
        Some(OrderDetails {
            business_name: required(&self.business_name)?,
            email: required(&self.email)?,
            address: required(&self.address)?,
        })
    }
}

impl PaymentNotifyRequest {
    pub fn validate(&self) -> Result<Notification, AppError> {
        self.details()
            .map(Notification::Payment)
            .ok_or_else(|| {
                AppError::validation("businessName, email, address, paymentId, and orderId are required")
            })
    }

    fn details(&self) -> Option<PaymentDetails> {
        Some(PaymentDetails {
            order: OrderDetails {
                business_name: required(&self.business_name)?,
                email: required(&self.email)?,
                address: required(&self.address)?,
            },
            payment_id: required(&self.payment_id)?,
            order_id: required(&self.order_id)?,
        })
    }
}

impl Notification {
    /// Renders the Slack text for this notification.
    ///
    /// `now` is only used by the order and payment templates; a plain
    /// message is forwarded verbatim.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let time = now.format(TIMESTAMP_FORMAT);

        match self {
            Notification::Message(message) => message.clone(),
            Notification::Order(order) => format!(
                "NEW ORDER RECEIVED - {name}\n\
                 Business: {name}\n\
                 Email: {email}\n\
                 Address: {address}\n\
                 Service: Standard Roof Report - {price}\n\
                 Status: {status}\n\
                 Time: {time}\n\
                 Action: Customer needs to complete PayPal payment",
                name = order.business_name,
                email = order.email,
                address = order.address,
                price = REPORT_PRICE,
                status = ORDER_STATUS,
            ),
            Notification::Payment(payment) => format!(
                "PAYMENT COMPLETED - ORDER READY FOR PROCESSING\n\
                 Business: {name}\n\
                 Email: {email}\n\
                 Address: {address}\n\
                 Amount Paid: {price}\n\
                 Payment ID: {payment_id}\n\
                 Order ID: {order_id}\n\
                 Status: {status}\n\
                 Payment Time: {time}\n\
                 Action Required: Generate and deliver roof measurement report to customer",
                name = payment.order.business_name,
                email = payment.order.email,
                address = payment.order.address,
                price = REPORT_PRICE,
                payment_id = payment.payment_id,
                order_id = payment.order_id,
                status = PAYMENT_STATUS,
            ),
        }
    }

    /// Confirmation returned to the caller once Slack accepted the message.
    pub fn confirmation(&self) -> &'static str {
        match self {
            Notification::Message(_) => "Notification sent to Slack successfully",
            Notification::Order(_) => "Order notification sent to Slack successfully",
            Notification::Payment(_) => "Payment notification sent to Slack successfully",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RelayResponse {
    pub success: bool,
    pub message: String,
}

impl RelayResponse {
    pub fn sent(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
