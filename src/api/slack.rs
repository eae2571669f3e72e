use actix_web::{post, web, HttpResponse};
use tracing::{info, instrument};

use crate::model::global_error::{AppError, ErrorResponse};
use crate::model::notification::{NotifyRequest, OrderNotifyRequest, PaymentNotifyRequest, RelayResponse};
use crate::relay::NotificationRelay;

#[utoipa::path(
    post,
    path = "/api/slack/notify",
    summary = "Forward a plain message to Slack",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Slack accepted the message", body = RelayResponse),
        (status = 400, description = "message is missing", body = ErrorResponse),
        (status = 500, description = "Slack delivery failed", body = ErrorResponse),
    ),
    tag = "slack",
)]
#[post("/notify")]
#[instrument(skip_all)]
pub async fn notify(
    body: web::Json<NotifyRequest>,
    relay: web::Data<NotificationRelay>,
) -> Result<HttpResponse, AppError> {
    info!(text = ?body.message, "Received notification request");

    let confirmation = relay.notify(&body).await?;

    Ok(HttpResponse::Ok().json(RelayResponse::sent(confirmation)))
}

#[utoipa::path(
    post,
    path = "/api/slack/order",
    summary = "Announce a new order",
    request_body = OrderNotifyRequest,
    responses(
        (status = 200, description = "Slack accepted the order notification", body = RelayResponse),
        (status = 400, description = "businessName, email or address is missing", body = ErrorResponse),
        (status = 500, description = "Slack delivery failed", body = ErrorResponse),
    ),
    tag = "slack",
)]
#[post("/order")]
#[instrument(skip_all)]
pub async fn notify_order(
    body: web::Json<OrderNotifyRequest>,
    relay: web::Data<NotificationRelay>,
) -> Result<HttpResponse, AppError> {
    info!("Sending order notification to Slack");

    let confirmation = relay.notify_order(&body).await?;

    Ok(HttpResponse::Ok().json(RelayResponse::sent(confirmation)))
}

#[utoipa::path(
    post,
    path = "/api/slack/payment",
    summary = "Announce a completed payment",
    request_body = PaymentNotifyRequest,
    responses(
        (status = 200, description = "Slack accepted the payment notification", body = RelayResponse),
        (status = 400, description = "a required payment field is missing", body = ErrorResponse),
        (status = 500, description = "Slack delivery failed", body = ErrorResponse),
    ),
    tag = "slack",
)]
#[post("/payment")]
#[instrument(skip_all)]
pub async fn notify_payment(
    body: web::Json<PaymentNotifyRequest>,
    relay: web::Data<NotificationRelay>,
) -> Result<HttpResponse, AppError> {
    info!("Sending payment notification to Slack");

    let confirmation = relay.notify_payment(&body).await?;

    Ok(HttpResponse::Ok().json(RelayResponse::sent(confirmation)))
}
