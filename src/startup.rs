use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::web::{scope, Data, JsonConfig, ServiceConfig};
use actix_web::error::JsonPayloadError;
use actix_web::{App, HttpRequest, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::model::global_error::{AppError, ErrorResponse};
use crate::model::notification::{
    HealthResponse, NotifyRequest, OrderNotifyRequest, PaymentNotifyRequest, RelayResponse,
};
use crate::relay::NotificationRelay;

/// Routes announced in the startup log.
pub const SLACK_ROUTES: [&str; 3] = [
    "POST /api/slack/notify",
    "POST /api/slack/order",
    "POST /api/slack/payment",
];

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health_check,
        api::notify,
        api::notify_order,
        api::notify_payment,
    ),
    components(schemas(
        NotifyRequest,
        OrderNotifyRequest,
        PaymentNotifyRequest,
        RelayResponse,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "slack", description = "Slack notification relay"),
        (name = "health check", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

/// Registers the relay routes; shared by the server and the handler tests.
pub fn configure_app(relay: NotificationRelay) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let json_config = JsonConfig::default().error_handler(|err, req| {
            actix_web::Error::from(rejected_body(err, req))
        });

        cfg.app_data(json_config)
            .app_data(Data::new(relay))
            .service(api::health_check)
            .service(
                scope("/api/slack")
                    .service(api::notify)
                    .service(api::notify_order)
                    .service(api::notify_payment),
            );
    }
}

// A body that is empty or not sent as JSON is read as `{}`, so the caller
// gets the route's missing-field message instead of a parser error.
fn rejected_body(err: JsonPayloadError, req: &HttpRequest) -> AppError {
    let no_body = match &err {
        JsonPayloadError::ContentType => true,
        JsonPayloadError::Deserialize(e) => e.is_eof() && e.line() == 1 && e.column() == 0,
        _ => false,
    };
    if !no_body {
        return AppError::validation(err.to_string());
    }

    let empty = match req.path().rsplit('/').next() {
        Some("order") => OrderNotifyRequest::default().validate(),
        Some("payment") => PaymentNotifyRequest::default().validate(),
        _ => NotifyRequest::default().validate(),
    };
    match empty {
        Err(missing) => missing,
        Ok(_) => AppError::validation(err.to_string()),
    }
}

pub fn run(listener: TcpListener, relay: NotificationRelay) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_any_header()
            .expose_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .configure(configure_app(relay.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
