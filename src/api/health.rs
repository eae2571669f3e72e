use actix_web::{get, HttpResponse, Responder};

use crate::model::notification::HealthResponse;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Relay is up", body = HealthResponse)
    ),
    tag = "health check",
)]
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Proxy server is running".to_string(),
    })
}
