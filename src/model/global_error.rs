use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use std::fmt;
use utoipa::ToSchema;

use crate::util::slack::SlackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    ValidationError,

    // 500 SERVER ERRORS
    DeliveryError,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::DeliveryError => "Failed to deliver notification to Slack",
        }
    }

    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DeliveryError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{1}")]
    ApiError(ErrorCode, String),
}

impl AppError {
    fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        AppError::ApiError(code, detail.into())
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorCode::ValidationError, detail)
    }

    pub fn delivery(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorCode::DeliveryError, detail)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::ApiError(code, _) => *code,
        }
    }
}

impl From<SlackError> for AppError {
    fn from(err: SlackError) -> Self {
        AppError::delivery(err.to_string())
    }
}

/// Body of every failed relay response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.code().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        warn!(code = ?self.code(), detail = %self, "{}", self.code());

        let response = ErrorResponse {
            error: self.to_string(),
            success: false,
        };

        HttpResponse::build(self.code().status_code())
            .json(response)
    }
}
