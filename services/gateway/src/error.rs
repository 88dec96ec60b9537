use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::EngineError;

/// Central error type for the gateway
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnknownMarket { symbol } => AppError::UnknownMarket(symbol),
            EngineError::Shutdown => AppError::Unavailable("engine is shutting down".into()),
            EngineError::Order(order_err) => AppError::BadRequest(order_err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::UnknownMarket(msg) => (StatusCode::BAD_REQUEST, msg, "UNKNOWN_MARKET"),
            AppError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg, "SERVICE_UNAVAILABLE")
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
