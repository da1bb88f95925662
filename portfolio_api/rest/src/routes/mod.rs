use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiError, ApiMessage};

pub mod contact;

pub const SEND_FAILED: &str = "Failed to send email";

/// Log `err` and answer with the generic delivery failure.
pub fn send_failed(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("Error sending email: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED)
}

fn error(code: StatusCode, error: &'static str) -> Response {
    (code, Json(ApiError { error })).into_response()
}

fn message(message: &'static str) -> Response {
    Json(ApiMessage { message }).into_response()
}
