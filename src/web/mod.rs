//! HTTP facade over [`CharacterService`](crate::service::CharacterService).
//!
//! Storage failures of any kind become `500 storage_error`, a missing record
//! becomes `404 not_found` and an unreadable body keeps the status the JSON
//! extractor chose with code `invalid_body`. All carry an `{"error", "code"}` body.

use crate::core::RosterError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub mod app;
pub mod handlers;

pub use app::build_router;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum WebError {
    Roster(RosterError),
    InvalidBody { status: StatusCode, message: String },
}

impl From<RosterError> for WebError {
    fn from(err: RosterError) -> Self {
        WebError::Roster(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        WebError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            WebError::Roster(err) if err.is_storage() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                "storage_error",
            ),
            WebError::Roster(err) => (StatusCode::NOT_FOUND, err.to_string(), "not_found"),
            WebError::InvalidBody { status, message } => (status, message, "invalid_body"),
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
