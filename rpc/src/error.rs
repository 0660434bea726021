//! API error types and their HTTP mapping.
//!
//! Every error is rendered as `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::handlers::ErrorResponse;

#[derive(Debug, Error)]
pub enum RpcError {
    /// A required field is missing; the message is returned verbatim.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::InvalidRequest(_) | RpcError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RpcError::Store(_) | RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<factcheck_store::StoreError> for RpcError {
    fn from(e: factcheck_store::StoreError) -> Self {
        RpcError::Store(e.to_string())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
