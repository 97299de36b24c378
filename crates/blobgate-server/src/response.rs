//! Mapping of gateway outcomes onto HTTP responses.
//!
//! Success bodies are JSON; every rejection is a short plain-text message.
//! Backend error details are logged by the gateway and never reach the
//! client.

use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use blobgate_gateway::{GatewayError, Stored};
use bytes::Bytes;
use tracing::warn;

use crate::endpoint::{messages, SaveAck};

/// Which side of the endpoint produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Save,
    Fetch,
}

/// A failed request, rendered as a status code plus plain-text body.
#[derive(Debug)]
pub struct ApiError {
    op: Operation,
    error: GatewayError,
}

impl ApiError {
    pub fn save(error: GatewayError) -> Self {
        Self {
            op: Operation::Save,
            error,
        }
    }

    pub fn fetch(error: GatewayError) -> Self {
        Self {
            op: Operation::Fetch,
            error,
        }
    }

    pub fn unsupported(method: &Method) -> Self {
        Self {
            op: Operation::Fetch,
            error: GatewayError::UnsupportedMethod(method.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            GatewayError::InvalidInput(_) | GatewayError::MissingIdentifier { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Backend(_) | GatewayError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match (&self.error, self.op) {
            (GatewayError::InvalidInput(_), _) => messages::INVALID_BODY,
            (GatewayError::MissingIdentifier { .. }, Operation::Save) => messages::MISSING_ID,
            (GatewayError::MissingIdentifier { .. }, Operation::Fetch) => {
                messages::MISSING_ID_PARAM
            }
            (GatewayError::UnsupportedMethod(_), _) => messages::METHOD_NOT_ALLOWED,
            (GatewayError::Backend(_) | GatewayError::Config(_), Operation::Save) => {
                messages::SAVE_FAILED
            }
            (GatewayError::Backend(_) | GatewayError::Config(_), Operation::Fetch) => {
                messages::FETCH_FAILED
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.error.is_client_error() {
            warn!(op = ?self.op, error = %self.error, "request rejected");
        }
        (self.status(), self.message()).into_response()
    }
}

/// `200` with the save acknowledgment.
pub fn saved(stored: &Stored) -> Response {
    Json(SaveAck::new(stored.id.as_str())).into_response()
}

/// `200` with the stored document, byte for byte.
pub fn found(payload: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], Body::from(payload)).into_response()
}

/// `404` for an id with no record.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, messages::NOT_FOUND).into_response()
}
