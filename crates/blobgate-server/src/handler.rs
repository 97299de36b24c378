use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::Method;
use axum::response::{Json, Response};
use blobgate_gateway::{Lookup, RecordGateway};

use crate::endpoint::HealthResponse;
use crate::response::{self, ApiError};

/// Shared state handed to every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub gateway: Arc<RecordGateway>,
    /// Query parameter carrying the identifier on `GET`.
    pub id_param: Arc<str>,
}

impl AppState {
    pub fn new(gateway: Arc<RecordGateway>, id_param: impl Into<Arc<str>>) -> Self {
        Self {
            gateway,
            id_param: id_param.into(),
        }
    }
}

/// `POST`: store the body as a record.
pub async fn save_record(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let stored = state.gateway.put(&body).await.map_err(ApiError::save)?;
    Ok(response::saved(&stored))
}

/// `GET`: return the record named by the id query parameter.
pub async fn fetch_record(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let id = params.get(&*state.id_param).map(String::as_str).unwrap_or_default();
    match state.gateway.get(id).await.map_err(ApiError::fetch)? {
        Lookup::Found(payload) => Ok(response::found(payload)),
        Lookup::NotFound => Ok(response::not_found()),
    }
}

/// Any other method on the record endpoint.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::unsupported(&method)
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
