use serde::{Deserialize, Serialize};

/// HTTP endpoint paths.
pub mod endpoints {
    /// Default path of the record endpoint.
    pub const RECORDS: &str = "/.netlify/functions/manageOrder";
    pub const HEALTH: &str = "/v1/health";
}

/// Response bodies of the record endpoint.
pub mod messages {
    pub const SAVED: &str = "Order Saved Successfully";
    pub const MISSING_ID: &str = "Missing Order ID";
    pub const MISSING_ID_PARAM: &str = "Missing Order ID parameter";
    pub const INVALID_BODY: &str = "Invalid JSON body";
    pub const NOT_FOUND: &str = "Order not found";
    pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
    pub const SAVE_FAILED: &str = "Server Error: Could not save order.";
    pub const FETCH_FAILED: &str = "Server Error: Could not fetch order.";
}

/// Body of a successful `POST`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAck {
    pub message: String,
    pub id: String,
}

impl SaveAck {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            message: messages::SAVED.into(),
            id: id.into(),
        }
    }
}

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
