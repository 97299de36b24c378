use blobgate_store::StoreError;

/// Errors a gateway operation can end in.
///
/// "No record under this id" is deliberately absent: it is an ordinary
/// lookup result, see [`crate::Lookup::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request body is not a JSON object.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The identifier is absent, empty, or not usable as a key.
    #[error("missing identifier field '{field}'")]
    MissingIdentifier { field: String },

    /// The blob store could not complete the operation.
    #[error("backend failure: {0}")]
    Backend(#[from] StoreError),

    /// The transport asked for an operation the gateway does not offer.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Gateway configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            field: field.into(),
        }
    }

    /// `true` when the caller, not the backend, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::MissingIdentifier { .. } | Self::UnsupportedMethod(_)
        )
    }
}

/// Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
