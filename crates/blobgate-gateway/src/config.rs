use blobgate_store::Namespace;

use crate::error::{GatewayError, GatewayResult};

/// Default namespace records are stored under.
pub const DEFAULT_NAMESPACE: &str = "orders";

/// Default document field holding the record identifier.
pub const DEFAULT_ID_FIELD: &str = "orderId";

/// Configuration for a [`crate::RecordGateway`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Namespace in the blob store that holds every record.
    pub namespace: Namespace,
    /// Name of the document field carrying the identifier.
    pub id_field: String,
}

impl GatewayConfig {
    pub fn new(namespace: &str, id_field: impl Into<String>) -> GatewayResult<Self> {
        let namespace =
            Namespace::new(namespace).map_err(|e| GatewayError::Config(e.to_string()))?;
        let id_field = id_field.into();
        if id_field.is_empty() {
            return Err(GatewayError::Config("id_field must not be empty".into()));
        }
        Ok(Self {
            namespace,
            id_field,
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            namespace: Namespace::new(DEFAULT_NAMESPACE).expect("default namespace is valid"),
            id_field: DEFAULT_ID_FIELD.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = GatewayConfig::default();
        assert_eq!(c.namespace.as_str(), "orders");
        assert_eq!(c.id_field, "orderId");
    }

    #[test]
    fn rejects_bad_namespace_and_field() {
        assert!(matches!(
            GatewayConfig::new("bad/ns", "orderId"),
            Err(GatewayError::Config(_))
        ));
        assert!(matches!(
            GatewayConfig::new("orders", ""),
            Err(GatewayError::Config(_))
        ));
        assert!(GatewayConfig::new("carts", "cartId").is_ok());
    }
}
