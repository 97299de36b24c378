use std::fmt;

use crate::error::{StoreError, StoreResult};

/// Maximum length of a namespace name.
pub const MAX_NAMESPACE_LEN: usize = 64;

/// A validated store namespace, e.g. `orders`.
///
/// Names are restricted to ASCII alphanumerics, `_` and `-` so they can be
/// used directly as directory names by file-backed stores.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(StoreError::InvalidNamespace {
                name,
                reason: "must not be empty".into(),
            });
        }
        if name.len() > MAX_NAMESPACE_LEN {
            return Err(StoreError::InvalidNamespace {
                name,
                reason: format!("longer than {MAX_NAMESPACE_LEN} bytes"),
            });
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(StoreError::InvalidNamespace {
                reason: format!("illegal character {c:?}"),
                name,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Namespace {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        Self::new(s)
    }
}
