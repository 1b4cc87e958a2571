//! Error types for orgdir-core

use crate::model::OrgId;
use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// No storage connection configured, or an invalid backend selection
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The queried organization was removed or never existed
    #[error("organization [{0}] not found")]
    OrgNotFound(OrgId),

    /// An invariant-violating value was rejected before reaching stored state
    #[error("validation error: {0}")]
    Validation(String),

    /// Persistent backend failure
    #[error("database error: {0}")]
    Database(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the registry-level hard failure raised when an organization
    /// is unknown, as opposed to an absent read result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::OrgNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OrgNotFound(42);
        assert_eq!(err.to_string(), "organization [42] not found");
        assert!(err.is_not_found());

        let err = Error::Configuration("no storage connection set".to_string());
        assert!(err.to_string().contains("configuration error"));
        assert!(!err.is_not_found());
    }
}
