use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    /// Failures that come from the storage medium rather than from the request.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Storage(_) | Self::QuotaExceeded { .. } | Self::Serialization(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message_names_key() {
        let err = BoardError::QuotaExceeded {
            key: "airdrop-board".to_string(),
            needed: 2048,
            limit: 1024,
        };
        let message = err.to_string();
        assert!(message.contains("airdrop-board"));
        assert!(message.contains("2048"));
        assert!(err.is_storage_failure());
    }

    #[test]
    fn test_not_found_is_not_storage_failure() {
        let err = BoardError::not_found("Column 7");
        assert_eq!(err.to_string(), "Not found: Column 7");
        assert!(!err.is_storage_failure());
    }
}
