use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing a value to the backing medium failed (e.g. disk full).
    #[error("write failed for key `{key}`")]
    Write {
        /// Key whose value could not be written.
        key: String,
        /// Underlying backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Encoding a value for persistence failed.
    #[error("failed to encode value for key `{key}`")]
    Encode {
        /// Key whose value could not be encoded.
        key: String,
        /// Serialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Construct a write error from any backend failure.
    pub fn write(key: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Write {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Construct an encode error for the given key.
    pub fn encode(key: impl Into<String>, source: serde_json::Error) -> Self {
        StorageError::Encode {
            key: key.into(),
            source,
        }
    }
}
