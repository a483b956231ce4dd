use std::io;

use thiserror::Error;

/// A durable read or write did not complete.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("storage i/o error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode record {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persisted bytes under `key` do not parse as the expected record shape.
///
/// Never surfaced past a store: callers treat the record as absent.
#[derive(Debug, Error)]
#[error("malformed record under {key}: {source}")]
pub struct MalformedRecordError {
    pub key: String,
    #[source]
    pub source: serde_json::Error,
}

/// Outcome of decoding a persisted record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),
}
