use redline_store::StoreError;
use redline_types::RangeError;

/// Errors from revision engine operations.
///
/// Every variant maps to one failure class at the boundary: absent state,
/// caller mistakes (bad name or range), contention, corrupt persisted
/// state, and backend I/O. Validation failures are raised before any write,
/// so they always leave both documents untouched.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The named document or pair is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A descriptor or block failed validation against the live pair.
    #[error("invalid range: {0}")]
    InvalidRange(#[from] RangeError),

    /// The service name fails boundary validation.
    #[error("invalid service name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The pair's slot is held by an in-flight operation; retry after it
    /// completes.
    #[error("pair {0:?} is busy with another operation")]
    Conflict(String),

    /// A persisted blob could not be decoded.
    #[error("corrupt persisted state in {name:?}: {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Gateway I/O failure, passed through opaquely.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
