//! Sync error taxonomy.
//!
//! Every external-call failure is classified: either it aborts the
//! current record's sync (the batch continues with the next record), or
//! it is a soft failure the engine reports and works past. Nothing is
//! ever retried automatically.

use thiserror::Error;

/// Errors that can occur while synchronizing one artwork record.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The lookup response was not valid result JSON.
    #[error("lookup response could not be parsed: {message}")]
    LookupParse { message: String },

    /// The lookup returned more than one item for an accession number.
    /// Which item to edit is undefined, so the record is refused.
    #[error("{count} items share accession number {accession}; refusing to guess")]
    AmbiguousMatch { accession: String, count: usize },

    /// The create-entity call was rejected (e.g. a page-save conflict).
    #[error("create rejected for {accession}: {message}")]
    CreateConflict { accession: String, message: String },

    /// Bot credentials are absent or empty in the configuration.
    #[error("missing credential: {field}")]
    Credentials { field: &'static str },

    /// An HTTP round trip failed or returned a non-success status.
    #[error("HTTP error during {operation}: {message}")]
    Http {
        operation: &'static str,
        message: String,
    },

    /// The MediaWiki API returned an error payload.
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    /// The entity was not present in the entity-data response.
    #[error("entity not found: {qid}")]
    NotFound { qid: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error propagated from `serde_json`.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An error propagated from the core domain layer (missing required
    /// field, malformed entity id).
    #[error(transparent)]
    Core(#[from] vitrine_core::Error),
}

impl SyncError {
    /// Returns `true` when the failure happened before any write could be
    /// attempted for the record (safe to report and move on).
    pub fn aborts_before_write(&self) -> bool {
        matches!(
            self,
            Self::LookupParse { .. }
                | Self::AmbiguousMatch { .. }
                | Self::Credentials { .. }
                | Self::Core(_)
        )
    }

    /// Returns `true` when the failure is a rejected write (conflict);
    /// the record ends without retry.
    pub fn is_write_rejection(&self) -> bool {
        matches!(self, Self::CreateConflict { .. })
    }
}

/// Convenience alias for sync results.
pub type SyncResult<T> = std::result::Result<T, SyncError>;
