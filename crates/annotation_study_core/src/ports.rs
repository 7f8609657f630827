//! crates/annotation_study_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the
//! filesystem dataset files or the per-user SQLite stores.

use async_trait::async_trait;

use crate::domain::{Identity, NewEntry, Paragraph};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external resources (dataset
/// files, store files) behind the failure taxonomy the handlers care about.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The identity has no entry in the static dataset table.
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    /// The dataset file backing this identity is missing or malformed.
    #[error("Dataset unavailable for {0}: {1}")]
    DatasetUnavailable(String, String),
    /// The per-user store file does not exist.
    #[error("No store for user: {0}")]
    StoreNotFound(String),
    /// The storage backend failed; fatal to the current request.
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Resolves an identity to its ordered paragraph sequence.
///
/// Implementations load fresh on every call; edits to the backing files take
/// effect on the next request without a restart.
#[async_trait]
pub trait ParagraphSource: Send + Sync {
    async fn load_paragraphs(&self, identity: &Identity) -> PortResult<Vec<Paragraph>>;

    /// The justification-stage dataset, a separate file table from the
    /// reading dataset.
    async fn load_justification(&self, identity: &Identity) -> PortResult<Vec<Paragraph>>;

    /// Whether a justification dataset is configured for this identity.
    /// Gates entry into the justification stage.
    fn has_justification(&self, identity: &Identity) -> bool;
}

/// The per-identity append-only progress log.
///
/// Each identity's store is a wholly isolated resource, lazily created on
/// first append. Rows are never updated; the only delete is the whole-store
/// `reset`.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Count of existing entries; the zero-based index of the next
    /// paragraph to serve. A missing store counts as zero.
    async fn current_position(&self, identity: &Identity) -> PortResult<usize>;

    /// Inserts one row. Never rejects based on content, only on storage
    /// failure.
    async fn append_entry(&self, identity: &Identity, entry: NewEntry) -> PortResult<()>;

    /// Deletes the entire store. `StoreNotFound` if it never existed.
    async fn reset(&self, identity: &Identity) -> PortResult<()>;

    /// The raw bytes of the store file, for admin export.
    async fn export(&self, identity: &Identity) -> PortResult<Vec<u8>>;
}

/// Splits a block of text into ordered sentences.
///
/// An injected capability; the exact boundary rules belong to the
/// implementation, not to the reading flow.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}
