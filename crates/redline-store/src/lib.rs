//! Document storage gateway for redline.
//!
//! Everything the engine persists -- baseline text, proposed text, change
//! lists, provenance records -- goes through the [`DocumentStore`] trait as a
//! named [`Document`](redline_types::Document). The store is a pure key-value
//! gateway: it never interprets document contents.
//!
//! # Storage Backends
//!
//! - [`InMemoryDocumentStore`] -- `HashMap`-based store for tests and
//!   embedding
//! - [`FsDocumentStore`] -- rooted directory store with atomic writes, for
//!   production use
//!
//! # Design Rules
//!
//! 1. Saves are all-or-nothing: a reader never observes partially written
//!    content, and a failed save leaves the prior content intact.
//! 2. Document names are validated before any backend access; an invalid
//!    name can never touch storage.
//! 3. Absence is data: loading a missing document returns `Ok(None)`.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::{FsDocumentStore, FsStoreConfig};
pub use memory::InMemoryDocumentStore;
pub use names::validate_document_name;
pub use traits::DocumentStore;
