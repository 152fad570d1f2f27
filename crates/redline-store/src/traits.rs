use redline_types::Document;

use crate::error::StoreResult;

/// Named document storage.
///
/// All implementations must satisfy these invariants:
/// - Names are validated before any backend access; an invalid name never
///   touches storage.
/// - `save` is an atomic upsert: readers observe either the previous content
///   or the new content, never a mixture, and a failed save leaves the
///   previous content intact.
/// - Loading a missing document returns `Ok(None)`, not an error.
/// - `list` output is sorted lexicographically.
/// - The store never interprets document contents.
/// - All I/O errors are propagated, never silently ignored.
pub trait DocumentStore: Send + Sync {
    /// Read a document by name.
    ///
    /// Returns `Ok(None)` if the document does not exist.
    fn load(&self, name: &str) -> StoreResult<Option<Document>>;

    /// Write a document under a name, replacing any previous content.
    fn save(&self, name: &str, document: &Document) -> StoreResult<()>;

    /// Delete a document by name. Returns `true` if the document existed.
    fn delete(&self, name: &str) -> StoreResult<bool>;

    /// Check whether a document exists.
    fn exists(&self, name: &str) -> StoreResult<bool>;

    /// List all document names starting with `prefix`, sorted.
    ///
    /// An empty prefix lists every document in the store.
    fn list(&self, prefix: &str) -> StoreResult<Vec<String>>;
}
