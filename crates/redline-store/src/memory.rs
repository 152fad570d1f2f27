use std::collections::HashMap;
use std::sync::RwLock;

use redline_types::Document;

use crate::error::StoreResult;
use crate::names::validate_document_name;
use crate::traits::DocumentStore;

/// In-memory, HashMap-based document store.
///
/// Intended for tests and embedding. All documents are held in memory behind
/// a `RwLock` for safe concurrent access. Documents are cloned on read/write.
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }

    /// Remove all documents from the store.
    pub fn clear(&self) {
        self.documents.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self, name: &str) -> StoreResult<Option<Document>> {
        validate_document_name(name)?;
        let map = self.documents.read().expect("lock poisoned");
        Ok(map.get(name).cloned())
    }

    fn save(&self, name: &str, document: &Document) -> StoreResult<()> {
        validate_document_name(name)?;
        let mut map = self.documents.write().expect("lock poisoned");
        map.insert(name.to_string(), document.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        validate_document_name(name)?;
        let mut map = self.documents.write().expect("lock poisoned");
        Ok(map.remove(name).is_some())
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        validate_document_name(name)?;
        let map = self.documents.read().expect("lock poisoned");
        Ok(map.contains_key(name))
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let map = self.documents.read().expect("lock poisoned");
        let mut names: Vec<String> = map
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryDocumentStore")
            .field("document_count", &count)
            .finish()
    }
}
