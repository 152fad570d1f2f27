use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use redline_types::Document;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::names::validate_document_name;
use crate::traits::DocumentStore;

/// Configuration for the filesystem backend.
///
/// Passed explicitly at construction; there is no process-wide default root.
#[derive(Clone, Debug)]
pub struct FsStoreConfig {
    /// Directory all document names resolve under.
    pub root: PathBuf,
}

impl FsStoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Filesystem document store rooted at a directory.
///
/// Each document is one file; slash-separated name segments become
/// subdirectories. Saves write the full content to a temp file in the
/// destination directory and rename it into place, so readers never observe
/// partial content and a failed save leaves the prior file intact.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Open a store, creating the root directory if needed.
    pub fn open(config: FsStoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.root)?;
        Ok(Self { root: config.root })
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        validate_document_name(name)?;
        Ok(self.root.join(name))
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, name: &str) -> StoreResult<Option<Document>> {
        let path = self.path_for(name)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(Document::from_text(&text))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save(&self, name: &str, document: &Document) -> StoreResult<()> {
        let path = self.path_for(name)?;
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent)?;

        // Write-then-rename keeps the save all-or-nothing.
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(document.to_text().as_bytes())?;
        tmp.persist(&path).map_err(|err| StoreError::Io(err.error))?;

        tracing::debug!(name, "document saved");
        Ok(())
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(name, "document deleted");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        let path = self.path_for(name)?;
        Ok(path.is_file())
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|err| StoreError::Io(err.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .expect("walk entries live under the root");
            let name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if name.starts_with(prefix) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for FsDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsDocumentStore")
            .field("root", &self.root)
            .finish()
    }
}
