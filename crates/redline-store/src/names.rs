//! Document name validation.
//!
//! Names are relative, slash-separated paths into the store. Valid names:
//! - Must be non-empty
//! - Must not contain whitespace, backslash, or NUL
//! - Must not start or end with `/`
//! - Must not contain consecutive slashes (`//`)
//! - Segments must not be empty, `.`, or `..`

use crate::error::{StoreError, StoreResult};

/// Characters that are forbidden anywhere in a document name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\\', '\0'];

/// Validate a document name, returning `Ok(())` if valid.
///
/// Rejecting `.` and `..` segments keeps every name inside the store root,
/// regardless of backend.
///
/// # Examples
///
/// ```
/// use redline_store::names::validate_document_name;
///
/// assert!(validate_document_name("billing/current.md").is_ok());
/// assert!(validate_document_name("").is_err());
/// assert!(validate_document_name("../escape").is_err());
/// ```
pub fn validate_document_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::invalid_name(
            name,
            "document name must not be empty",
        ));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(StoreError::invalid_name(
                name,
                format!("contains forbidden character: {ch:?}"),
            ));
        }
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(StoreError::invalid_name(
            name,
            "must not start or end with '/'",
        ));
    }

    if name.contains("//") {
        return Err(StoreError::invalid_name(
            name,
            "must not contain consecutive slashes '//'",
        ));
    }

    for segment in name.split('/') {
        if segment == "." || segment == ".." {
            return Err(StoreError::invalid_name(
                name,
                format!("segment must not be a dot path: {segment:?}"),
            ));
        }
    }

    Ok(())
}
