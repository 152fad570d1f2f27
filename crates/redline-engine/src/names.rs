//! Service naming and the per-pair document layout.
//!
//! Each revision pair lives under one service name, a single path segment.
//! The store layout per service:
//! - `{service}/current.md` -- baseline text, exists once the pair is created
//! - `{service}/updated.md` -- proposed text, exists only while unresolved
//! - `{service}/changes.json` -- persisted descriptor list
//! - `{service}/metadata.json` -- update provenance, optional

use crate::error::{EngineError, EngineResult};

pub const CURRENT_DOC: &str = "current.md";
pub const UPDATED_DOC: &str = "updated.md";
pub const CHANGES_DOC: &str = "changes.json";
pub const METADATA_DOC: &str = "metadata.json";

/// Characters that are forbidden anywhere in a service name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '/', '\\', '\0'];

/// Validate a service name: non-empty, a single path segment, not a dot
/// path.
pub fn validate_service_name(service: &str) -> EngineResult<()> {
    if service.is_empty() {
        return Err(EngineError::invalid_name(
            service,
            "service name must not be empty",
        ));
    }
    if service == "." || service == ".." {
        return Err(EngineError::invalid_name(
            service,
            "service name must not be a dot path",
        ));
    }
    for ch in FORBIDDEN_CHARS {
        if service.contains(*ch) {
            return Err(EngineError::invalid_name(
                service,
                format!("contains forbidden character: {ch:?}"),
            ));
        }
    }
    Ok(())
}

pub fn current_name(service: &str) -> String {
    format!("{service}/{CURRENT_DOC}")
}

pub fn updated_name(service: &str) -> String {
    format!("{service}/{UPDATED_DOC}")
}

pub fn changes_name(service: &str) -> String {
    format!("{service}/{CHANGES_DOC}")
}

pub fn metadata_name(service: &str) -> String {
    format!("{service}/{METADATA_DOC}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_service_names() {
        assert!(validate_service_name("billing").is_ok());
        assert!(validate_service_name("auth-service").is_ok());
        assert!(validate_service_name("svc_1.v2").is_ok());
    }

    #[test]
    fn reject_empty_and_dot_paths() {
        assert!(validate_service_name("").is_err());
        assert!(validate_service_name(".").is_err());
        assert!(validate_service_name("..").is_err());
    }

    #[test]
    fn reject_separators_and_whitespace() {
        assert!(validate_service_name("a/b").is_err());
        assert!(validate_service_name("a\\b").is_err());
        assert!(validate_service_name("has space").is_err());
        assert!(validate_service_name("has\nnewline").is_err());
    }

    #[test]
    fn layout_names() {
        assert_eq!(current_name("svc"), "svc/current.md");
        assert_eq!(updated_name("svc"), "svc/updated.md");
        assert_eq!(changes_name("svc"), "svc/changes.json");
        assert_eq!(metadata_name("svc"), "svc/metadata.json");
    }
}
