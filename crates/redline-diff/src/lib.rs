//! Diff engine for redline.
//!
//! Computes line-level diffs between two [`Document`](redline_types::Document)
//! snapshots, producing the ordered, non-overlapping change descriptors the
//! review engine persists and applies, plus unified-diff text for audit
//! deltas.
//!
//! # Key Types
//!
//! - [`DocumentDiff`] / [`ChangeHunk`] / [`DiffLine`] -- structured line diff
//! - [`diff_documents`] -- descriptor generation
//! - [`unified_text`] -- classic unified-diff rendering

pub mod document_diff;
pub mod unified;

pub use document_diff::{diff_documents, ChangeHunk, DiffLine, DocumentDiff};
pub use unified::unified_text;
