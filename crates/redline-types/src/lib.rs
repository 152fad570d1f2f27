//! Foundation types for redline.
//!
//! This crate provides the document, change, and metadata types used
//! throughout the redline system. Every other redline crate depends on
//! `redline-types`.
//!
//! # Key Types
//!
//! - [`Document`] — Ordered, line-indexed view over text content
//! - [`ChangeDescriptor`] — One diff hunk's four line-range boundaries
//! - [`ChangeBlock`] — An ordered group of descriptors resolved as one bulk operation
//! - [`UpdateMetadata`] — Provenance of a proposed update
//! - [`RangeError`] — Validation failures for ranges and blocks

pub mod change;
pub mod document;
pub mod error;
pub mod metadata;

pub use change::{sort_bottom_up, ChangeBlock, ChangeDescriptor};
pub use document::Document;
pub use error::{DocumentSide, RangeError};
pub use metadata::UpdateMetadata;
