use std::fmt;

use thiserror::Error;

/// Which document of a revision pair a range refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentSide {
    /// The accepted baseline.
    Current,
    /// The proposed alternative.
    Updated,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSide::Current => write!(f, "current"),
            DocumentSide::Updated => write!(f, "updated"),
        }
    }
}

/// Validation failures for line ranges, descriptors, and blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    /// A range's start index is greater than its end index.
    #[error("inverted range: start {start} is greater than end {end}")]
    Inverted { start: usize, end: usize },

    /// A range reaches past the end of its document's live content.
    #[error("range {start}..{end} is out of bounds for the {side} document ({len} lines)")]
    OutOfBounds {
        side: DocumentSide,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A block must contain at least one descriptor.
    #[error("block contains no descriptors")]
    EmptyBlock,

    /// Two descriptors in one block cover overlapping line ranges.
    #[error("block descriptors overlap on the {side} side near line {line}")]
    Overlapping { side: DocumentSide, line: usize },
}
