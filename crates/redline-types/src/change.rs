use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{DocumentSide, RangeError};

/// One diff hunk's four line-range boundaries.
///
/// `current_start..current_end` and `updated_start..updated_end` are
/// half-open, zero-based line ranges into the current and updated documents
/// as they existed when the descriptor was produced. Either range may be
/// empty, representing a pure insertion or deletion.
///
/// Descriptors carry snapshot semantics: any structural edit to a document
/// made after generation invalidates its outstanding descriptors, which is
/// why ranges are re-validated against live document lengths at application
/// time. The serialized field names are the wire format's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChangeDescriptor {
    #[serde(rename = "currentStartLine")]
    pub current_start: usize,
    #[serde(rename = "currentEndLine")]
    pub current_end: usize,
    #[serde(rename = "updatedStartLine")]
    pub updated_start: usize,
    #[serde(rename = "updatedEndLine")]
    pub updated_end: usize,
}

impl ChangeDescriptor {
    /// Create a descriptor from its four boundaries.
    pub fn new(
        current_start: usize,
        current_end: usize,
        updated_start: usize,
        updated_end: usize,
    ) -> Self {
        Self {
            current_start,
            current_end,
            updated_start,
            updated_end,
        }
    }

    /// The half-open range into the current document.
    pub fn current_range(&self) -> Range<usize> {
        self.current_start..self.current_end
    }

    /// The half-open range into the updated document.
    pub fn updated_range(&self) -> Range<usize> {
        self.updated_start..self.updated_end
    }

    /// Number of current-side lines this descriptor replaces.
    pub fn current_len(&self) -> usize {
        self.current_end.saturating_sub(self.current_start)
    }

    /// Number of updated-side lines this descriptor introduces.
    pub fn updated_len(&self) -> usize {
        self.updated_end.saturating_sub(self.updated_start)
    }

    /// Returns `true` if the current-side range is empty (pure insertion).
    pub fn is_insertion(&self) -> bool {
        self.current_start == self.current_end
    }

    /// Returns `true` if the updated-side range is empty (pure deletion).
    pub fn is_deletion(&self) -> bool {
        self.updated_start == self.updated_end
    }

    /// Check that both ranges are well-formed (`start <= end`).
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.current_start > self.current_end {
            return Err(RangeError::Inverted {
                start: self.current_start,
                end: self.current_end,
            });
        }
        if self.updated_start > self.updated_end {
            return Err(RangeError::Inverted {
                start: self.updated_start,
                end: self.updated_end,
            });
        }
        Ok(())
    }

    /// Check well-formedness and that both ranges lie within the live
    /// document lengths. This is the staleness gate: a descriptor produced
    /// against older content fails here instead of splicing garbage.
    pub fn validate_against(
        &self,
        current_len: usize,
        updated_len: usize,
    ) -> Result<(), RangeError> {
        self.validate()?;
        if self.current_end > current_len {
            return Err(RangeError::OutOfBounds {
                side: DocumentSide::Current,
                start: self.current_start,
                end: self.current_end,
                len: current_len,
            });
        }
        if self.updated_end > updated_len {
            return Err(RangeError::OutOfBounds {
                side: DocumentSide::Updated,
                start: self.updated_start,
                end: self.updated_end,
                len: updated_len,
            });
        }
        Ok(())
    }
}

/// Sort descriptors bottom-of-document first (descending `current_start`).
///
/// Sequential single-hunk accepts against one diff snapshot must run in this
/// order: a replacement only shifts line numbers at or after its own start,
/// so working upward keeps every not-yet-applied descriptor's ranges valid.
pub fn sort_bottom_up(descriptors: &mut [ChangeDescriptor]) {
    descriptors.sort_by(|a, b| b.current_start.cmp(&a.current_start));
}

/// An ordered, non-empty group of descriptors resolved as one bulk
/// operation.
///
/// Serialized as a bare JSON array of descriptors. A block's effective range
/// is its envelope: the minimum start and maximum end on each side across
/// all members. Members must not overlap on either side; the envelope
/// substitution assumes each line of the covered span is accounted for
/// exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeBlock {
    descriptors: Vec<ChangeDescriptor>,
}

impl ChangeBlock {
    /// Create a block from a descriptor list. Emptiness and overlap are
    /// checked by [`ChangeBlock::validate_against`], not here, so that
    /// deserialized blocks pass through a single validation gate.
    pub fn new(descriptors: Vec<ChangeDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The member descriptors in caller order.
    pub fn descriptors(&self) -> &[ChangeDescriptor] {
        &self.descriptors
    }

    /// Number of member descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the block has no members.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The enclosing descriptor: min start and max end on each side.
    /// Returns `None` for an empty block.
    pub fn envelope(&self) -> Option<ChangeDescriptor> {
        let first = self.descriptors.first()?;
        let mut envelope = *first;
        for d in &self.descriptors[1..] {
            envelope.current_start = envelope.current_start.min(d.current_start);
            envelope.current_end = envelope.current_end.max(d.current_end);
            envelope.updated_start = envelope.updated_start.min(d.updated_start);
            envelope.updated_end = envelope.updated_end.max(d.updated_end);
        }
        Some(envelope)
    }

    /// Validate the whole block against live document lengths: non-empty,
    /// every member well-formed, the envelope in bounds, and no overlap
    /// between members on either side.
    pub fn validate_against(
        &self,
        current_len: usize,
        updated_len: usize,
    ) -> Result<(), RangeError> {
        if self.descriptors.is_empty() {
            return Err(RangeError::EmptyBlock);
        }
        for d in &self.descriptors {
            d.validate()?;
        }
        let envelope = self.envelope().expect("non-empty block has an envelope");
        envelope.validate_against(current_len, updated_len)?;
        self.check_overlap(DocumentSide::Current)?;
        self.check_overlap(DocumentSide::Updated)
    }

    fn check_overlap(&self, side: DocumentSide) -> Result<(), RangeError> {
        let range_of = |d: &ChangeDescriptor| match side {
            DocumentSide::Current => d.current_range(),
            DocumentSide::Updated => d.updated_range(),
        };
        let mut ranges: Vec<Range<usize>> = self.descriptors.iter().map(range_of).collect();
        ranges.sort_by_key(|r| (r.start, r.end));
        for pair in ranges.windows(2) {
            if pair[0].end > pair[1].start {
                return Err(RangeError::Overlapping {
                    side,
                    line: pair[1].start,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<ChangeDescriptor>> for ChangeBlock {
    fn from(descriptors: Vec<ChangeDescriptor>) -> Self {
        Self::new(descriptors)
    }
}
