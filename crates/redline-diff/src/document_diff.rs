//! Document-level diff: line-by-line comparison of two snapshots.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce one hunk per
//! maximal run of changed lines, each carrying the descriptor the engine
//! persists plus display context.

use std::ops::Range;

use similar::{DiffTag, TextDiff};

use redline_types::{ChangeDescriptor, Document};

/// The result of diffing two document snapshots.
///
/// Hunks are ordered by ascending current-side start and never overlap on
/// either side; splicing every hunk's updated-side lines over its
/// current-side range (bottom of document first) reproduces the new
/// snapshot exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentDiff {
    /// The diff hunks.
    pub hunks: Vec<ChangeHunk>,
    /// Total number of lines in the old snapshot.
    pub old_lines: usize,
    /// Total number of lines in the new snapshot.
    pub new_lines: usize,
}

impl DocumentDiff {
    /// Returns `true` if the two snapshots are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// The persistable descriptor list, one per hunk, in hunk order.
    pub fn descriptors(&self) -> Vec<ChangeDescriptor> {
        self.hunks.iter().map(|h| h.descriptor).collect()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }
}

/// One maximal run of changed lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeHunk {
    /// The four range boundaries of the changed run. Context lines are not
    /// part of these ranges.
    pub descriptor: ChangeDescriptor,
    /// Display lines: leading context, removed lines, added lines, trailing
    /// context.
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// A line present in both snapshots (context).
    Context(String),
    /// A line added in the new snapshot.
    Added(String),
    /// A line removed from the old snapshot.
    Removed(String),
}

/// Compute a line-by-line diff between two document snapshots.
///
/// `context` is the maximum number of unchanged lines attached to each hunk
/// on each side, clamped at document edges. Context is advisory display
/// metadata only; it never widens a descriptor's ranges.
pub fn diff_documents(old: &Document, new: &Document, context: usize) -> DocumentDiff {
    if old == new {
        return DocumentDiff {
            hunks: Vec::new(),
            old_lines: old.len(),
            new_lines: new.len(),
        };
    }

    let old_lines: Vec<&str> = old.lines().iter().map(String::as_str).collect();
    let new_lines: Vec<&str> = new.lines().iter().map(String::as_str).collect();
    let text_diff = TextDiff::from_slices(&old_lines, &new_lines);

    // Merge adjacent non-equal ops into maximal runs, so a delete directly
    // followed by an insert becomes a single replacement hunk.
    let mut runs: Vec<(Range<usize>, Range<usize>)> = Vec::new();
    for op in text_diff.ops() {
        if op.tag() == DiffTag::Equal {
            continue;
        }
        let old_range = op.old_range();
        let new_range = op.new_range();
        match runs.last_mut() {
            Some((o, n)) if o.end == old_range.start && n.end == new_range.start => {
                o.end = old_range.end;
                n.end = new_range.end;
            }
            _ => runs.push((old_range, new_range)),
        }
    }

    let hunks = runs
        .into_iter()
        .map(|(o, n)| build_hunk(old, new, o, n, context))
        .collect();

    DocumentDiff {
        hunks,
        old_lines: old.len(),
        new_lines: new.len(),
    }
}

fn build_hunk(
    old: &Document,
    new: &Document,
    old_range: Range<usize>,
    new_range: Range<usize>,
    context: usize,
) -> ChangeHunk {
    let descriptor = ChangeDescriptor::new(
        old_range.start,
        old_range.end,
        new_range.start,
        new_range.end,
    );

    let mut lines = Vec::new();
    let before_start = old_range.start.saturating_sub(context);
    for i in before_start..old_range.start {
        lines.push(DiffLine::Context(old.lines()[i].clone()));
    }
    for i in old_range.clone() {
        lines.push(DiffLine::Removed(old.lines()[i].clone()));
    }
    for i in new_range {
        lines.push(DiffLine::Added(new.lines()[i].clone()));
    }
    let after_end = (old_range.end + context).min(old.len());
    for i in old_range.end..after_end {
        lines.push(DiffLine::Context(old.lines()[i].clone()));
    }

    ChangeHunk { descriptor, lines }
}
