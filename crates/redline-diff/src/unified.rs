//! Unified-diff text rendering for audit deltas.

use similar::TextDiff;

use redline_types::Document;

/// Render a classic unified diff between two snapshots of a resource.
///
/// `context` is the number of unchanged lines shown around each hunk.
/// Identical snapshots render as the empty string.
pub fn unified_text(
    old: &Document,
    new: &Document,
    context: usize,
    from_label: &str,
    to_label: &str,
) -> String {
    let old_text = old.to_text();
    let new_text = new.to_text();
    let diff = TextDiff::from_lines(&old_text, &new_text);
    diff.unified_diff()
        .context_radius(context)
        .header(from_label, to_label)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_snapshots_render_empty() {
        let a = Document::from_text("same\ntext");
        assert_eq!(unified_text(&a, &a.clone(), 3, "a", "b"), "");
    }

    #[test]
    fn headers_and_markers_present() {
        let old = Document::from_text("one\ntwo\nthree");
        let new = Document::from_text("one\nTWO\nthree");

        let delta = unified_text(&old, &new, 3, "before.md", "after.md");
        assert!(delta.contains("--- before.md"));
        assert!(delta.contains("+++ after.md"));
        assert!(delta.contains("-two"));
        assert!(delta.contains("+TWO"));
        assert!(delta.contains(" one"));
    }

    #[test]
    fn context_radius_limits_surrounding_lines() {
        let old = Document::from_text("a\nb\nc\nd\ne\nf\ng");
        let new = Document::from_text("a\nb\nc\nX\ne\nf\ng");

        let delta = unified_text(&old, &new, 1, "old", "new");
        assert!(delta.contains(" c"));
        assert!(!delta.contains(" b"));
    }
}
