use std::ops::Range;

/// An ordered, line-indexed view over text content.
///
/// A `Document` is the unit stored and retrieved by name through the
/// document store gateway. Lines are addressed by zero-based index, ranges
/// are half-open. Equality is line-vector equality: two documents are the
/// same exactly when they hold the same lines in the same order.
///
/// Text round-trips with `str::lines` semantics: a trailing newline does not
/// produce a final empty line, and `\r\n` terminators are stripped to their
/// content. Rendering joins with `\n` and emits no trailing newline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from an existing line vector.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split text into lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// The full line slice.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// A single line by zero-based index, or `None` past the end.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// The lines covered by a half-open range, or `None` if the range does
    /// not lie within the document.
    pub fn slice(&self, range: Range<usize>) -> Option<&[String]> {
        self.lines.get(range)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the document back to text, joining lines with `\n`.
    ///
    /// No trailing newline is emitted, so a document of one empty line and
    /// an empty document both render as `""`.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the lines in `range` with `replacement`.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or reaches past the end of the
    /// document, like [`Vec::splice`]. Callers validate ranges against live
    /// document lengths first (see `ChangeDescriptor::validate_against`).
    pub fn splice(&mut self, range: Range<usize>, replacement: Vec<String>) {
        self.lines.splice(range, replacement);
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl FromIterator<String> for Document {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn from_text_splits_lines() {
        let d = Document::from_text("alpha\nbeta\ngamma");
        assert_eq!(d.len(), 3);
        assert_eq!(d.line(0), Some("alpha"));
        assert_eq!(d.line(2), Some("gamma"));
        assert_eq!(d.line(3), None);
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        assert_eq!(Document::from_text("a\nb\n"), Document::from_text("a\nb"));
    }

    #[test]
    fn empty_text_is_empty_document() {
        let d = Document::from_text("");
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let d = Document::from_text("a\r\nb\r\n");
        assert_eq!(d.lines(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn interior_blank_lines_survive() {
        let d = Document::from_text("a\n\nb");
        assert_eq!(d.len(), 3);
        assert_eq!(d.line(1), Some(""));
    }

    #[test]
    fn to_text_joins_without_trailing_newline() {
        let d = doc(&["a", "b", "c"]);
        assert_eq!(d.to_text(), "a\nb\nc");
    }

    #[test]
    fn text_round_trip() {
        let text = "# Assessment\n\nService handles data at rest.\nEncryption: CMEK.";
        let d = Document::from_text(text);
        assert_eq!(d.to_text(), text);
        assert_eq!(Document::from_text(&d.to_text()), d);
    }

    #[test]
    fn slice_in_and_out_of_bounds() {
        let d = doc(&["a", "b", "c"]);
        assert_eq!(
            d.slice(1..3),
            Some(&["b".to_string(), "c".to_string()][..])
        );
        assert_eq!(d.slice(1..1), Some(&[][..]));
        assert!(d.slice(2..4).is_none());
    }

    #[test]
    fn splice_replaces_lines() {
        let mut d = doc(&["a", "b", "c", "d"]);
        d.splice(1..3, vec!["X".into(), "Y".into(), "Z".into()]);
        assert_eq!(d, doc(&["a", "X", "Y", "Z", "d"]));
    }

    #[test]
    fn splice_with_empty_range_inserts() {
        let mut d = doc(&["a", "c"]);
        d.splice(1..1, vec!["b".into()]);
        assert_eq!(d, doc(&["a", "b", "c"]));
    }

    #[test]
    fn splice_with_empty_replacement_deletes() {
        let mut d = doc(&["a", "b", "c"]);
        d.splice(0..2, vec![]);
        assert_eq!(d, doc(&["c"]));
    }

    #[test]
    fn splice_at_document_end() {
        let mut d = doc(&["a"]);
        d.splice(1..1, vec!["b".into()]);
        assert_eq!(d, doc(&["a", "b"]));
    }

    #[test]
    fn equality_is_line_equality() {
        assert_eq!(doc(&["a", "b"]), Document::from_text("a\nb\n"));
        assert_ne!(doc(&["a", "b"]), doc(&["a", "b", ""]));
    }

    #[test]
    fn from_iterator_collects_lines() {
        let d: Document = ["x", "y"].iter().map(|s| s.to_string()).collect();
        assert_eq!(d.len(), 2);
    }
}
