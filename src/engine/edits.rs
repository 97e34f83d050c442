//! Span-based source edits.
//!
//! The coordinator records one replacement per extracted root and applies
//! them all at the end, so a file is rewritten only after its whole
//! traversal succeeds.

use crate::syntax::TextRange;

#[derive(Debug, Clone)]
pub struct SourceEdit {
    pub range: TextRange,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct EditSet {
    edits: Vec<SourceEdit>,
}

impl EditSet {
    pub fn push(&mut self, range: TextRange, text: String) {
        self.edits.push(SourceEdit { range, text });
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Whether a recorded edit already covers this range. Descendants of an
    /// extracted root hit this instead of a visited-set: once the root's
    /// replacement is recorded, every leaf under it is inside the range.
    pub fn covers(&self, range: TextRange) -> bool {
        self.edits.iter().any(|e| e.range.contains(range))
    }

    /// Whether any recorded edit overlaps this range. Overlapping edits
    /// cannot be applied: the later replacement would splice with offsets
    /// the earlier one already shifted.
    pub fn intersects(&self, range: TextRange) -> bool {
        self.edits
            .iter()
            .any(|e| e.range.start < range.end && range.start < e.range.end)
    }

    /// Apply all edits to `source`. Edits are applied back-to-front so
    /// earlier offsets stay valid.
    pub fn apply(&self, source: &str) -> String {
        let mut sorted: Vec<&SourceEdit> = self.edits.iter().collect();
        sorted.sort_by(|a, b| b.range.start.cmp(&a.range.start));

        let mut result = source.to_string();
        for edit in sorted {
            result.replace_range(edit.range.start..edit.range.end, &edit.text);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_multiple_edits() {
        let mut edits = EditSet::default();
        edits.push(TextRange::new(0, 3), "x".to_string());
        edits.push(TextRange::new(8, 11), "y".to_string());
        assert_eq!(edits.apply("abc defg123"), "x defgy");
    }

    #[test]
    fn test_intersects() {
        let mut edits = EditSet::default();
        edits.push(TextRange::new(4, 20), "t('k1')".to_string());
        assert!(edits.intersects(TextRange::new(0, 5)));
        assert!(edits.intersects(TextRange::new(19, 30)));
        assert!(edits.intersects(TextRange::new(6, 10)));
        assert!(edits.intersects(TextRange::new(0, 40)));
        assert!(!edits.intersects(TextRange::new(0, 4)));
        assert!(!edits.intersects(TextRange::new(20, 25)));
    }

    #[test]
    fn test_covers() {
        let mut edits = EditSet::default();
        edits.push(TextRange::new(4, 20), "t('k1')".to_string());
        assert!(edits.covers(TextRange::new(6, 10)));
        assert!(edits.covers(TextRange::new(4, 20)));
        assert!(!edits.covers(TextRange::new(0, 3)));
        assert!(!edits.covers(TextRange::new(10, 25)));
    }
}
