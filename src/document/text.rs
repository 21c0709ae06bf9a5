//! Text utilities for resolving host ranges against document content.
//!
//! Host positions use line/column where column counts UTF-16 code units;
//! replacements need byte offsets into the UTF-8 text. This index
//! pre-computes line starts for O(log n) line lookup.

use crate::convert::{HostPosition, HostRange};

/// Pre-computed line index over one revision of a document's text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    /// Source text (needed for UTF-16 column calculation).
    source: String,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            line_starts,
            source,
        }
    }

    /// The indexed text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Convert a byte offset to a host position.
    pub fn offset_to_position(&self, offset: usize) -> HostPosition {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.source.len());

        let mut col = 0u32;
        for (i, c) in self.source[line_start..line_end].char_indices() {
            if line_start + i >= offset {
                break;
            }
            col += c.len_utf16() as u32;
        }

        HostPosition::new(line as u32, col)
    }

    /// Convert a host position to a byte offset.
    ///
    /// Columns past the end of a line clamp to the line end; lines past the
    /// end of the document are out of bounds.
    pub fn position_to_offset(&self, position: HostPosition) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.line_starts.len() {
            return None;
        }

        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|&end| end.saturating_sub(1)) // Exclude newline
            .unwrap_or(self.source.len());

        // Walk UTF-16 code units to find the byte offset.
        let mut utf16_col = 0u32;
        for (i, c) in self.source[line_start..line_end].char_indices() {
            if utf16_col >= position.character {
                return Some(line_start + i);
            }
            utf16_col += c.len_utf16() as u32;
        }

        Some(line_end.min(self.source.len()))
    }

    /// Resolve a host range to a byte span.
    ///
    /// `None` when either endpoint is out of bounds or the endpoints are
    /// reversed.
    pub fn span_for(&self, range: &HostRange) -> Option<std::ops::Range<usize>> {
        let start = self.position_to_offset(range.start)?;
        let end = self.position_to_offset(range.end)?;
        if start > end {
            return None;
        }
        Some(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, character: u32) -> HostPosition {
        HostPosition::new(line, character)
    }

    #[test]
    fn single_line() {
        let idx = LineIndex::new("color: #fff;".to_string());
        assert_eq!(idx.position_to_offset(pos(0, 0)), Some(0));
        assert_eq!(idx.position_to_offset(pos(0, 7)), Some(7));
        assert_eq!(idx.position_to_offset(pos(0, 11)), Some(11));
    }

    #[test]
    fn multi_line() {
        let idx = LineIndex::new(".a {\n  color: red;\n}\n".to_string());
        assert_eq!(idx.position_to_offset(pos(0, 0)), Some(0));
        assert_eq!(idx.position_to_offset(pos(1, 2)), Some(7));
        assert_eq!(idx.position_to_offset(pos(2, 0)), Some(19));
    }

    #[test]
    fn offset_to_position_round_trip() {
        let idx = LineIndex::new(".a {\n  color: red;\n}".to_string());
        for offset in [0, 3, 5, 7, 18, 19] {
            let position = idx.offset_to_position(offset);
            assert_eq!(idx.position_to_offset(position), Some(offset));
        }
    }

    #[test]
    fn utf16_columns() {
        // '😀' is 4 bytes in UTF-8 but 2 code units in UTF-16.
        let idx = LineIndex::new("/* 😀 */ #fff".to_string());
        // '#' sits after "/* " (3 bytes), the emoji (4), " */ " (4).
        assert_eq!(idx.position_to_offset(pos(0, 9)), Some(11));
        assert_eq!(idx.offset_to_position(11), pos(0, 9));
    }

    #[test]
    fn column_past_line_end_clamps() {
        let idx = LineIndex::new("ab\ncd".to_string());
        assert_eq!(idx.position_to_offset(pos(0, 99)), Some(2));
        assert_eq!(idx.position_to_offset(pos(1, 99)), Some(5));
    }

    #[test]
    fn line_past_document_end_is_out_of_bounds() {
        let idx = LineIndex::new("ab".to_string());
        assert_eq!(idx.position_to_offset(pos(1, 0)), None);
    }

    #[test]
    fn span_resolution() {
        let idx = LineIndex::new("color: #fff;".to_string());
        let span = idx.span_for(&HostRange::new(pos(0, 7), pos(0, 11)));
        assert_eq!(span, Some(7..11));
        assert_eq!(&idx.source()[7..11], "#fff");
    }

    #[test]
    fn reversed_range_has_no_span() {
        let idx = LineIndex::new("color: #fff;".to_string());
        assert_eq!(idx.span_for(&HostRange::new(pos(0, 11), pos(0, 7))), None);
    }

    #[test]
    fn out_of_bounds_range_has_no_span() {
        let idx = LineIndex::new("color: #fff;".to_string());
        assert_eq!(idx.span_for(&HostRange::new(pos(0, 0), pos(3, 0))), None);
    }
}
