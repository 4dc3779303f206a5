//! Line/column to byte-offset mapping for highlight ranges.
use elmscope_core::Span;

use crate::report::{Position, Region};

/// Byte offsets of line starts in one source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, starts }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Text of a 0-based line without its terminator.
    fn line(&self, line: usize) -> &'a str {
        let start = self.starts[line];
        let end = self.starts.get(line + 1).map_or(self.text.len(), |next| next - 1);
        self.text[start..end].trim_end_matches('\r')
    }

    /// Byte offset of a 1-based position; columns count characters and are
    /// clamped to the line.
    pub fn offset(&self, position: Position) -> usize {
        let line = position.line.saturating_sub(1).min(self.line_count() - 1);
        let text = self.line(line);
        let column = position.column.saturating_sub(1);
        let within = text
            .char_indices()
            .nth(column)
            .map_or(text.len(), |(i, _)| i);
        self.starts[line] + within
    }

    /// Byte offset of the end of a 1-based line.
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.saturating_sub(1).min(self.line_count() - 1);
        self.starts[line] + self.line(line).len()
    }

    /// Byte range to highlight for `region`. A region spanning several lines
    /// is cut at the end of its first line.
    pub fn highlight(&self, region: Region) -> Span {
        let start = self.offset(region.start);
        let end = if region.is_multi_line() {
            self.line_end(region.start.line)
        } else {
            self.offset(region.end)
        };
        Span::new(start, end.max(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    #[test]
    fn test_offsets() {
        let index = LineIndex::new("module Main\r\nmain =\n  text \"é\"\n");
        assert_eq!(index.offset(pos(1, 1)), 0);
        assert_eq!(index.offset(pos(2, 1)), 13);
        assert_eq!(index.offset(pos(3, 3)), 22);
        assert_eq!(index.line_end(1), 11);
        // past the end of a line clamps to its end
        assert_eq!(index.offset(pos(2, 40)), 19);
    }

    #[test]
    fn test_multi_line_region_is_truncated() {
        let text = "foo =\n  bar\n    baz\n";
        let index = LineIndex::new(text);
        let single = Region { start: pos(2, 3), end: pos(2, 6) };
        assert_eq!(index.highlight(single), Span::new(8, 11));

        let multi = Region { start: pos(2, 3), end: pos(3, 8) };
        assert_eq!(index.highlight(multi), Span::new(8, 11));
        assert_eq!(&text[8..11], "bar");
    }
}
