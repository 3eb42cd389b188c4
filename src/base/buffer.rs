//! Source buffers and line/column lookup.

use smol_str::SmolStr;
use text_size::TextSize;

/// Byte offsets of line starts, for offset to line/column conversion.
///
/// - Build: O(N) over the text
/// - Lookup: O(log L) binary search over L lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Index 0 is always 0. Index N is the offset just past the Nth `\n`.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| TextSize::from(i as u32 + 1)),
        );
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 0-indexed line containing `offset`.
    pub fn line_of(&self, offset: TextSize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Start offset of a 0-indexed line, if the text has that many lines.
    pub fn line_start(&self, line: usize) -> Option<TextSize> {
        self.line_starts.get(line).copied()
    }

    /// 0-indexed line and byte column of `offset`.
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        let line = self.line_of(offset);
        let col = offset - self.line_starts[line];
        (line as u32, col.into())
    }
}

/// The text of one file, with its name and line index.
///
/// Buffers are immutable once created. A resolver shares them between all
/// inclusions of the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    name: SmolStr,
    text: String,
    lines: LineIndex,
}

impl SourceBuffer {
    pub fn new(name: impl Into<SmolStr>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::new(&text);
        Self {
            name: name.into(),
            text,
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Byte length of the text.
    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Bytes from `pos` to the end of the buffer. Empty at the end position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end.
    pub fn data_from(&self, pos: TextSize) -> &[u8] {
        &self.bytes()[usize::from(pos)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_lookup() {
        let index = LineIndex::new("abc\ndef\nghi");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(TextSize::from(0)), (0, 0));
        assert_eq!(index.line_col(TextSize::from(3)), (0, 3));
        assert_eq!(index.line_col(TextSize::from(4)), (1, 0));
        assert_eq!(index.line_col(TextSize::from(10)), (2, 2));
    }

    #[test]
    fn test_trailing_newline_opens_a_line() {
        let index = LineIndex::new("a\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_col(TextSize::from(2)), (1, 0));
        assert_eq!(index.line_start(1), Some(TextSize::from(2)));
        assert_eq!(index.line_start(2), None);
    }

    #[test]
    fn test_buffer_data() {
        let buffer = SourceBuffer::new("a.c", "int x;\n");
        assert_eq!(buffer.name(), "a.c");
        assert_eq!(buffer.len(), TextSize::from(7));
        assert_eq!(buffer.data_from(TextSize::from(4)), b"x;\n");
        assert!(buffer.data_from(buffer.len()).is_empty());
    }
}
