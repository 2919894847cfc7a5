//! Text spans, ranges and line maps for locating nodes in source text.
//!
//! All positions are byte offsets into the UTF-8 source. Columns reported by
//! [`LineMap`] count characters, which is what editors show to users.

use std::fmt;
use std::ops::Range;

/// A byte offset into source text.
pub type TextPos = u32;

/// A start offset plus a length, used by diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// The exclusive end offset.
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.start, self.length)
    }
}

/// A `pos..end` pair of byte offsets covering one node or token.
///
/// Nodes generated by a transform carry [`TextRange::SYNTHESIZED`], which
/// never overlaps real source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    pub pos: TextPos,
    pub end: TextPos,
}

impl TextRange {
    pub const SYNTHESIZED: TextRange = TextRange {
        pos: TextPos::MAX,
        end: TextPos::MAX,
    };

    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Whether this range points into real source text.
    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.pos == TextPos::MAX
    }

    /// Whether `other` lies entirely within this range.
    #[inline]
    pub fn covers(&self, other: &TextRange) -> bool {
        self.pos <= other.pos && other.end <= self.end
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }

    /// The source text this range covers, or `None` for synthesized ranges
    /// and ranges outside `text`.
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        if self.is_synthesized() {
            return None;
        }
        text.get(self.to_range())
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthesized() {
            f.write_str("<synthesized>")
        } else {
            write!(f, "{}..{}", self.pos, self.end)
        }
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

/// A 0-based line and a 0-based character column.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

/// Maps byte offsets to lines and columns.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| (i + 1) as TextPos));
        Self { line_starts }
    }

    /// The 0-based line containing `pos`.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Line and character column of `pos` within `text`.
    ///
    /// `text` must be the text this map was built from.
    pub fn line_and_column_of(&self, text: &str, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize] as usize;
        let end = (pos as usize).min(text.len());
        let character = text
            .get(line_start..end)
            .map_or(end.saturating_sub(line_start), |prefix| prefix.chars().count()) as u32;
        LineAndColumn { line, character }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_map_lines() {
        let map = LineMap::new("a\nbc\n\nd");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(1), 0);
        assert_eq!(map.line_of(2), 1);
        assert_eq!(map.line_of(5), 2);
        assert_eq!(map.line_of(6), 3);
    }

    #[test]
    fn test_line_map_counts_characters() {
        let text = "const é = nameof(x);";
        let map = LineMap::new(text);
        let pos = text.find("nameof").unwrap() as TextPos;
        let lc = map.line_and_column_of(text, pos);
        assert_eq!(lc, LineAndColumn { line: 0, character: 10 });
    }

    #[test]
    fn test_synthesized_range_has_no_text() {
        assert_eq!(TextRange::SYNTHESIZED.slice("abc"), None);
        assert_eq!(TextRange::new(1, 3).slice("abcd"), Some("bc"));
        assert!(TextRange::new(0, 10).covers(&TextRange::new(2, 4)));
        assert!(!TextRange::new(3, 10).covers(&TextRange::new(2, 4)));
    }
}
