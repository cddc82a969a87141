//! Line-oriented view over text.
//!
//! Each line is stored once with a precomputed stable hash, so the engine's
//! inner comparison loop is an integer compare in the common case.

use std::fmt;

use compact_str::CompactString;

use super::SequenceView;
use crate::hash::hash_str;

/// Tabs are expanded to this many spaces before hashing.
const TAB_WIDTH: usize = 4;

/// One line of text with its content hash.
#[derive(Debug, Clone, Eq)]
pub struct TextLine {
    text: CompactString,
    hash: u64,
}

impl TextLine {
    /// Create a line, expanding tabs.
    pub fn new(line: &str) -> Self {
        let text = if line.contains('\t') {
            CompactString::from(line.replace('\t', &" ".repeat(TAB_WIDTH)))
        } else {
            CompactString::from(line)
        };
        let hash = hash_str(&text);
        Self { text, hash }
    }

    /// Line content after tab expansion
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Stable content hash
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for TextLine {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.text == other.text
    }
}

impl fmt::Display for TextLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A text split into lines.
///
/// Line terminators (`\n` or `\r\n`) are not part of the lines. A trailing
/// terminator does not produce an empty last line.
#[derive(Debug, Clone, Default)]
pub struct TextLines {
    lines: Vec<TextLine>,
}

impl TextLines {
    /// Split `text` into lines.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(TextLine::new).collect(),
        }
    }

    /// Build from already split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines.into_iter().map(|l| TextLine::new(l.as_ref())).collect(),
        }
    }

    /// Line at `index`
    pub fn get(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }

    /// Iterate over the lines
    pub fn iter(&self) -> std::slice::Iter<'_, TextLine> {
        self.lines.iter()
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl SequenceView for TextLines {
    type Item = TextLine;

    #[inline]
    fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    fn element_at(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }
}

impl<'a> IntoIterator for &'a TextLines {
    type Item = &'a TextLine;
    type IntoIter = std::slice::Iter<'a, TextLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let text = TextLines::new("a\r\nb\nc\n");
        assert_eq!(text.len(), 3);
        assert_eq!(text.get(0).map(TextLine::as_str), Some("a"));
        assert_eq!(text.get(1).map(TextLine::as_str), Some("b"));
        assert_eq!(text.get(2).map(TextLine::as_str), Some("c"));
        assert!(text.get(3).is_none());
    }

    #[test]
    fn test_empty_text() {
        assert!(TextLines::new("").is_empty());
    }

    #[test]
    fn test_tab_expansion() {
        let line = TextLine::new("\tx");
        assert_eq!(line.as_str(), "    x");
        assert_eq!(line, TextLine::new("    x"));
    }

    #[test]
    fn test_line_equality() {
        assert_eq!(TextLine::new("select 1"), TextLine::new("select 1"));
        assert_ne!(TextLine::new("select 1"), TextLine::new("select 2"));
        assert_eq!(TextLine::new("x").hash(), TextLine::new("x").hash());
    }

    #[test]
    fn test_from_lines() {
        let text = TextLines::from_lines(["one", "two"]);
        let collected: Vec<String> = text.iter().map(ToString::to_string).collect();
        assert_eq!(collected, vec!["one", "two"]);
    }
}
