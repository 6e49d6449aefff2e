//! Position and location utilities.
//!
//! Diagnostics and the LSP-shaped query layer speak in line/column; the
//! lexer, parser, and IR speak in byte offsets ([`crate::span::Span`]).
//! `LineMap` converts between the two.

use serde::{Deserialize, Serialize};

/// A 1-indexed line/column position, matching the `file:line:col:` format
/// diagnostics are rendered in (spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// `SourceLocation { line, column, length? }`, carried by every error
/// variant in the taxonomy (spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub length: Option<u32>,
}

impl SourceLocation {
    #[must_use]
    pub fn new(line: u32, column: u32, length: Option<u32>) -> Self {
        Self { line, column, length }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self { line: 1, column: 1, length: None }
    }
}

/// Line map for efficient byte-offset <-> line/column conversion.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset at which each line starts; `line_starts[0]` is always 0.
    line_starts: Vec<u32>,
}

impl LineMap {
    #[must_use]
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-indexed `Position`.
    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = offset.saturating_sub(line_start);
        Position::new(u32::try_from(line).unwrap_or(u32::MAX) + 1, column + 1)
    }

    #[must_use]
    pub fn offset_to_location(&self, offset: u32, length: u32) -> SourceLocation {
        let pos = self.offset_to_position(offset);
        SourceLocation::new(pos.line, pos.column, Some(length))
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Return the full text of a 1-indexed line, without its trailing
    /// newline, for caret-anchored snippet rendering.
    #[must_use]
    pub fn line_text<'a>(&self, line: u32, source: &'a str) -> &'a str {
        let idx = (line.saturating_sub(1)) as usize;
        let Some(&start) = self.line_starts.get(idx) else {
            return "";
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or_else(|| u32::try_from(source.len()).unwrap_or(u32::MAX));
        source
            .get(start as usize..end as usize)
            .unwrap_or("")
            .trim_end_matches(['\n', '\r'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_offsets() {
        let map = LineMap::build("const X = 1");
        assert_eq!(map.offset_to_position(0), Position::new(1, 1));
        assert_eq!(map.offset_to_position(6), Position::new(1, 7));
    }

    #[test]
    fn multi_line_offsets() {
        let src = "const A = 1\nconst B = 2\n";
        let map = LineMap::build(src);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(12), Position::new(2, 1));
        assert_eq!(map.line_text(2, src), "const B = 2");
    }
}
