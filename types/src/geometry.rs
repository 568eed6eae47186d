//! Positions, ranges, and locations in the LSP coordinate model.
//!
//! All coordinates are 0-indexed, matching the wire protocol. Display
//! helpers convert to 1-indexed on the way out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 0-indexed line/character position in a document.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    /// 1-indexed `line:col` for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A half-open span between two positions, `start` inclusive, `end`
/// exclusive, as the wire protocol defines it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width range at a single position.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of lines the range spans, inclusive of both endpoints.
    #[must_use]
    pub fn line_span(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}

/// A range inside a named document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

impl Location {
    #[must_use]
    pub fn new(uri: impl Into<String>, range: Range) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(9, 4).to_string(), "10:5");
    }

    #[test]
    fn test_range_at_is_empty() {
        let range = Range::at(Position::new(3, 7));
        assert!(range.is_empty());
        assert_eq!(range.line_span(), 1);
    }

    #[test]
    fn test_range_line_span_inclusive() {
        let range = Range::new(Position::new(10, 0), Position::new(14, 1));
        assert!(!range.is_empty());
        assert_eq!(range.line_span(), 5);
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }
}
