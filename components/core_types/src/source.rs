//! Source position and span types for syntax tree locations.
//!
//! Every token and every syntax tree node carries a [`SourceSpan`] so that
//! tools consuming the tree can map nodes back to the text they came from.

use serde::Serialize;

/// Represents a position in source code.
///
/// Lines are 1-based and columns are 0-based, counted in Unicode code points.
///
/// # Examples
///
/// ```
/// use core_types::Position;
///
/// let pos = Position::new(10, 5);
///
/// assert_eq!(pos.line, 10);
/// assert_eq!(pos.column, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line number, starting at 1
    pub line: u32,
    /// Column number, starting at 0
    pub column: u32,
}

impl Position {
    /// Creates a position from a line and a column.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

/// A half-open range of source text, from `start` up to `end`.
///
/// # Examples
///
/// ```
/// use core_types::{Position, SourceSpan};
///
/// let outer = SourceSpan::new(Position::new(1, 0), Position::new(3, 1));
/// let inner = SourceSpan::new(Position::new(2, 4), Position::new(2, 9));
///
/// assert!(outer.contains(&inner));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct SourceSpan {
    /// Position of the first character
    pub start: Position,
    /// Position just past the last character
    pub end: Position,
}

impl SourceSpan {
    /// Creates a span covering `start..end`.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: &SourceSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_default_is_first_line() {
        let pos = Position::default();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 0);
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }
}
