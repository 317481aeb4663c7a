//! Unit tests for Position and SourceSpan

use core_types::{Position, SourceSpan};

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(10, 5);

        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
    }

    #[test]
    fn test_position_is_copy() {
        let pos1 = Position::new(42, 7);
        let pos2 = pos1;

        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_position_orders_by_line_then_column() {
        let mut positions = vec![
            Position::new(2, 0),
            Position::new(1, 12),
            Position::new(1, 3),
        ];
        positions.sort();

        assert_eq!(
            positions,
            vec![Position::new(1, 3), Position::new(1, 12), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_position_serializes_as_line_and_column() {
        let json = serde_json::to_value(Position::new(3, 9)).unwrap();

        assert_eq!(json, serde_json::json!({ "line": 3, "column": 9 }));
    }
}

#[cfg(test)]
mod source_span_tests {
    use super::*;

    #[test]
    fn test_span_contains_itself() {
        let span = SourceSpan::new(Position::new(1, 0), Position::new(1, 10));

        assert!(span.contains(&span));
    }

    #[test]
    fn test_span_does_not_contain_overlapping_span() {
        let a = SourceSpan::new(Position::new(1, 0), Position::new(1, 10));
        let b = SourceSpan::new(Position::new(1, 5), Position::new(2, 0));

        assert!(!a.contains(&b));
        assert!(!b.contains(&a));
    }

    #[test]
    fn test_span_serializes_in_loc_shape() {
        let span = SourceSpan::new(Position::new(1, 0), Position::new(1, 3));
        let json = serde_json::to_value(span).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "start": { "line": 1, "column": 0 },
                "end": { "line": 1, "column": 3 }
            })
        );
    }
}
