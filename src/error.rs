//! Configuration errors.
//!
//! Board parameters are fixed before any diagram is built, so these are only
//! ever returned from constructors. A branch that cannot be completed is not an
//! error; it is reported as [`crate::Step::Reject`].

use thiserror::Error;

/// The board parameters do not describe a valid puzzle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The board has no rows.
    #[error("Board side length must be at least 1")]
    EmptyBoard,
    /// The board has more columns than a row bitmap can hold.
    #[error("Board side length {side_length} exceeds the maximum of {max}")]
    BoardTooWide {
        /// The requested side length.
        side_length: usize,
        /// The widest supported board.
        max: usize,
    },
    /// The restricted first column is not on the board.
    #[error("First column {first_column} is outside a board of side length {side_length}")]
    FirstColumnOutOfRange {
        /// The requested first column.
        first_column: usize,
        /// The side length of the board.
        side_length: usize,
    },
    /// The colored variant has no restricted first column.
    #[error("The colored variant does not support a restricted first column")]
    ColoredFirstColumn,
    /// The piece name is not recognized.
    #[error("Unknown piece [{0}], expected `queen` or `rook`")]
    UnknownPiece(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        assert_eq!(
            ConfigError::BoardTooWide {
                side_length: 40,
                max: 32
            }
            .to_string(),
            "Board side length 40 exceeds the maximum of 32"
        );
        assert_eq!(
            ConfigError::FirstColumnOutOfRange {
                first_column: 9,
                side_length: 8
            }
            .to_string(),
            "First column 9 is outside a board of side length 8"
        );
        assert_eq!(
            ConfigError::UnknownPiece("bishop".into()).to_string(),
            "Unknown piece [bishop], expected `queen` or `rook`"
        );
    }
}
