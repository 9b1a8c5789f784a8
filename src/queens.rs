//! The [`n` queens puzzle](https://en.wikipedia.org/wiki/Eight_queens_puzzle)
//! is the problem of placing `n` chess queens on an `n`×`n` chessboard so that
//! no two queens threaten each other. Dropping the diagonal constraints gives
//! the `n` rooks puzzle, whose solutions are the `n`×`n` permutation matrices.
//!
//! Levels run from `n²` down to `1`; level `l` is the cell at row
//! `(l - 1) / n` and column `(l - 1) % n`, so rows are decided from the top
//! (row `n - 1`) down and each row from its highest column down.

use crate::{
    bitmap::{full_mask, Bitmap, MAX_SIDE_LENGTH},
    conflict::{Lane, Piece, Queen, Rook},
    error::ConfigError,
    transition::{self, Cell, Layout},
    Branch, DdSpec, Step,
};
use std::{fmt, marker::PhantomData};

/// Decision diagram specification of the `n` queens puzzle, or of the `n`
/// rooks puzzle when `P` is [`Rook`].
pub struct NQueenDd<P: Piece = Queen> {
    side_length: usize,
    top_level: usize,
    first_column: Option<usize>,
    piece: PhantomData<P>,
}

/// The `n` queens puzzle.
pub type NQueensDd = NQueenDd<Queen>;

/// The `n` rooks puzzle.
pub type NRooksDd = NQueenDd<Rook>;

impl<P: Piece> NQueenDd<P> {
    /// Create a specification for a board of the given side length.
    pub fn new(side_length: usize) -> Result<Self, ConfigError> {
        check_side_length(side_length)?;

        let spec = Self {
            side_length,
            top_level: side_length * side_length,
            first_column: None,
            piece: PhantomData,
        };
        log::debug!("Created [{}] specification [{:?}].", P::NAME, spec);
        Ok(spec)
    }

    /// Create a specification whose paths all place a piece on the top row at
    /// `first_column`, counted from the right-hand edge of the board.
    ///
    /// The diagram starts directly at that cell, so the cells to its right are
    /// never mentioned, and it rejects leaving it empty. Summing the solutions
    /// over every `first_column` gives the solutions of the unrestricted
    /// puzzle.
    pub fn with_first_column(
        side_length: usize,
        first_column: usize,
    ) -> Result<Self, ConfigError> {
        check_side_length(side_length)?;
        if first_column >= side_length {
            return Err(ConfigError::FirstColumnOutOfRange {
                first_column,
                side_length,
            });
        }

        let spec = Self {
            side_length,
            top_level: side_length * side_length - first_column,
            first_column: Some(first_column),
            piece: PhantomData,
        };
        log::debug!("Created [{}] specification [{:?}].", P::NAME, spec);
        Ok(spec)
    }

    /// Return the length of the board side.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Return the level the diagram starts at.
    pub fn top_level(&self) -> usize {
        self.top_level
    }

    /// Return the restricted first column, if any.
    pub fn first_column(&self) -> Option<usize> {
        self.first_column
    }

    /// Return the board position decided at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is zero.
    pub fn placement(&self, level: usize) -> Placement {
        let index = level - 1;
        Placement {
            row: index / self.side_length,
            column: index % self.side_length,
        }
    }

    /// Convert the taken levels of a solution into sorted board positions.
    pub fn placements(&self, levels: &[usize]) -> Vec<Placement> {
        let mut placements: Vec<_> = levels.iter().map(|&level| self.placement(level)).collect();
        placements.sort();
        placements
    }
}

pub(crate) fn check_side_length(side_length: usize) -> Result<(), ConfigError> {
    if side_length == 0 {
        Err(ConfigError::EmptyBoard)
    } else if side_length > MAX_SIDE_LENGTH {
        Err(ConfigError::BoardTooWide {
            side_length,
            max: MAX_SIDE_LENGTH,
        })
    } else {
        Ok(())
    }
}

impl<P: Piece> Layout for NQueenDd<P> {
    fn side_length(&self) -> usize {
        self.side_length
    }

    #[inline]
    fn locate(&self, level: usize) -> Cell {
        let Placement { row, column } = self.placement(level);
        Cell {
            slot: row,
            lane: Lane::ROWS,
            row,
            column,
        }
    }
}

impl<P: Piece> DdSpec for NQueenDd<P> {
    fn array_size(&self) -> usize {
        self.side_length
    }

    fn root(&self, state: &mut [Bitmap]) -> Step {
        debug_assert_eq!(state.len(), self.side_length);

        state.fill(full_mask(self.side_length));
        Step::Level(self.top_level)
    }

    fn child(&self, state: &mut [Bitmap], level: usize, branch: Branch) -> Step {
        let cell = self.locate(level);

        let resume = match branch {
            Branch::Take => {
                if !transition::place::<P>(state, cell, self.side_length) {
                    return Step::Reject;
                }
                if cell.row == 0 {
                    return Step::Accept;
                }

                // The row is settled; resume from the top of the row below.
                state[cell.slot] = 0;
                cell.row * self.side_length + 1
            }
            Branch::Skip => {
                if self.first_column.is_some() && level == self.top_level {
                    return Step::Reject;
                }
                if !transition::rule_out(state, cell) {
                    return Step::Reject;
                }
                debug_assert!(cell.column >= 1);

                level
            }
        };

        transition::scan::<P, _>(self, state, resume)
    }
}

impl<P: Piece> fmt::Debug for NQueenDd<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NQueenDd")
            .field("piece", &P::NAME)
            .field("side_length", &self.side_length)
            .field("top_level", &self.top_level)
            .field("first_column", &self.first_column)
            .finish()
    }
}

impl<P: Piece> Clone for NQueenDd<P> {
    fn clone(&self) -> Self {
        Self {
            side_length: self.side_length,
            top_level: self.top_level,
            first_column: self.first_column,
            piece: PhantomData,
        }
    }
}

/// A position on the chess board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// The row index, ranging from 0 to `n - 1`.
    pub row: usize,
    /// The column index, ranging from 0 to `n - 1`.
    pub column: usize,
}

impl Placement {
    /// Return the leading diagonal index for a given side length.
    ///
    /// This value ranges from 0 to `2n - 2`.
    pub fn leading_diagonal(self, side_length: usize) -> usize {
        self.column + (side_length - 1) - self.row
    }

    /// Return the trailing diagonal index.
    ///
    /// The value ranges from 0 to `2n - 2`.
    pub fn trailing_diagonal(self) -> usize {
        self.row + self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::bit;

    fn p(row: usize, column: usize) -> Placement {
        Placement { row, column }
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(NQueensDd::new(0).unwrap_err(), ConfigError::EmptyBoard);
        assert_eq!(
            NQueensDd::new(33).unwrap_err(),
            ConfigError::BoardTooWide {
                side_length: 33,
                max: 32
            }
        );
        assert_eq!(
            NRooksDd::with_first_column(4, 4).unwrap_err(),
            ConfigError::FirstColumnOutOfRange {
                first_column: 4,
                side_length: 4
            }
        );
        assert!(NQueensDd::new(32).is_ok());
    }

    #[test]
    fn root_opens_every_column() {
        let spec = NQueensDd::new(5).unwrap();
        let mut state = vec![0; spec.array_size()];

        assert_eq!(spec.root(&mut state), Step::Level(25));
        assert_eq!(state, vec![0b11111; 5]);

        let restricted = NQueensDd::with_first_column(5, 2).unwrap();
        assert_eq!(restricted.root(&mut state), Step::Level(23));
        assert_eq!(restricted.placement(23), p(4, 2));
    }

    #[test]
    fn level_decomposition() {
        let spec = NQueensDd::new(4).unwrap();
        assert_eq!(spec.placement(16), p(3, 3));
        assert_eq!(spec.placement(13), p(3, 0));
        assert_eq!(spec.placement(12), p(2, 3));
        assert_eq!(spec.placement(1), p(0, 0));
    }

    #[test]
    fn take_strikes_rows_above_and_jumps_to_next_row() {
        let spec = NQueensDd::new(4).unwrap();
        let mut state = vec![0; 4];
        spec.root(&mut state);

        // Queen on (3, 3): row 2 keeps columns 0 and 1, but a queen on (2, 1)
        // would empty row 1, so the next choice is (2, 0) at level 9.
        let step = spec.child(&mut state, 16, Branch::Take);
        assert_eq!(step, Step::Level(9));
        assert_eq!(state, vec![0b0110, 0b0101, 0b0001, 0]);
    }

    #[test]
    fn take_on_bottom_row_accepts() {
        let spec = NRooksDd::new(2).unwrap();
        let mut state = vec![0; 2];
        spec.root(&mut state);

        assert_eq!(spec.child(&mut state, 4, Branch::Take), Step::Level(1));
        assert_eq!(spec.child(&mut state, 1, Branch::Take), Step::Accept);
    }

    #[test]
    fn skip_on_last_open_column_rejects() {
        let spec = NQueensDd::new(1).unwrap();
        let mut state = vec![0; 1];
        assert_eq!(spec.root(&mut state), Step::Level(1));

        let mut skipped = state.clone();
        assert_eq!(spec.child(&mut skipped, 1, Branch::Skip), Step::Reject);
        assert_eq!(spec.child(&mut state, 1, Branch::Take), Step::Accept);
    }

    #[test]
    fn restricted_top_cell_cannot_be_skipped() {
        let spec = NRooksDd::with_first_column(3, 1).unwrap();
        let mut state = vec![0; 3];
        let Step::Level(top) = spec.root(&mut state) else {
            panic!("root must be a level");
        };

        assert_eq!(spec.child(&mut state.clone(), top, Branch::Skip), Step::Reject);
        assert_ne!(spec.child(&mut state, top, Branch::Take), Step::Reject);
    }

    #[test]
    fn skip_ahead_rules_out_dead_cells() {
        let spec = NQueensDd::new(4).unwrap();
        let mut state = vec![0; 4];
        spec.root(&mut state);

        // Skipping (3, 3) lands on (3, 2): every top-row cell is still viable.
        assert_eq!(spec.child(&mut state, 16, Branch::Skip), Step::Level(15));
        assert_eq!(state[3], 0b0111);

        // A queen on (3, 2) leaves row 2 only column 0, so the scan passes
        // (2, 3) .. (2, 1) and stops at (2, 0).
        assert_eq!(spec.child(&mut state, 15, Branch::Take), Step::Level(9));
        assert_eq!(state[2], 0b0001);
    }

    #[test]
    fn small_boards_match_known_solutions() {
        let spec = NQueensDd::new(4).unwrap();
        let mut solutions: Vec<_> = spec
            .solver()
            .map(|levels| spec.placements(&levels))
            .collect();
        solutions.sort();

        assert_eq!(
            solutions,
            vec![
                vec![p(0, 1), p(1, 3), p(2, 0), p(3, 2)],
                vec![p(0, 2), p(1, 0), p(2, 3), p(3, 1)],
            ]
        );
    }

    #[test]
    #[cfg_attr(miri, ignore)] // takes too long on miri
    fn count_medium_board() {
        assert_eq!(NQueensDd::new(8).unwrap().solver().count(), 92);
    }

    #[test]
    fn check_diagonal_indices() {
        let side_length = 8;
        let leading: Vec<_> = (0..side_length)
            .rev()
            .map(|row| p(row, 0))
            .chain((1..side_length).map(|column| p(0, column)))
            .map(|poss| poss.leading_diagonal(side_length))
            .collect();
        assert_eq!(leading, (0..15).collect::<Vec<_>>());

        let trailing: Vec<_> = (0..side_length)
            .map(|column| p(0, column))
            .chain((1..side_length).map(|row| p(row, side_length - 1)))
            .map(|poss| poss.trailing_diagonal())
            .collect();
        assert_eq!(trailing, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn top_bit_of_widest_board() {
        let spec = NRooksDd::new(32).unwrap();
        let mut state = vec![0; 32];
        spec.root(&mut state);

        assert_eq!(state[31], Bitmap::MAX);
        assert_eq!(spec.child(&mut state, 32 * 32, Branch::Take), Step::Level(31 * 32 - 1));
        assert_eq!(state[30] & bit(31), 0);
    }
}
