//! The colored variant partitions the `n`×`n` board into `n` disjoint
//! solutions, one per color: every cell receives exactly one color and the
//! cells of each color form a solution of the plain puzzle.
//!
//! With `m = n²`, level `l` decides whether the cell at row
//! `(l - 1) / m`, column `(l - 1) % m / n` takes color `(l - 1) % n`. The state
//! keeps one bitmap per (row, color) pair, at slot `row * n + color`.
//!
//! The root seeds the top row with color `c` on column `c`, which fixes the
//! labelling of the colors and removes the `n!` relabellings of every
//! partition.

use crate::{
    bitmap::{bit, full_mask, Bitmap},
    conflict::{Lane, Piece, Queen, Rook},
    error::ConfigError,
    queens::check_side_length,
    transition::{self, Cell, Layout},
    Branch, DdSpec, Step,
};
use std::{fmt, marker::PhantomData};

/// Decision diagram specification of the colored `n` queens puzzle, or of
/// the colored `n` rooks puzzle when `P` is [`Rook`].
pub struct ColoredDd<P: Piece = Queen> {
    side_length: usize,
    slots: usize,
    top_level: usize,
    piece: PhantomData<P>,
}

/// Partitions of the board into `n` queen solutions.
pub type ColoredQueensDd = ColoredDd<Queen>;

/// Partitions of the board into `n` rook solutions, i.e. Latin squares with a
/// fixed top row.
pub type ColoredRooksDd = ColoredDd<Rook>;

impl<P: Piece> ColoredDd<P> {
    /// Create a specification for a board of the given side length, using as
    /// many colors as the board has rows.
    pub fn new(side_length: usize) -> Result<Self, ConfigError> {
        check_side_length(side_length)?;

        let slots = side_length * side_length;
        let spec = Self {
            side_length,
            slots,
            top_level: slots * side_length,
            piece: PhantomData,
        };
        log::debug!("Created colored [{}] specification [{:?}].", P::NAME, spec);
        Ok(spec)
    }

    /// Return the length of the board side, which is also the number of
    /// colors.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Return the level the diagram starts at.
    pub fn top_level(&self) -> usize {
        self.top_level
    }

    /// Return the colored board position decided at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is zero.
    pub fn placement(&self, level: usize) -> ColoredPlacement {
        let index = level - 1;
        let within_row = index % self.slots;
        ColoredPlacement {
            row: index / self.slots,
            column: within_row / self.side_length,
            color: within_row % self.side_length,
        }
    }

    /// Convert the taken levels of a solution into sorted board positions.
    pub fn placements(&self, levels: &[usize]) -> Vec<ColoredPlacement> {
        let mut placements: Vec<_> = levels.iter().map(|&level| self.placement(level)).collect();
        placements.sort();
        placements
    }
}

impl<P: Piece> Layout for ColoredDd<P> {
    fn side_length(&self) -> usize {
        self.side_length
    }

    #[inline]
    fn locate(&self, level: usize) -> Cell {
        let ColoredPlacement { row, column, color } = self.placement(level);
        Cell {
            slot: row * self.side_length + color,
            lane: Lane::color(self.side_length, color),
            row,
            column,
        }
    }
}

impl<P: Piece> DdSpec for ColoredDd<P> {
    fn array_size(&self) -> usize {
        self.slots
    }

    fn root(&self, state: &mut [Bitmap]) -> Step {
        debug_assert_eq!(state.len(), self.slots);

        let n = self.side_length;
        let (lower_rows, top_row) = state.split_at_mut(self.slots - n);
        lower_rows.fill(full_mask(n));
        for (color, slot) in top_row.iter_mut().enumerate() {
            *slot = bit(color);
        }

        Step::Level(self.top_level)
    }

    fn child(&self, state: &mut [Bitmap], level: usize, branch: Branch) -> Step {
        let n = self.side_length;
        let cell = self.locate(level);

        match branch {
            Branch::Take => {
                if !transition::place::<P>(state, cell, n) {
                    return Step::Reject;
                }
                if cell.row == 0 && cell.column == 0 {
                    return Step::Accept;
                }

                // The color is settled in this row. Keep only the chosen column:
                // the scan has passed it, so the slot is never probed again and
                // never reads as empty.
                state[cell.slot] = bit(cell.column);

                // The cell is occupied: the remaining colors of this row, which
                // are decided after this one, cannot use its column.
                let row_start = cell.row * n;
                for sibling in state[row_start..cell.slot].iter_mut() {
                    *sibling &= !bit(cell.column);
                }
            }
            Branch::Skip => {
                if !transition::rule_out(state, cell) {
                    return Step::Reject;
                }
                debug_assert!(cell.column >= 1);
            }
        }

        let step = transition::scan::<P, _>(self, state, level);
        if let Step::Level(next) = step {
            // Rows above the next level are finished and never read again.
            let next_row = self.placement(next).row;
            if next_row < cell.row {
                state[(next_row + 1) * n..(cell.row + 1) * n].fill(0);
            }
        }
        step
    }
}

impl<P: Piece> fmt::Debug for ColoredDd<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColoredDd")
            .field("piece", &P::NAME)
            .field("side_length", &self.side_length)
            .field("top_level", &self.top_level)
            .finish()
    }
}

impl<P: Piece> Clone for ColoredDd<P> {
    fn clone(&self) -> Self {
        Self {
            side_length: self.side_length,
            slots: self.slots,
            top_level: self.top_level,
            piece: PhantomData,
        }
    }
}

/// A colored position on the chess board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColoredPlacement {
    /// The row index, ranging from 0 to `n - 1`.
    pub row: usize,
    /// The column index, ranging from 0 to `n - 1`.
    pub column: usize,
    /// The color index, ranging from 0 to `n - 1`.
    pub color: usize,
}
