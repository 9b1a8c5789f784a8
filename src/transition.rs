//! Branch handling and the skip-ahead scan shared by the plain and colored
//! layouts.

use crate::{
    bitmap::{bit, Bitmap},
    bound::enough_columns,
    conflict::{probe, propagate, Lane, Piece},
    Step,
};

/// Where a level lives in the state buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Cell {
    /// Index of the bitmap holding this cell.
    pub slot: usize,
    /// The board this cell belongs to.
    pub lane: Lane,
    pub row: usize,
    pub column: usize,
}

/// Decomposition of levels into cells.
pub(crate) trait Layout {
    fn side_length(&self) -> usize;

    /// `level` must be at least 1.
    fn locate(&self, level: usize) -> Cell;
}

/// Place a piece on `cell`: check the cell is open, strike the rows above it
/// and apply the feasibility bound to what is left of them.
///
/// Returns false if the placement cannot be completed.
pub(crate) fn place<P: Piece>(state: &mut [Bitmap], cell: Cell, side_length: usize) -> bool {
    if state[cell.slot] & bit(cell.column) == 0 {
        return false;
    }

    match propagate::<P>(state, cell.lane, cell.row, cell.column, side_length) {
        Some(open) => enough_columns(open, cell.row),
        None => false,
    }
}

/// Rule out `cell` in the live state. Returns false if its row has no
/// columns left.
#[inline]
pub(crate) fn rule_out(state: &mut [Bitmap], cell: Cell) -> bool {
    state[cell.slot] &= !bit(cell.column);
    state[cell.slot] != 0
}

/// Walk down from `level` (exclusive) to the next cell where both branches
/// are possible, ruling out every cell on the way that can never hold a
/// piece from this state.
pub(crate) fn scan<P, L>(layout: &L, state: &mut [Bitmap], from: usize) -> Step
where
    P: Piece,
    L: Layout,
{
    let side_length = layout.side_length();
    let mut level = from;

    loop {
        // Every live row keeps a column, so row 0 stops the scan before level 0.
        debug_assert!(level > 1);
        level -= 1;

        let cell = layout.locate(level);
        if state[cell.slot] & bit(cell.column) != 0 {
            let open = probe::<P>(state, cell.lane, cell.row, cell.column, side_length);
            if open.map_or(false, |open| enough_columns(open, cell.row)) {
                log::trace!("Skipped ahead from level [{}] to [{}].", from, level);
                return Step::Level(level);
            }
        }

        if !rule_out(state, cell) {
            return Step::Reject;
        }
    }
}
