//! Conflict propagation from a placed piece to the rows above it.

use crate::bitmap::{bit, Bitmap};

/// The attack pattern of the pieces being placed.
///
/// The pattern is fixed at compile time so the elimination loops are
/// specialized per piece.
pub trait Piece: Send + Sync + 'static {
    /// True if pieces also attack along both diagonals.
    const DIAGONALS: bool;

    /// Human readable name, used in log output.
    const NAME: &'static str;
}

/// A chess queen: attacks along its column and both diagonals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Queen;

impl Piece for Queen {
    const DIAGONALS: bool = true;
    const NAME: &'static str = "queen";
}

/// A chess rook: attacks along its column only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rook;

impl Piece for Rook {
    const DIAGONALS: bool = false;
    const NAME: &'static str = "rook";
}

/// Maps a row number to the state slot of one board.
///
/// A plain board uses one slot per row; the colored layout interleaves the
/// colors so that row `r` of color `c` lives at `r * stride + offset`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Lane {
    stride: usize,
    offset: usize,
}

impl Lane {
    /// The lane of a plain board.
    pub(crate) const ROWS: Lane = Lane {
        stride: 1,
        offset: 0,
    };

    /// The lane of `color` on boards with `colors` colors.
    pub(crate) fn color(colors: usize, color: usize) -> Self {
        Lane {
            stride: colors,
            offset: color,
        }
    }

    #[inline]
    pub(crate) fn slot(self, row: usize) -> usize {
        row * self.stride + self.offset
    }
}

/// Return what is left of `bitmap` once a piece `distance` rows below attacks
/// it from `column`.
#[inline]
pub(crate) fn strike<P: Piece>(
    bitmap: Bitmap,
    column: usize,
    distance: usize,
    side_length: usize,
) -> Bitmap {
    let mut left = bitmap & !bit(column);
    if P::DIAGONALS {
        if let Some(lower) = column.checked_sub(distance) {
            left &= !bit(lower);
        }
        if column + distance < side_length {
            left &= !bit(column + distance);
        }
    }
    left
}

/// Commit a piece on (`row`, `column`) by striking every row above it in
/// `lane`.
///
/// Returns the union of the surviving columns of those rows, or `None` as soon
/// as one of them has nothing left. Rows struck before the failure stay
/// struck; the state is dead at that point anyway.
pub(crate) fn propagate<P: Piece>(
    state: &mut [Bitmap],
    lane: Lane,
    row: usize,
    column: usize,
    side_length: usize,
) -> Option<Bitmap> {
    let mut total = 0;
    for above in (0..row).rev() {
        let slot = &mut state[lane.slot(above)];
        *slot = strike::<P>(*slot, column, row - above, side_length);
        if *slot == 0 {
            return None;
        }
        total |= *slot;
    }
    Some(total)
}

/// Same as [`propagate`], but leaves `state` untouched.
pub(crate) fn probe<P: Piece>(
    state: &[Bitmap],
    lane: Lane,
    row: usize,
    column: usize,
    side_length: usize,
) -> Option<Bitmap> {
    let mut total = 0;
    for above in (0..row).rev() {
        let left = strike::<P>(state[lane.slot(above)], column, row - above, side_length);
        if left == 0 {
            return None;
        }
        total |= left;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::full_mask;

    #[test]
    fn queen_strikes_column_and_diagonals() {
        let full = full_mask(5);
        assert_eq!(strike::<Queen>(full, 2, 1, 5), 0b10001);
        assert_eq!(strike::<Queen>(full, 2, 2, 5), 0b01010);
        // Diagonals running off the board are ignored.
        assert_eq!(strike::<Queen>(full, 2, 3, 5), 0b11011);
        assert_eq!(strike::<Queen>(full, 0, 1, 5), 0b11100);
        assert_eq!(strike::<Queen>(full, 4, 1, 5), 0b00111);
    }

    #[test]
    fn rook_strikes_column_only() {
        let full = full_mask(5);
        for distance in 1..5 {
            assert_eq!(strike::<Rook>(full, 2, distance, 5), 0b11011);
        }
    }

    #[test]
    fn propagate_reports_union_of_rows_above() {
        let mut state = vec![full_mask(4); 4];
        let total = propagate::<Queen>(&mut state, Lane::ROWS, 3, 0, 4);

        assert_eq!(state, vec![0b0110, 0b1010, 0b1100, 0b1111]);
        assert_eq!(total, Some(0b1110));
    }

    #[test]
    fn propagate_fails_on_emptied_row() {
        let mut state = vec![0b0011, 0b1111];
        assert_eq!(propagate::<Queen>(&mut state, Lane::ROWS, 1, 0, 4), None);
        assert_eq!(state[0], 0);
    }

    #[test]
    fn probe_leaves_state_alone() {
        let state = vec![full_mask(4); 4];
        let snapshot = state.clone();

        assert_eq!(probe::<Queen>(&state, Lane::ROWS, 3, 0, 4), Some(0b1110));
        assert_eq!(probe::<Rook>(&state, Lane::ROWS, 3, 0, 4), Some(0b1110));
        assert_eq!(probe::<Queen>(&[0b0011], Lane::ROWS, 1, 0, 4), None);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn color_lanes_skip_other_colors() {
        // Two colors on a 2x2 board: slots are [r0c0, r0c1, r1c0, r1c1].
        let mut state = vec![0b11, 0b11, 0b11, 0b11];
        let lane = Lane::color(2, 1);
        assert_eq!(lane.slot(1), 3);

        let total = propagate::<Rook>(&mut state, lane, 1, 0, 2);
        assert_eq!(state, vec![0b11, 0b10, 0b11, 0b11]);
        assert_eq!(total, Some(0b10));
    }
}
