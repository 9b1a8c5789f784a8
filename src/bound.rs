//! Cheap necessary condition for completing a partial placement.
//!
//! The rows still waiting for a piece must be matched to pairwise distinct
//! columns. By Hall's theorem that needs, in particular, at least as many
//! columns in the union of their bitmaps as there are rows. Passing the test
//! does not guarantee a matching exists.

use crate::bitmap::{popcount, Bitmap};

/// Return true if `open`, the union of the bitmaps of `rows` pending rows,
/// could still supply each of them a distinct column.
#[inline]
pub(crate) fn enough_columns(open: Bitmap, rows: usize) -> bool {
    popcount(open) >= rows
}
