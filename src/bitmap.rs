//! Column sets packed into machine words.
//!
//! Bit `j` of a row's bitmap is set while column `j` is still available in
//! that row.

/// The per-row column set.
pub type Bitmap = u32;

/// The widest board a [`Bitmap`] can describe.
pub const MAX_SIDE_LENGTH: usize = Bitmap::BITS as usize;

/// Return the bitmap holding only column `column`.
#[inline]
pub fn bit(column: usize) -> Bitmap {
    debug_assert!(column < MAX_SIDE_LENGTH);
    1 << column
}

/// Return the bitmap with all `side_length` columns available.
///
/// `side_length` must be in `1..=MAX_SIDE_LENGTH`.
#[inline]
pub fn full_mask(side_length: usize) -> Bitmap {
    debug_assert!((1..=MAX_SIDE_LENGTH).contains(&side_length));
    Bitmap::MAX >> (MAX_SIDE_LENGTH - side_length)
}

/// Return the number of available columns in `bitmap`.
///
/// Every bit count in the crate goes through here.
#[inline]
pub fn popcount(bitmap: Bitmap) -> usize {
    bitmap.count_ones() as usize
}
