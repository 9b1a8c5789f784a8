#![deny(missing_docs)]

//! Top-down [decision diagram](https://en.wikipedia.org/wiki/Zero-suppressed_decision_diagram)
//! specifications for the [`n` queens puzzle](https://en.wikipedia.org/wiki/Eight_queens_puzzle),
//! its rook-only relaxation and the colored variant that partitions a board
//! into `n` disjoint solutions.
//!
//! Each specification is a [`DdSpec`]: a root builder plus a transition
//! function that, given a caller-owned board state and a decision level,
//! reports whether the branch is dead, complete, or which lower level holds
//! the next real choice. A breadth-first diagram engine drives it by calling
//! [`DdSpec::root`] once and then [`DdSpec::child`] for both branches of
//! every live node.
//!
//! ```
//! use queen_dd::{queens::NQueensDd, DdSpec};
//!
//! let eight = NQueensDd::new(8).unwrap();
//! assert_eq!(eight.solver().count(), 92);
//! ```

pub mod bitmap;
pub(crate) mod bound;
pub mod colored;
pub mod config;
pub(crate) mod conflict;
pub mod error;
pub mod queens;
pub(crate) mod solver;
pub(crate) mod transition;
pub mod usage;

pub use bitmap::Bitmap;
pub use config::{Config, PieceKind, Puzzle};
pub use conflict::{Piece, Queen, Rook};
pub use error::ConfigError;
pub use solver::Solver;

/// The value of a single decision: leave the cell empty or place a piece on
/// it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Leave the cell at this level empty.
    Skip,
    /// Place a piece on the cell at this level.
    Take,
}

impl Branch {
    /// Both branches, in the order an engine visits them.
    pub const ALL: [Branch; 2] = [Branch::Skip, Branch::Take];
}

impl From<bool> for Branch {
    fn from(take: bool) -> Self {
        if take {
            Branch::Take
        } else {
            Branch::Skip
        }
    }
}

/// Outcome of a root or transition call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// No completion exists; the branch merges into the false sink.
    Reject,
    /// Every constraint holds; all remaining levels are left empty.
    Accept,
    /// The next level (always at least 1) at which a real choice exists.
    Level(usize),
}

impl Step {
    /// Return the integer code used by engines that speak the classic
    /// protocol: `0` rejects, `-1` accepts, anything else is a level.
    pub fn code(self) -> isize {
        match self {
            Step::Reject => 0,
            Step::Accept => -1,
            Step::Level(level) => level as isize,
        }
    }

    /// Inverse of [`Step::code`]. Codes below `-1` are treated as rejects.
    pub fn from_code(code: isize) -> Self {
        match code {
            -1 => Step::Accept,
            level if level > 0 => Step::Level(level as usize),
            _ => Step::Reject,
        }
    }
}

/// A decision diagram specification over a fixed-size array of bitmaps.
pub trait DdSpec {
    /// Return the number of bitmaps in the state buffer the engine must
    /// allocate for every node.
    fn array_size(&self) -> usize;

    /// Fill `state` with the root state and return the root level.
    ///
    /// `state` must be exactly [`DdSpec::array_size`] long.
    fn root(&self, state: &mut [Bitmap]) -> Step;

    /// Apply `branch` at `level` to `state` in place and return where the
    /// path continues.
    ///
    /// `level` must be a level previously returned by [`DdSpec::root`] or
    /// [`DdSpec::child`] for this very state.
    fn child(&self, state: &mut [Bitmap], level: usize, branch: Branch) -> Step;

    /// Return an iterator over every accepted path of this specification.
    fn solver(&self) -> Solver<'_, Self>
    where
        Self: Sized,
    {
        Solver::new(self)
    }
}

impl<E> DdSpec for &E
where
    E: DdSpec,
{
    fn array_size(&self) -> usize {
        <E as DdSpec>::array_size(self)
    }

    fn root(&self, state: &mut [Bitmap]) -> Step {
        <E as DdSpec>::root(self, state)
    }

    fn child(&self, state: &mut [Bitmap], level: usize, branch: Branch) -> Step {
        <E as DdSpec>::child(self, state, level, branch)
    }
}
