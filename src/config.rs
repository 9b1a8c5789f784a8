//! Board size and rule selection.
//!
//! A [`Config`] is the whole configuration surface of the crate: it names the
//! piece, the layout and the optional restricted first column, and
//! [`Config::build`] turns it into one of the concrete specifications.

use crate::{
    colored::{ColoredQueensDd, ColoredRooksDd},
    error::ConfigError,
    queens::{NQueensDd, NRooksDd},
    Bitmap, Branch, DdSpec, Step,
};
use std::{fmt, str::FromStr};

/// The piece placed on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum PieceKind {
    /// Column and diagonal conflicts.
    #[default]
    Queen,
    /// Column conflicts only.
    Rook,
}

impl FromStr for PieceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "queen" | "queens" => Ok(PieceKind::Queen),
            "rook" | "rooks" => Ok(PieceKind::Rook),
            _ => Err(ConfigError::UnknownPiece(s.to_string())),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Queen => f.write_str("queen"),
            PieceKind::Rook => f.write_str("rook"),
        }
    }
}

/// Parameters of a puzzle instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// The length of the board side.
    pub side_length: usize,
    /// The piece placed on the board.
    pub piece: PieceKind,
    /// Partition the board into one solution per color.
    pub colored: bool,
    /// Force the top row onto this column, counted from the right-hand edge.
    pub first_column: Option<usize>,
}

impl Config {
    /// Create a plain queens configuration for the given side length.
    pub fn new(side_length: usize) -> Self {
        Self {
            side_length,
            piece: PieceKind::Queen,
            colored: false,
            first_column: None,
        }
    }

    /// Use the given piece.
    pub fn piece(mut self, piece: PieceKind) -> Self {
        self.piece = piece;
        self
    }

    /// Use the colored layout.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Restrict the top row to the given column.
    pub fn first_column(mut self, first_column: usize) -> Self {
        self.first_column = Some(first_column);
        self
    }

    /// Validate the parameters and build the matching specification.
    pub fn build(&self) -> Result<Puzzle, ConfigError> {
        let puzzle = match (self.colored, self.piece, self.first_column) {
            (true, _, Some(_)) => return Err(ConfigError::ColoredFirstColumn),
            (true, PieceKind::Queen, None) => {
                Puzzle::ColoredQueens(ColoredQueensDd::new(self.side_length)?)
            }
            (true, PieceKind::Rook, None) => {
                Puzzle::ColoredRooks(ColoredRooksDd::new(self.side_length)?)
            }
            (false, PieceKind::Queen, None) => Puzzle::Queens(NQueensDd::new(self.side_length)?),
            (false, PieceKind::Rook, None) => Puzzle::Rooks(NRooksDd::new(self.side_length)?),
            (false, PieceKind::Queen, Some(column)) => {
                Puzzle::Queens(NQueensDd::with_first_column(self.side_length, column)?)
            }
            (false, PieceKind::Rook, Some(column)) => {
                Puzzle::Rooks(NRooksDd::with_first_column(self.side_length, column)?)
            }
        };

        Ok(puzzle)
    }
}

/// One of the concrete specifications, chosen at run time.
///
/// Dispatch happens once per call; the elimination loops inside each variant
/// stay specialized to their piece.
#[derive(Debug, Clone)]
pub enum Puzzle {
    /// See [`NQueensDd`].
    Queens(NQueensDd),
    /// See [`NRooksDd`].
    Rooks(NRooksDd),
    /// See [`ColoredQueensDd`].
    ColoredQueens(ColoredQueensDd),
    /// See [`ColoredRooksDd`].
    ColoredRooks(ColoredRooksDd),
}

macro_rules! dispatch {
    ($puzzle:expr, $spec:ident => $body:expr) => {
        match $puzzle {
            Puzzle::Queens($spec) => $body,
            Puzzle::Rooks($spec) => $body,
            Puzzle::ColoredQueens($spec) => $body,
            Puzzle::ColoredRooks($spec) => $body,
        }
    };
}

impl Puzzle {
    /// Return the length of the board side.
    pub fn side_length(&self) -> usize {
        dispatch!(self, spec => spec.side_length())
    }

    /// Return the level the diagram starts at.
    pub fn top_level(&self) -> usize {
        dispatch!(self, spec => spec.top_level())
    }
}

impl DdSpec for Puzzle {
    fn array_size(&self) -> usize {
        dispatch!(self, spec => spec.array_size())
    }

    fn root(&self, state: &mut [Bitmap]) -> Step {
        dispatch!(self, spec => spec.root(state))
    }

    fn child(&self, state: &mut [Bitmap], level: usize, branch: Branch) -> Step {
        dispatch!(self, spec => spec.child(state, level, branch))
    }
}
