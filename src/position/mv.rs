use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::Square;

/// A move in any phase of the game. Which variant is accepted depends on the
/// current phase and on whether a removal is pending.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Move {
    /// Place a stone from hand on an empty point.
    Place(Square),
    /// Slide a stone to an adjacent empty point, or to any empty point when flying.
    Slide(Square, Square),
    /// Take an opponent stone off the board after forming a mill.
    Remove(Square),
}

impl Move {
    /// Parses "d7" (place), "d7-d6" (slide) or "xd7" (remove).
    pub fn from_string(input: &str) -> Result<Self, pgn_traits::Error> {
        if let Some(rest) = input.strip_prefix('x') {
            Ok(Move::Remove(Square::parse_square(rest)?))
        } else if let Some((from, to)) = input.split_once('-') {
            Ok(Move::Slide(
                Square::parse_square(from)?,
                Square::parse_square(to)?,
            ))
        } else {
            Ok(Move::Place(Square::parse_square(input)?))
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(square) => write!(f, "{}", square),
            Move::Slide(from, to) => write!(f, "{}-{}", from, to),
            Move::Remove(square) => write!(f, "x{}", square),
        }
    }
}
