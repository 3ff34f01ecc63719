use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of points on the board.
pub const NUM_SQUARES: u8 = 24;

/// Square names in index order, using the usual a1..g7 coordinates.
const SQUARE_NAMES: [&str; NUM_SQUARES as usize] = [
    "a7", "d7", "g7", "b6", "d6", "f6", "c5", "d5", "e5", "a4", "b4", "c4", "e4", "f4", "g4",
    "c3", "d3", "e3", "b2", "d2", "f2", "a1", "d1", "g1",
];

/// Neighbour lists, sorted ascending. Move enumeration order depends on this.
const NEIGHBOURS: [&[u8]; NUM_SQUARES as usize] = [
    &[1, 9],
    &[0, 2, 4],
    &[1, 14],
    &[4, 10],
    &[1, 3, 5, 7],
    &[4, 13],
    &[7, 11],
    &[4, 6, 8],
    &[7, 12],
    &[0, 10, 21],
    &[3, 9, 11, 18],
    &[6, 10, 15],
    &[8, 13, 17],
    &[5, 12, 14, 20],
    &[2, 13, 23],
    &[11, 16],
    &[15, 17, 19],
    &[12, 16],
    &[10, 19],
    &[16, 18, 20, 22],
    &[13, 19],
    &[9, 22],
    &[19, 21, 23],
    &[14, 22],
];

/// The 16 straight lines on which mills can form.
const MILL_LINES: [[u8; 3]; 16] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [9, 10, 11],
    [12, 13, 14],
    [15, 16, 17],
    [18, 19, 20],
    [21, 22, 23],
    [0, 9, 21],
    [3, 10, 18],
    [6, 11, 15],
    [1, 4, 7],
    [16, 19, 22],
    [8, 12, 17],
    [5, 13, 20],
    [2, 14, 23],
];

/// Indices into `MILL_LINES` for the two lines through each square.
const LINES_BY_SQUARE: [[u8; 2]; NUM_SQUARES as usize] = [
    [0, 8],
    [0, 11],
    [0, 15],
    [1, 9],
    [1, 11],
    [1, 14],
    [2, 10],
    [2, 11],
    [2, 13],
    [3, 8],
    [3, 9],
    [3, 10],
    [4, 13],
    [4, 14],
    [4, 15],
    [5, 10],
    [5, 12],
    [5, 13],
    [6, 9],
    [6, 12],
    [6, 14],
    [7, 8],
    [7, 12],
    [7, 15],
];

/// A point on the board. Can be used to index a `Board`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    pub const fn from_u8(inner: u8) -> Self {
        assert!(inner < NUM_SQUARES);
        Square(inner)
    }

    pub const fn into_inner(self) -> u8 {
        self.0
    }

    pub fn neighbours(self) -> impl Iterator<Item = Square> {
        NEIGHBOURS[self.0 as usize].iter().map(|&sq| Square(sq))
    }

    pub fn is_adjacent_to(self, other: Square) -> bool {
        NEIGHBOURS[self.0 as usize].contains(&other.0)
    }

    /// The two mill lines through this square.
    pub fn mill_lines(self) -> impl Iterator<Item = [Square; 3]> {
        LINES_BY_SQUARE[self.0 as usize]
            .iter()
            .map(|&line| MILL_LINES[line as usize].map(Square))
    }

    pub fn parse_square(input: &str) -> Result<Square, pgn_traits::Error> {
        SQUARE_NAMES
            .iter()
            .position(|name| *name == input)
            .map(|i| Square(i as u8))
            .ok_or_else(|| {
                pgn_traits::Error::new_parse_error(format!("Couldn't parse square \"{}\"", input))
            })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SQUARE_NAMES[self.0 as usize])
    }
}

/// Iterates over all board squares in index order.
pub fn squares_iterator() -> impl Iterator<Item = Square> {
    (0..NUM_SQUARES).map(Square)
}

/// Iterates over all 16 mill lines.
pub fn mill_lines_iterator() -> impl Iterator<Item = [Square; 3]> {
    MILL_LINES.iter().map(|line| line.map(Square))
}
