//! Mill detection and capture legality. These functions are pure, and are the
//! only place mill semantics live.

use arrayvec::ArrayVec;
use board_game_traits::Color;

use crate::position::square::squares_iterator;
use crate::position::{Board, Square, STARTING_STONES};

/// Returns the mill line if the occupant of `square` is part of a formed mill.
pub fn mill_at(board: &Board, square: Square) -> Option<[Square; 3]> {
    let color = board[square]?;
    square
        .mill_lines()
        .find(|line| line.iter().all(|&sq| board[sq] == Some(color)))
}

/// Whether `color` on `square` completes a mill. The occupant of `square`
/// itself is ignored, so this can be asked for a tentative placement.
pub fn forms_mill(board: &Board, square: Square, color: Color) -> bool {
    square
        .mill_lines()
        .any(|line| line.iter().all(|&sq| sq == square || board[sq] == Some(color)))
}

/// Capture targets after a mill: opponent stones outside formed mills, or all
/// opponent stones if every one of them sits in a mill. Empty if the opponent
/// has no stones at all.
pub fn legal_removals(board: &Board, opponent: Color) -> ArrayVec<Square, { STARTING_STONES as usize }> {
    let mut outside_mills = ArrayVec::new();
    let mut all = ArrayVec::new();
    for square in squares_iterator() {
        if board[square] == Some(opponent) {
            all.push(square);
            if mill_at(board, square).is_none() {
                outside_mills.push(square);
            }
        }
    }
    if outside_mills.is_empty() {
        all
    } else {
        outside_mills
    }
}
