#[cfg(test)]
mod move_gen_tests;

#[cfg(test)]
use board_game_traits::Color;

#[cfg(test)]
use crate::position::{Board, GameState, Move, Square};

#[cfg(test)]
fn sq(inner: u8) -> Square {
    Square::from_u8(inner)
}

#[cfg(test)]
fn do_moves_and_check_validity(state: &mut GameState, moves_to_play: &[Move]) {
    let mut moves = vec![];
    for mv in moves_to_play {
        state.generate_moves(&mut moves);
        assert!(
            moves.contains(mv),
            "Move {} was not among legal moves: {:?}\n{:?}",
            mv,
            moves,
            state
        );
        assert!(
            state.apply_move(*mv),
            "Legal move {} was rejected\n{:?}",
            mv,
            state
        );
        moves.clear();
    }
}

#[cfg(test)]
fn board_with(white: &[u8], black: &[u8]) -> Board {
    let mut board = Board::default();
    for &i in white {
        board[sq(i)] = Some(Color::White);
    }
    for &i in black {
        board[sq(i)] = Some(Color::Black);
    }
    board
}
