//! Nine men's morris game state and move application, along with all required
//! data types.

use std::fmt;
use std::ops::{Index, IndexMut};

use board_game_traits::{Color, GameResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod rules;

mod mv;
mod square;

pub use mv::Move;
pub use square::{mill_lines_iterator, squares_iterator, Square, NUM_SQUARES};

/// Stones each player starts with in hand.
pub const STARTING_STONES: u8 = 9;

/// Stones are placed from hand until both hands are empty, then slid around
/// the board. The transition never reverts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    Placing,
    Moving,
}

/// One observable effect of a successful `apply_move` call. The event list is
/// rebuilt on every call and is only valid until the next one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    Placed { color: Color, to: Square },
    Slid { color: Color, from: Square, to: Square },
    MillFormed { color: Color, at: Square },
    Removed { color: Color, at: Square },
    PhaseChanged { from: Phase, to: Phase },
    GameOver { winner: Color },
}

/// The 24 points of the board and their occupants.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Board {
    cells: [Option<Color>; NUM_SQUARES as usize],
}

impl Board {
    pub fn count_pieces(&self, color: Color) -> u8 {
        self.cells.iter().filter(|cell| **cell == Some(color)).count() as u8
    }

    pub fn occupied_squares(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        squares_iterator().filter(move |sq| self[*sq] == Some(color))
    }
}

impl Index<Square> for Board {
    type Output = Option<Color>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square.into_inner() as usize]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.cells[square.into_inner() as usize]
    }
}

/// Everything needed to restore a position exactly. The undo/redo stacks never
/// store anything else.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Snapshot {
    board: Board,
    phase: Phase,
    to_move: Color,
    white_in_hand: u8,
    black_in_hand: u8,
    removal_pending: bool,
    winner: Option<Color>,
}

/// The full game state: board, phase, turn, hand counts, pending removal,
/// winner, and the undo/redo history.
pub struct GameState {
    board: Board,
    phase: Phase,
    to_move: Color,
    white_in_hand: u8,
    black_in_hand: u8,
    removal_pending: bool,
    winner: Option<Color>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    events: Vec<Event>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: Board::default(),
            phase: Phase::Placing,
            to_move: Color::White,
            white_in_hand: STARTING_STONES,
            black_in_hand: STARTING_STONES,
            removal_pending: false,
            winner: None,
            undo_stack: vec![],
            redo_stack: vec![],
            events: vec![],
        }
    }
}

impl Clone for GameState {
    /// History stacks and the event list are not cloned. The search clones a
    /// position per node, and the hypothetical branches must not share or
    /// drag along the live game's history.
    fn clone(&self) -> Self {
        GameState {
            board: self.board,
            phase: self.phase,
            to_move: self.to_move,
            white_in_hand: self.white_in_hand,
            black_in_hand: self.black_in_hand,
            removal_pending: self.removal_pending,
            winner: self.winner,
            undo_stack: vec![],
            redo_stack: vec![],
            events: vec![],
        }
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.phase == other.phase
            && self.to_move == other.to_move
            && self.white_in_hand == other.white_in_hand
            && self.black_in_hand == other.black_in_hand
            && self.removal_pending == other.removal_pending
            && self.winner == other.winner
    }
}

impl Eq for GameState {}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        const POINTS: [[i8; 7]; 7] = [
            [0, -1, -1, 1, -1, -1, 2],
            [-1, 3, -1, 4, -1, 5, -1],
            [-1, -1, 6, 7, 8, -1, -1],
            [9, 10, 11, -1, 12, 13, 14],
            [-1, -1, 15, 16, 17, -1, -1],
            [-1, 18, -1, 19, -1, 20, -1],
            [21, -1, -1, 22, -1, -1, 23],
        ];
        for (rank, row) in POINTS.iter().enumerate() {
            write!(f, "{} ", 7 - rank)?;
            for &point in row {
                if point < 0 {
                    write!(f, "  ")?;
                } else {
                    match self.board[Square::from_u8(point as u8)] {
                        None => write!(f, ". ")?,
                        Some(Color::White) => write!(f, "W ")?,
                        Some(Color::Black) => write!(f, "B ")?,
                    }
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g")?;
        writeln!(
            f,
            "Stones in hand: {}/{}.",
            self.white_in_hand, self.black_in_hand
        )?;
        if let Some(winner) = self.winner {
            writeln!(f, "{} has won.", winner)?;
        } else if self.removal_pending {
            writeln!(f, "{} must remove a stone.", self.to_move)?;
        } else {
            writeln!(f, "{} to move.", self.to_move)?;
        }
        Ok(())
    }
}

impl GameState {
    pub fn start_position() -> Self {
        Self::default()
    }

    /// Sets up an arbitrary position directly, e.g. for puzzles. The history
    /// is empty, no removal is pending and no winner is set.
    pub fn from_setup(
        board: Board,
        phase: Phase,
        to_move: Color,
        white_in_hand: u8,
        black_in_hand: u8,
    ) -> Self {
        let state = GameState {
            board,
            phase,
            to_move,
            white_in_hand,
            black_in_hand,
            ..GameState::default()
        };
        state.check_piece_counts();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn side_to_move(&self) -> Color {
        self.to_move
    }

    /// Used by the evaluator to measure either side's mobility on a cloned
    /// position, and by puzzle setups.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.to_move = color;
    }

    pub(crate) fn set_winner(&mut self, winner: Option<Color>) {
        self.winner = winner;
    }

    pub fn in_hand(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white_in_hand,
            Color::Black => self.black_in_hand,
        }
    }

    fn in_hand_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white_in_hand,
            Color::Black => &mut self.black_in_hand,
        }
    }

    pub fn count_pieces(&self, color: Color) -> u8 {
        self.board.count_pieces(color)
    }

    pub fn captured_pieces(&self, color: Color) -> u8 {
        STARTING_STONES - self.count_pieces(color) - self.in_hand(color)
    }

    /// A side flies once it is down to exactly 3 stones on the board and has
    /// nothing left to place.
    pub fn is_flying(&self, color: Color) -> bool {
        self.count_pieces(color) == 3 && self.phase != Phase::Placing
    }

    pub fn removal_pending(&self) -> bool {
        self.removal_pending
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn game_result(&self) -> Option<GameResult> {
        match self.winner {
            Some(Color::White) => Some(GameResult::WhiteWin),
            Some(Color::Black) => Some(GameResult::BlackWin),
            None => None,
        }
    }

    /// The events emitted by the last successful `apply_move` call.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Adds all legal moves to the provided vector, in a deterministic order:
    /// ascending square index for placements and removals, ascending
    /// (source, target) for slides. Search tie-breaking depends on this order.
    pub fn generate_moves(&self, moves: &mut Vec<Move>) {
        if self.winner.is_some() {
            return;
        }
        if self.removal_pending {
            let opponent = !self.to_move;
            moves.extend(
                rules::legal_removals(&self.board, opponent)
                    .into_iter()
                    .map(Move::Remove),
            );
            return;
        }
        match self.phase {
            Phase::Placing => {
                for square in squares_iterator() {
                    if self.board[square].is_none() {
                        moves.push(Move::Place(square));
                    }
                }
            }
            Phase::Moving => {
                let flying = self.is_flying(self.to_move);
                for from in squares_iterator() {
                    if self.board[from] != Some(self.to_move) {
                        continue;
                    }
                    if flying {
                        for to in squares_iterator() {
                            if self.board[to].is_none() {
                                moves.push(Move::Slide(from, to));
                            }
                        }
                    } else {
                        for to in from.neighbours() {
                            if self.board[to].is_none() {
                                moves.push(Move::Slide(from, to));
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = vec![];
        self.generate_moves(&mut moves);
        moves
    }

    /// Applies a move if it is legal in the current state. On success the
    /// board, counters, phase, turn and winner are updated, a snapshot of the
    /// pre-move state is pushed on the undo stack, the redo stack is cleared,
    /// and the event list is rebuilt. On rejection the state is untouched and
    /// the event list is left empty: apart from clearing last call's events,
    /// validation fully precedes any mutation.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        self.events.clear();
        if self.winner.is_some() {
            return false;
        }
        match mv {
            Move::Remove(square) => {
                if !self.removal_pending {
                    return false;
                }
                let opponent = !self.to_move;
                if !rules::legal_removals(&self.board, opponent).contains(&square) {
                    return false;
                }
                self.commit();
                self.board[square] = None;
                self.events.push(Event::Removed {
                    color: opponent,
                    at: square,
                });
                self.removal_pending = false;
                self.to_move = opponent;
                self.advance_phase_and_winner();
            }
            Move::Place(square) => {
                if self.removal_pending
                    || self.phase != Phase::Placing
                    || self.board[square].is_some()
                {
                    return false;
                }
                self.commit();
                let color = self.to_move;
                self.board[square] = Some(color);
                *self.in_hand_mut(color) -= 1;
                self.events.push(Event::Placed { color, to: square });
                self.finish_stone_move(square);
            }
            Move::Slide(from, to) => {
                if self.removal_pending || self.phase != Phase::Moving {
                    return false;
                }
                if self.board[from] != Some(self.to_move) || self.board[to].is_some() {
                    return false;
                }
                if !self.is_flying(self.to_move) && !from.is_adjacent_to(to) {
                    return false;
                }
                self.commit();
                let color = self.to_move;
                self.board[from] = None;
                self.board[to] = Some(color);
                self.events.push(Event::Slid { color, from, to });
                self.finish_stone_move(to);
            }
        }
        self.check_piece_counts();
        true
    }

    /// Shared tail of placements and slides: if the stone's destination
    /// completes a mill, the mover keeps the turn and must remove next.
    /// Phase and winner are only recomputed once no removal is pending.
    fn finish_stone_move(&mut self, to: Square) {
        let color = self.to_move;
        if rules::forms_mill(&self.board, to, color) {
            self.removal_pending = true;
            self.events.push(Event::MillFormed { color, at: to });
        } else {
            self.to_move = !color;
            self.advance_phase_and_winner();
        }
    }

    fn advance_phase_and_winner(&mut self) {
        debug_assert!(!self.removal_pending);
        if self.phase == Phase::Placing && self.white_in_hand == 0 && self.black_in_hand == 0 {
            self.phase = Phase::Moving;
            self.events.push(Event::PhaseChanged {
                from: Phase::Placing,
                to: Phase::Moving,
            });
        }
        if self.winner.is_none() {
            self.winner = self.compute_winner();
            if let Some(winner) = self.winner {
                self.events.push(Event::GameOver { winner });
            }
        }
    }

    /// A side loses once it has nothing left to place and fewer than 3 stones
    /// on the board. The attrition check runs for both sides before the
    /// stalemate check for the side now to move; a stalemated side loses.
    fn compute_winner(&self) -> Option<Color> {
        for color in [Color::White, Color::Black] {
            if self.count_pieces(color) < 3 && self.in_hand(color) == 0 {
                return Some(!color);
            }
        }
        if self.phase == Phase::Moving {
            let mut moves = vec![];
            self.generate_moves(&mut moves);
            if moves.is_empty() {
                return Some(!self.to_move);
            }
        }
        None
    }

    /// Restores the state before the last applied move. The undone state goes
    /// on the redo stack.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(self.snapshot());
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(self.snapshot());
                self.restore(next);
                true
            }
            None => false,
        }
    }

    /// Reinitializes to the starting position and clears both history stacks.
    pub fn reset(&mut self) {
        *self = GameState::default();
    }

    fn commit(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            phase: self.phase,
            to_move: self.to_move,
            white_in_hand: self.white_in_hand,
            black_in_hand: self.black_in_hand,
            removal_pending: self.removal_pending,
            winner: self.winner,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.phase = snapshot.phase;
        self.to_move = snapshot.to_move;
        self.white_in_hand = snapshot.white_in_hand;
        self.black_in_hand = snapshot.black_in_hand;
        self.removal_pending = snapshot.removal_pending;
        self.winner = snapshot.winner;
        self.events.clear();
    }

    fn check_piece_counts(&self) {
        debug_assert!(
            self.count_pieces(Color::White) + self.white_in_hand <= STARTING_STONES,
            "Too many white stones:\n{:?}",
            self
        );
        debug_assert!(
            self.count_pieces(Color::Black) + self.black_in_hand <= STARTING_STONES,
            "Too many black stones:\n{:?}",
            self
        );
    }
}
