//! Depth-limited minmax search with optional alpha-beta pruning, used as the
//! engine opponent and for hints.

use board_game_traits::Color;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::position::{GameState, Move, STARTING_STONES};

/// Score of a position the perspective player has already won.
pub const WIN_SCORE: f32 = 10_000.0;

/// Search settings for one engine opponent: how deep to search, whether to
/// prune, and whether to sometimes play a random move instead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Difficulty {
    pub depth: u16,
    pub use_pruning: bool,
    pub allow_random: bool,
}

impl Difficulty {
    pub const EASY: Difficulty = Difficulty {
        depth: 1,
        use_pruning: false,
        allow_random: true,
    };
    pub const MEDIUM: Difficulty = Difficulty {
        depth: 3,
        use_pruning: true,
        allow_random: false,
    };
    pub const HARD: Difficulty = Difficulty {
        depth: 5,
        use_pruning: true,
        allow_random: false,
    };
}

/// Static evaluation from `perspective`'s point of view: material is worth
/// 100 per stone, mobility 2 per legal move, plus 1 per stone already
/// deployed from hand. A decided game evaluates to `±WIN_SCORE`.
pub fn static_eval(state: &GameState, perspective: Color) -> f32 {
    match state.winner() {
        Some(winner) if winner == perspective => return WIN_SCORE,
        Some(_) => return -WIN_SCORE,
        None => (),
    }
    let opponent = !perspective;
    let material = state.count_pieces(perspective) as f32 - state.count_pieces(opponent) as f32;
    let mobility = mobility(state, perspective) as f32 - mobility(state, opponent) as f32;
    let deployed = (STARTING_STONES - state.in_hand(perspective)) as f32;
    100.0 * material + 2.0 * mobility + deployed
}

/// Number of legal moves `color` would have if it were their turn.
fn mobility(state: &GameState, color: Color) -> usize {
    let mut hypothetical = state.clone();
    hypothetical.set_side_to_move(color);
    hypothetical.legal_moves().len()
}

/// Returns the best move and its score from `maximizing_player`'s point of
/// view, searching `depth` plies deep over cloned states. Ties keep the first
/// move in generation order. With pruning enabled the result is identical,
/// just found faster.
pub fn minmax(
    state: &GameState,
    depth: u16,
    mut alpha: f32,
    mut beta: f32,
    maximizing_player: Color,
    use_pruning: bool,
) -> (f32, Option<Move>) {
    if depth == 0 || state.winner().is_some() {
        return (static_eval(state, maximizing_player), None);
    }
    let mut moves = vec![];
    state.generate_moves(&mut moves);
    if moves.is_empty() {
        // The side to move is stalemated, but the position is not yet marked
        // as decided. Score it as an immediate loss without touching `state`.
        let mut lost = state.clone();
        lost.set_winner(Some(!lost.side_to_move()));
        return (static_eval(&lost, maximizing_player), None);
    }
    let maximizing = state.side_to_move() == maximizing_player;
    let mut best_score = if maximizing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    };
    let mut best_move = None;
    for mv in moves {
        let mut child = state.clone();
        child.apply_move(mv);
        let (score, _) = minmax(&child, depth - 1, alpha, beta, maximizing_player, use_pruning);
        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if use_pruning {
                alpha = alpha.max(best_score);
                if beta <= alpha {
                    break;
                }
            }
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if use_pruning {
                beta = beta.min(best_score);
                if beta <= alpha {
                    break;
                }
            }
        }
    }
    (best_score, best_move)
}

/// Chooses a move for the side to move. Returns `None` only if there are no
/// legal moves at all.
pub fn choose_move(state: &GameState, difficulty: Difficulty) -> Option<Move> {
    choose_move_with_rng(state, difficulty, &mut rand::thread_rng())
}

/// Like `choose_move`, with the rng injected for deterministic callers.
pub fn choose_move_with_rng<R: Rng>(
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    let mut moves = vec![];
    state.generate_moves(&mut moves);
    if moves.is_empty() {
        return None;
    }
    if difficulty.allow_random && rng.gen_bool(0.5) {
        return moves.choose(rng).copied();
    }
    let (score, best_move) = minmax(
        state,
        difficulty.depth,
        f32::NEG_INFINITY,
        f32::INFINITY,
        state.side_to_move(),
        difficulty.use_pruning,
    );
    debug!(
        "Minmax depth {} chose {:?} with score {:.1}",
        difficulty.depth, best_move, score
    );
    match best_move {
        Some(mv) => Some(mv),
        None => moves.choose(rng).copied(),
    }
}

/// Suggests a move for the side to move without affecting whose turn it is.
pub fn hint(state: &GameState, difficulty: Difficulty) -> Option<Move> {
    choose_move(state, difficulty)
}
