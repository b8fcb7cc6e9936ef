//! Move legality, execution and win detection
//!
//! All functions operate on a borrowed [`GameState`] for the duration of the
//! call only. Legality is a pure predicate; execution re-checks it before
//! touching the board so a rejected move never leaves a partial update.

use crate::board::{midpoint, Board, Piece, Position, DIRECTIONS, TIGER_WIN_CAPTURES};
use crate::error::{Error, Result};

use super::models::{GameState, Move};

/// Whether `mv` may be played by the side to move.
pub fn is_legal_move(state: &GameState, mv: &Move) -> bool {
    let board = &state.board;

    if mv.piece_type != state.current_turn {
        return false;
    }

    if !board.is(mv.to, Piece::Empty) {
        return false;
    }

    // Goats must all be placed before any goat may move
    if mv.piece_type == Piece::Goat && state.in_placement_phase() {
        return mv.is_placement();
    }

    if !board.is(mv.from, mv.piece_type) {
        return false;
    }

    let dx = (mv.to.x - mv.from.x).abs();
    let dy = (mv.to.y - mv.from.y).abs();

    if dx <= 1 && dy <= 1 && (dx, dy) != (0, 0) {
        return true;
    }

    mv.piece_type == Piece::Tiger && jumped_goat(board, mv.from, mv.to).is_some()
}

/// The goat a tiger move would remove, if `mv` is a capture-jump.
pub fn capture_square(state: &GameState, mv: &Move) -> Option<Position> {
    if mv.piece_type != Piece::Tiger {
        return None;
    }
    jumped_goat(&state.board, mv.from, mv.to)
}

fn jumped_goat(board: &Board, from: Position, to: Position) -> Option<Position> {
    midpoint(from, to).filter(|&mid| board.is(mid, Piece::Goat))
}

/// Plays `mv`, flipping the turn. Returns the move as recorded, with
/// `capture` filled in for capture-jumps.
pub fn apply_move(state: &mut GameState, mv: Move) -> Result<Move> {
    if state.is_game_over {
        return Err(Error::GameOver);
    }
    if !is_legal_move(state, &mv) {
        return Err(Error::InvalidMove);
    }

    let mut recorded = Move { capture: None, ..mv };

    if mv.piece_type == Piece::Goat && state.in_placement_phase() {
        state.board.set(mv.to, Piece::Goat);
        state.goats_in_hand -= 1;
    } else {
        let capture = capture_square(state, &mv);
        state.board.set(mv.from, Piece::Empty);
        state.board.set(mv.to, mv.piece_type);

        if let Some(mid) = capture {
            state.board.set(mid, Piece::Empty);
            state.captured_goats += 1;
            recorded.capture = Some(mid);
        }
    }

    state.last_move = Some(recorded);
    state.current_turn = state.current_turn.opponent();

    Ok(recorded)
}

/// Every legal move for the side to move. Empty once the game is over.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    if state.is_game_over {
        return Vec::new();
    }

    let side = state.current_turn;

    if side == Piece::Goat && state.in_placement_phase() {
        return state
            .board
            .positions_of(Piece::Empty)
            .map(Move::place)
            .collect();
    }

    let mut moves = Vec::new();
    for from in state.board.positions_of(side) {
        for dir in DIRECTIONS {
            moves.push(Move::step(side, from, from.offset(dir, 1)));
            if side == Piece::Tiger {
                moves.push(Move::step(side, from, from.offset(dir, 2)));
            }
        }
    }
    moves.retain(|mv| is_legal_move(state, mv));
    moves
}

/// Whether the tiger at `pos` has a step onto an empty neighbour or a
/// capture-jump over a goat onto an empty cell.
pub fn tiger_has_any_move(state: &GameState, pos: Position) -> bool {
    let board = &state.board;
    DIRECTIONS.iter().any(|&dir| {
        let step = pos.offset(dir, 1);
        let landing = pos.offset(dir, 2);
        board.is(step, Piece::Empty)
            || (board.is(landing, Piece::Empty) && board.is(step, Piece::Goat))
    })
}

pub fn all_tigers_trapped(state: &GameState) -> bool {
    state
        .board
        .positions_of(Piece::Tiger)
        .all(|pos| !tiger_has_any_move(state, pos))
}

/// Ends the game in favour of the side not to move.
pub fn declare_stalemate(state: &mut GameState) {
    let winner = state.current_turn.opponent();
    finish(state, winner);
}

fn finish(state: &mut GameState, winner: Piece) {
    state.is_game_over = true;
    state.winner = Some(winner);
}

/// Evaluates win conditions after a move. Terminal states are left as is.
pub fn check_terminal(state: &mut GameState) {
    if state.is_game_over {
        return;
    }

    if state.captured_goats >= TIGER_WIN_CAPTURES {
        finish(state, Piece::Tiger);
    } else if all_tigers_trapped(state) {
        finish(state, Piece::Goat);
    } else if legal_moves(state).is_empty() {
        declare_stalemate(state);
    }
}
