//! Game, state and move models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::{Board, Piece, Position, MAX_GOATS};

/// A single move. Placements have `from == to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece_type: Piece,
    /// Goat removed by a tiger jump. Filled in when the move is applied.
    #[serde(default)]
    pub capture: Option<Position>,
}

impl Move {
    /// Goat placement from hand.
    pub fn place(at: Position) -> Self {
        Self {
            from: at,
            to: at,
            piece_type: Piece::Goat,
            capture: None,
        }
    }

    /// Board move of `piece` (step or jump).
    pub fn step(piece: Piece, from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            piece_type: piece,
            capture: None,
        }
    }

    pub fn is_placement(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub goats_in_hand: u8,
    pub captured_goats: u8,
    pub current_turn: Piece,
    pub is_game_over: bool,
    pub winner: Option<Piece>,
    pub last_move: Option<Move>,
}

impl GameState {
    /// Four corner tigers, twenty goats in hand, goat to move.
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            goats_in_hand: MAX_GOATS,
            captured_goats: 0,
            current_turn: Piece::Goat,
            is_game_over: false,
            winner: None,
            last_move: None,
        }
    }

    pub fn goats_on_board(&self) -> usize {
        self.board.count(Piece::Goat)
    }

    /// Goats still placeable from hand; the goat side may not move yet.
    pub fn in_placement_phase(&self) -> bool {
        self.goats_in_hand > 0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub state: GameState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub player_id: String,
    #[serde(rename = "isAIGame")]
    pub is_ai_game: bool,
    pub ai_level: u8,
}

impl Game {
    pub fn new(player_id: &str, is_ai_game: bool, ai_level: u8) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            state: GameState::new(),
            created_at: now,
            updated_at: now,
            player_id: player_id.to_string(),
            is_ai_game,
            ai_level,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
