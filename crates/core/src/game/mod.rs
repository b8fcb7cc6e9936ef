//! Game state and the rules engine

mod models;
pub mod rules;

pub use models::{Game, GameState, Move};
pub use rules::{apply_move, check_terminal, is_legal_move, legal_moves};
