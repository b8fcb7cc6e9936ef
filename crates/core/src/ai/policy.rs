//! Tiered move-selection policy
//!
//! The policy only reads the state it is handed; applying the chosen move is
//! left to the caller so a stronger policy can be swapped in without touching
//! the rules engine.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::level::AiLevel;
use crate::error::{Error, Result};
use crate::game::rules::{capture_square, legal_moves};
use crate::game::{GameState, Move};

/// Chooses a move for the side to move.
pub trait MovePolicy: Send + Sync {
    /// Returns `Error::NoLegalMove` when the side to move is stuck.
    fn select_move(&self, state: &GameState, level: AiLevel) -> Result<Move>;
}

/// Random and capture-preferring selection, indexed by [`AiLevel`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredPolicy;

impl TieredPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Same as [`MovePolicy::select_move`] but drawing from `rng`.
    pub fn select_move_with<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        level: AiLevel,
        rng: &mut R,
    ) -> Result<Move> {
        let candidates = legal_moves(state);

        let pool = match level {
            AiLevel::CapturePreferring => {
                let captures: Vec<Move> = candidates
                    .iter()
                    .copied()
                    .filter(|mv| capture_square(state, mv).is_some())
                    .collect();
                if captures.is_empty() {
                    candidates
                } else {
                    captures
                }
            }
            // TODO: replace with a search-based policy once one exists
            AiLevel::Random | AiLevel::Strong => candidates,
        };

        pool.choose(rng).copied().ok_or(Error::NoLegalMove)
    }
}

impl MovePolicy for TieredPolicy {
    fn select_move(&self, state: &GameState, level: AiLevel) -> Result<Move> {
        let mut rng = rand::rng();
        self.select_move_with(state, level, &mut rng)
    }
}
