//! Bagh-Chal (tigers and goats) rules engine and game sessions

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod session;
pub mod storage;

pub use ai::{AiLevel, MovePolicy, TieredPolicy};
pub use board::{Board, Piece, Position};
pub use error::{Error, Result};
pub use game::{Game, GameState, Move};
pub use session::GameService;
pub use storage::{GameStore, MemoryStore, SqliteStore};
