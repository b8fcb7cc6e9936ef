//! Game stores: in-memory and SQLite

mod db;
mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::game::Game;

/// Persistence for game sessions.
///
/// Implementations hand out copies: a game returned by `get_by_id` is a
/// snapshot of the last completed `save` and never aliases stored data.
pub trait GameStore: Send + Sync {
    /// Inserts or replaces the game with the same id.
    fn save(&self, game: &Game) -> Result<()>;

    /// Fails with `Error::GameNotFound` for an unknown id.
    fn get_by_id(&self, id: &str) -> Result<Game>;

    /// Games owned by `player_id`, oldest first.
    fn list_by_player(&self, player_id: &str) -> Result<Vec<Game>>;

    /// Removes a game. Unknown ids are not an error.
    fn delete(&self, id: &str) -> Result<()>;
}
