//! In-memory game store

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::GameStore;
use crate::error::{Error, Result};
use crate::game::Game;

#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<String, Game>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Game>>> {
        self.games
            .read()
            .map_err(|_| Error::Storage("game map lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Game>>> {
        self.games
            .write()
            .map_err(|_| Error::Storage("game map lock poisoned".into()))
    }
}

impl GameStore for MemoryStore {
    fn save(&self, game: &Game) -> Result<()> {
        self.write()?.insert(game.id.clone(), game.clone());
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> Result<Game> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::GameNotFound(id.to_string()))
    }

    fn list_by_player(&self, player_id: &str) -> Result<Vec<Game>> {
        let mut games: Vec<Game> = self
            .read()?
            .values()
            .filter(|g| g.player_id == player_id)
            .cloned()
            .collect();
        // same key as the SQLite store: millisecond creation time, then id
        games.sort_by(|a, b| {
            let key_a = (a.created_at.timestamp_millis(), &a.id);
            let key_b = (b.created_at.timestamp_millis(), &b.id);
            key_a.cmp(&key_b)
        });
        Ok(games)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.write()?.remove(id);
        Ok(())
    }
}
