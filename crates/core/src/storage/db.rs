//! SQLite game store

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::GameStore;
use crate::error::{Error, Result};
use crate::game::Game;

/// Durable store keeping each game as a JSON document
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Storage("connection lock poisoned".into()))
    }

    fn init_schema(&self) -> Result<()> {
        self.conn()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY NOT NULL,
                player_id TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_games_player_id ON games(player_id);
            "#,
        )?;
        Ok(())
    }

    pub fn count_games(&self) -> Result<u32> {
        let count: u32 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM games",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl GameStore for SqliteStore {
    fn save(&self, game: &Game) -> Result<()> {
        let data = serde_json::to_string(game)?;

        self.conn()?.execute(
            r#"
            INSERT INTO games (id, player_id, data, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET data = ?3, updated_at = ?5
            "#,
            params![
                game.id,
                game.player_id,
                data,
                game.created_at.timestamp_millis(),
                game.updated_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> Result<Game> {
        let data: Option<String> = self
            .conn()?
            .query_row(
                "SELECT data FROM games WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match data {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(Error::GameNotFound(id.to_string())),
        }
    }

    fn list_by_player(&self, player_id: &str) -> Result<Vec<Game>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT data FROM games WHERE player_id = ?1 ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt
            .query_map(params![player_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.iter()
            .map(|json| serde_json::from_str(json).map_err(Error::from))
            .collect()
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM games WHERE id = ?1", params![id])?;
        Ok(())
    }
}
