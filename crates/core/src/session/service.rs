//! Game session service
//!
//! Owns the store and the automated-opponent policy. A game is loaded,
//! mutated through the rules engine and saved back within one call; nothing
//! keeps a reference to it afterwards.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::ai::{AiLevel, MovePolicy, TieredPolicy};
use crate::error::{Error, Result};
use crate::game::{rules, Game, Move};
use crate::storage::GameStore;

pub struct GameService {
    store: Box<dyn GameStore>,
    policy: Box<dyn MovePolicy>,
    /// One writer lock per game id
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl GameService {
    pub fn new(store: Box<dyn GameStore>, policy: Box<dyn MovePolicy>) -> Self {
        Self {
            store,
            policy,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Service over `store` using the built-in tiered policy.
    pub fn with_store(store: Box<dyn GameStore>) -> Self {
        Self::new(store, Box::new(TieredPolicy::new()))
    }

    fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(id.to_string()).or_default().clone()
    }

    fn forget_lock(&self, id: &str) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.remove(id);
    }

    pub fn create_game(&self, player_id: &str, is_ai_game: bool, ai_level: u8) -> Result<Game> {
        if is_ai_game {
            AiLevel::try_from(ai_level)?;
        }

        let game = Game::new(player_id, is_ai_game, ai_level);
        self.store.save(&game)?;

        info!(game_id = %game.id, player_id, is_ai_game, ai_level, "game created");
        Ok(game)
    }

    pub fn get_game(&self, id: &str) -> Result<Game> {
        self.store.get_by_id(id)
    }

    pub fn list_games_for_player(&self, player_id: &str) -> Result<Vec<Game>> {
        self.store.list_by_player(player_id)
    }

    pub fn delete_game(&self, id: &str) -> Result<()> {
        let lock = self.lock_for(id);
        {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.store.delete(id)?;
        }
        self.forget_lock(id);

        info!(game_id = id, "game deleted");
        Ok(())
    }

    /// Applies a player's move and, for games against the automated
    /// opponent, its reply. The whole sequence holds the game's lock.
    ///
    /// A `Storage` error means the move was computed but may not have been
    /// recorded.
    pub fn submit_move(&self, id: &str, mv: Move) -> Result<Game> {
        let lock = self.lock_for(id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.submit_locked(id, mv)
        };

        if matches!(result, Err(Error::GameNotFound(_))) {
            self.forget_lock(id);
        }
        result
    }

    fn submit_locked(&self, id: &str, mv: Move) -> Result<Game> {
        let mut game = self.store.get_by_id(id)?;

        if game.state.is_game_over {
            return Err(Error::GameOver);
        }
        if !rules::is_legal_move(&game.state, &mv) {
            debug!(game_id = id, ?mv, "rejected move");
            return Err(Error::InvalidMove);
        }

        let applied = rules::apply_move(&mut game.state, mv)?;
        rules::check_terminal(&mut game.state);
        debug!(game_id = id, ?applied, "move applied");

        if game.is_ai_game && !game.state.is_game_over {
            self.play_automated_reply(&mut game)?;
        }

        if game.state.is_game_over {
            info!(
                game_id = id,
                winner = ?game.state.winner,
                captured = game.state.captured_goats,
                "game over"
            );
        }

        game.touch();
        self.store.save(&game)?;
        Ok(game)
    }

    fn play_automated_reply(&self, game: &mut Game) -> Result<()> {
        let level = AiLevel::try_from(game.ai_level)?;

        match self.policy.select_move(&game.state, level) {
            Ok(reply) => {
                let applied = rules::apply_move(&mut game.state, reply)?;
                rules::check_terminal(&mut game.state);
                debug!(game_id = %game.id, %level, ?applied, "automated reply");
            }
            Err(Error::NoLegalMove) => {
                info!(game_id = %game.id, side = %game.state.current_turn, "automated side has no legal move");
                rules::declare_stalemate(&mut game.state);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Position, MAX_GOATS, MAX_TIGERS};
    use crate::game::GameState;
    use crate::storage::MemoryStore;

    fn service() -> GameService {
        GameService::with_store(Box::new(MemoryStore::new()))
    }

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Policy that always reports a stuck side
    struct StuckPolicy;

    impl MovePolicy for StuckPolicy {
        fn select_move(&self, _state: &GameState, _level: AiLevel) -> Result<Move> {
            Err(Error::NoLegalMove)
        }
    }

    #[test]
    fn test_create_game_initial_state() {
        let svc = service();
        let game = svc.create_game("alice", false, 0).unwrap();
        let state = &game.state;

        for (x, y) in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            assert!(state.board.is(pos(x, y), Piece::Tiger));
        }
        assert_eq!(state.board.count(Piece::Empty), 21);
        assert_eq!(state.goats_in_hand, 20);
        assert_eq!(state.current_turn, Piece::Goat);

        assert_eq!(svc.get_game(&game.id).unwrap(), game);
    }

    #[test]
    fn test_create_game_rejects_bad_level() {
        let svc = service();
        assert!(matches!(
            svc.create_game("alice", true, 0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            svc.create_game("alice", true, 4),
            Err(Error::InvalidConfig(_))
        ));
        assert!(svc.list_games_for_player("alice").unwrap().is_empty());
        // level is ignored for two-player games
        assert!(svc.create_game("alice", false, 9).is_ok());
    }

    #[test]
    fn test_submit_placement() {
        let svc = service();
        let game = svc.create_game("alice", false, 0).unwrap();

        let updated = svc.submit_move(&game.id, Move::place(pos(2, 2))).unwrap();
        assert!(updated.state.board.is(pos(2, 2), Piece::Goat));
        assert_eq!(updated.state.goats_in_hand, 19);
        assert_eq!(updated.state.current_turn, Piece::Tiger);
        assert_eq!(svc.get_game(&game.id).unwrap().state, updated.state);
    }

    #[test]
    fn test_invalid_move_leaves_game_unchanged() {
        let svc = service();
        let game = svc.create_game("alice", false, 0).unwrap();
        svc.submit_move(&game.id, Move::place(pos(3, 3))).unwrap();

        let jump = Move::step(Piece::Tiger, pos(0, 0), pos(2, 2));
        let before = svc.get_game(&game.id).unwrap();
        assert!(matches!(svc.submit_move(&game.id, jump), Err(Error::InvalidMove)));
        assert_eq!(svc.get_game(&game.id).unwrap(), before);
    }

    #[test]
    fn test_capture_through_service() {
        let svc = service();
        let game = svc.create_game("alice", false, 0).unwrap();
        svc.submit_move(&game.id, Move::place(pos(1, 1))).unwrap();

        let updated = svc
            .submit_move(&game.id, Move::step(Piece::Tiger, pos(0, 0), pos(2, 2)))
            .unwrap();
        assert!(updated.state.board.is(pos(1, 1), Piece::Empty));
        assert_eq!(updated.state.captured_goats, 1);
        assert_eq!(
            updated.state.last_move.and_then(|m| m.capture),
            Some(pos(1, 1))
        );
    }

    #[test]
    fn test_ai_replies_once() {
        let svc = service();
        let game = svc.create_game("alice", true, 1).unwrap();

        let updated = svc.submit_move(&game.id, Move::place(pos(2, 2))).unwrap();
        let state = &updated.state;

        // goat placed, then exactly one tiger move
        assert_eq!(state.current_turn, Piece::Goat);
        assert_eq!(state.goats_in_hand, 19);
        let last = state.last_move.unwrap();
        assert_eq!(last.piece_type, Piece::Tiger);
        assert_eq!(state.board.count(Piece::Tiger), MAX_TIGERS);
        assert!(state.board.is(last.to, Piece::Tiger));
        assert!(state.board.is(last.from, Piece::Empty));
    }

    #[test]
    fn test_ai_capture_preferring_takes_goat() {
        let svc = service();
        let game = svc.create_game("alice", true, 2).unwrap();

        let updated = svc.submit_move(&game.id, Move::place(pos(1, 1))).unwrap();
        assert_eq!(updated.state.captured_goats, 1);
        assert_eq!(
            updated.state.last_move,
            Some(Move {
                capture: Some(pos(1, 1)),
                ..Move::step(Piece::Tiger, pos(0, 0), pos(2, 2))
            })
        );
    }

    #[test]
    fn test_ai_without_moves_ends_game() {
        let svc = GameService::new(Box::new(MemoryStore::new()), Box::new(StuckPolicy));
        let game = svc.create_game("alice", true, 1).unwrap();

        let updated = svc.submit_move(&game.id, Move::place(pos(2, 2))).unwrap();
        assert!(updated.state.is_game_over);
        assert_eq!(updated.state.winner, Some(Piece::Goat));
        assert!(matches!(
            svc.submit_move(&game.id, Move::place(pos(3, 3))),
            Err(Error::GameOver)
        ));
    }

    #[test]
    fn test_unknown_game() {
        let svc = service();
        let result = svc.submit_move("missing", Move::place(pos(2, 2)));
        assert!(matches!(result, Err(Error::GameNotFound(_))));
        assert!(svc.locks.lock().unwrap().is_empty());
        assert!(matches!(svc.get_game("missing"), Err(Error::GameNotFound(_))));
    }

    #[test]
    fn test_move_after_game_over() {
        let svc = service();
        let game = svc.create_game("alice", false, 0).unwrap();
        let mut finished = svc.get_game(&game.id).unwrap();
        finished.state.is_game_over = true;
        finished.state.winner = Some(Piece::Tiger);
        svc.store.save(&finished).unwrap();

        assert!(matches!(
            svc.submit_move(&game.id, Move::place(pos(2, 2))),
            Err(Error::GameOver)
        ));
        assert_eq!(svc.get_game(&game.id).unwrap(), finished);
    }

    #[test]
    fn test_list_and_delete() {
        let svc = service();
        let a = svc.create_game("alice", false, 0).unwrap();
        svc.create_game("alice", true, 3).unwrap();
        svc.create_game("bob", false, 0).unwrap();

        assert_eq!(svc.list_games_for_player("alice").unwrap().len(), 2);

        svc.delete_game(&a.id).unwrap();
        assert_eq!(svc.list_games_for_player("alice").unwrap().len(), 1);
        assert!(matches!(svc.get_game(&a.id), Err(Error::GameNotFound(_))));
    }

    #[test]
    fn test_invariants_hold_through_ai_game() {
        let svc = service();
        let game = svc.create_game("alice", true, 2).unwrap();
        let policy = TieredPolicy::new();

        for _ in 0..60 {
            let current = svc.get_game(&game.id).unwrap();
            if current.state.is_game_over {
                break;
            }
            let mv = policy.select_move(&current.state, AiLevel::Random).unwrap();
            let updated = svc.submit_move(&game.id, mv).unwrap();
            let state = &updated.state;

            assert_eq!(state.board.count(Piece::Tiger), MAX_TIGERS);
            assert_eq!(
                state.goats_in_hand as usize
                    + state.goats_on_board()
                    + state.captured_goats as usize,
                MAX_GOATS as usize
            );
            if state.captured_goats >= 5 {
                assert!(state.is_game_over);
                assert_eq!(state.winner, Some(Piece::Tiger));
            }
            if !state.is_game_over {
                assert_eq!(state.current_turn, Piece::Goat);
            }
        }
    }

    #[test]
    fn test_concurrent_moves_on_same_game() {
        let svc = Arc::new(service());
        let game = svc.create_game("alice", false, 0).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let svc = Arc::clone(&svc);
                let id = game.id.clone();
                std::thread::spawn(move || svc.submit_move(&id, Move::place(pos(1 + i % 3, 2))))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        // only the first goat placement is legal; later ones find tiger to move
        assert_eq!(successes, 1);
        let state = svc.get_game(&game.id).unwrap().state;
        assert_eq!(state.goats_in_hand, 19);
        assert_eq!(state.current_turn, Piece::Tiger);
    }
}
