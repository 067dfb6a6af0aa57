use rand::Rng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::game::{GameEngine, GameSession, Snapshot, StepInfo};
use crate::input::{InputController, Key};
use crate::storage::HighScoreStore;

/// Owns the running session and everything that feeds it
///
/// Key presses and ticks each replace the session wholesale, so a renderer
/// never sees a half-applied update. The high-score store is the only side
/// effect, and failures there are logged and otherwise ignored.
pub struct GameController<R = StdRng> {
    engine: GameEngine<R>,
    session: GameSession,
    input: InputController,
    store: Box<dyn HighScoreStore>,
}

impl<R: Rng> GameController<R> {
    pub fn new(engine: GameEngine<R>, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load().unwrap_or_else(|err| {
            warn!("Could not load high score, starting from 0: {err:#}");
            0
        });
        info!(high_score, "loaded high score");

        let session = engine.reset(high_score);

        Self {
            engine,
            session,
            input: InputController::new(),
            store,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// Route a key press to the input rules; true if the host should consume it
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.session.is_game_over() {
            return key.is_steering();
        }
        self.input.press(self.session.direction(), key)
    }

    /// Advance the session by one tick
    pub fn tick(&mut self) -> StepInfo {
        if self.session.is_game_over() {
            return StepInfo::default();
        }

        let direction = self.input.take(self.session.direction());
        let result = self.engine.step(&self.session, direction);
        self.session = result.session;

        if let Some(reason) = result.info.game_over {
            info!(score = self.session.score, ?reason, "game over");
        }
        if let Some(high_score) = result.info.new_high_score {
            info!(high_score, "new high score");
            if let Err(err) = self.store.save(high_score) {
                warn!("Could not save high score: {err:#}");
            }
        }

        result.info
    }

    /// Throw the current session away and start over from the initial layout
    pub fn restart(&mut self) {
        let high_score = self.session.high_score;
        self.session = self.engine.reset(high_score);
        self.input.clear();
        info!(high_score, "session restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameOverReason, Position, Snake};
    use crate::storage::MemoryStore;
    use anyhow::{Result, bail};
    use std::sync::{Arc, Mutex};

    /// Records every save so tests can inspect what was persisted
    #[derive(Clone, Default)]
    struct SpyStore {
        initial: u32,
        saved: Arc<Mutex<Vec<u32>>>,
    }

    impl HighScoreStore for SpyStore {
        fn load(&self) -> Result<u32> {
            Ok(self.initial)
        }

        fn save(&mut self, high_score: u32) -> Result<()> {
            self.saved.lock().unwrap().push(high_score);
            Ok(())
        }
    }

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u32> {
            bail!("storage unavailable")
        }

        fn save(&mut self, _high_score: u32) -> Result<()> {
            bail!("storage unavailable")
        }
    }

    fn controller(store: Box<dyn HighScoreStore>) -> GameController {
        GameController::new(GameEngine::seeded(GameConfig::default(), 11), store)
    }

    /// Replace the session with a three-segment snake heading right that has
    /// already eaten `score` times
    fn with_long_snake(controller: &mut GameController, score: u32) {
        let mut session = GameSession::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(12, 12),
            18,
            80,
            controller.session.high_score,
        );
        session.score = score;
        controller.session = session;
    }

    /// Replace the session with a hooked snake heading up whose tail sits
    /// just left of the head, then record `score` meals
    fn with_hooked_snake(controller: &mut GameController, score: u32) {
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(4, 6),
                Position::new(4, 5),
            ],
            Direction::Up,
        );
        let mut session = GameSession::new(
            snake,
            Position::new(12, 12),
            18,
            80,
            controller.session.high_score,
        );
        session.score = score;
        controller.session = session;
    }

    /// Turn left into the tail
    fn crash(controller: &mut GameController) -> StepInfo {
        controller.handle_key(Key::ArrowLeft);
        controller.tick()
    }

    #[test]
    fn test_starts_with_stored_high_score() {
        let store = SpyStore {
            initial: 6,
            ..Default::default()
        };
        let controller = controller(Box::new(store));

        assert_eq!(controller.session().high_score, 6);
        assert_eq!(controller.session().snake.body, vec![Position::new(2, 2)]);
    }

    #[test]
    fn test_unreadable_store_defaults_to_zero() {
        let controller = controller(Box::new(BrokenStore));
        assert_eq!(controller.session().high_score, 0);
    }

    #[test]
    fn test_ticks_without_input_go_straight() {
        let mut controller = controller(Box::new(MemoryStore::new()));

        for _ in 0..3 {
            controller.tick();
        }

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.snake, vec![Position::new(2, 5)]);
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_key_applies_on_next_tick() {
        let mut controller = controller(Box::new(MemoryStore::new()));

        assert!(controller.handle_key(Key::ArrowRight));
        assert_eq!(controller.session().direction(), Direction::Down);

        controller.tick();
        assert_eq!(controller.session().direction(), Direction::Right);
        assert_eq!(controller.session().snake.head(), Position::new(3, 2));
    }

    #[test]
    fn test_reverse_key_is_ignored() {
        let mut controller = controller(Box::new(MemoryStore::new()));

        controller.handle_key(Key::ArrowUp);
        controller.tick();

        assert_eq!(controller.session().direction(), Direction::Down);
        assert_eq!(controller.session().snake.head(), Position::new(2, 3));
    }

    #[test]
    fn test_quick_double_turn_cannot_reverse() {
        let mut controller = controller(Box::new(MemoryStore::new()));
        with_long_snake(&mut controller, 2);

        // Up is accepted; Left would reverse the applied Right and is dropped
        controller.handle_key(Key::ArrowUp);
        controller.handle_key(Key::ArrowLeft);
        let info = controller.tick();

        assert_eq!(info.game_over, None);
        assert_eq!(controller.session().snake.head(), Position::new(5, 4));
    }

    #[test]
    fn test_game_over_persists_new_high_score() {
        let store = SpyStore::default();
        let saved = Arc::clone(&store.saved);
        let mut controller = controller(Box::new(store));
        with_hooked_snake(&mut controller, 4);

        let info = crash(&mut controller);

        assert_eq!(info.game_over, Some(GameOverReason::SelfCollision));
        assert_eq!(info.new_high_score, Some(4));
        assert!(controller.is_game_over());
        assert_eq!(*saved.lock().unwrap(), vec![4]);
    }

    #[test]
    fn test_lower_score_is_not_saved() {
        let store = SpyStore {
            initial: 10,
            ..Default::default()
        };
        let saved = Arc::clone(&store.saved);
        let mut controller = controller(Box::new(store));
        with_hooked_snake(&mut controller, 3);

        crash(&mut controller);

        assert!(saved.lock().unwrap().is_empty());
        assert_eq!(controller.session().high_score, 10);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let mut controller = controller(Box::new(BrokenStore));
        with_hooked_snake(&mut controller, 2);

        let info = crash(&mut controller);

        assert_eq!(info.new_high_score, Some(2));
        assert_eq!(controller.session().high_score, 2);
    }

    #[test]
    fn test_game_over_freezes_session() {
        let mut controller = controller(Box::new(MemoryStore::new()));
        with_hooked_snake(&mut controller, 1);
        crash(&mut controller);
        let frozen = controller.session().clone();

        controller.handle_key(Key::ArrowDown);
        for _ in 0..5 {
            assert_eq!(controller.tick(), StepInfo::default());
        }

        assert_eq!(controller.session(), &frozen);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut controller = controller(Box::new(MemoryStore::new()));
        with_hooked_snake(&mut controller, 5);
        crash(&mut controller);

        controller.restart();

        let session = controller.session();
        assert!(session.is_alive);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 5);
        assert_eq!(session.snake.body, vec![Position::new(2, 2)]);
        assert_eq!(session.food, Position::new(5, 5));
        assert_eq!(session.direction(), Direction::Down);
    }

    #[test]
    fn test_high_score_tracks_best_across_sessions() {
        let mut controller = controller(Box::new(MemoryStore::new()));
        let mut best = 0;

        for score in [3, 1, 7, 2, 7, 4] {
            with_hooked_snake(&mut controller, score);
            crash(&mut controller);
            let high_score = controller.session().high_score;

            assert!(high_score >= best);
            best = best.max(score);
            assert_eq!(high_score, best);

            controller.restart();
        }
    }

    #[test]
    fn test_restart_drops_pending_turn() {
        let mut controller = controller(Box::new(MemoryStore::new()));
        controller.handle_key(Key::ArrowLeft);

        controller.restart();
        controller.tick();

        assert_eq!(controller.session().snake.head(), Position::new(2, 3));
    }
}
