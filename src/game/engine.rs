use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    config::GameConfig,
    direction::Direction,
    food::place_food,
    state::{GameOverReason, GameSession},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Set on the step that ended the session
    pub game_over: Option<GameOverReason>,
    /// The new best score, if this step raised it
    pub new_high_score: Option<u32>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// The session after the step
    pub session: GameSession,
    /// What happened during the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// The engine owns the configuration and the random source used for food
/// placement. It performs no I/O: every transition takes a session by
/// reference and hands back a new one.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh session in the canonical starting layout
    pub fn reset(&self, high_score: u32) -> GameSession {
        GameSession::initial(&self.config, high_score)
    }

    /// Advance `session` by one tick, moving in `direction`
    ///
    /// A session that is already over comes back unchanged.
    pub fn step(&mut self, session: &GameSession, direction: Direction) -> StepResult {
        let mut next = session.clone();

        if !session.is_alive {
            return StepResult {
                session: next,
                info: StepInfo::default(),
            };
        }

        let new_head = session.snake.head().stepped(direction, session.grid_size);

        // The tail has not moved out of the way yet, so it counts too
        if session.snake.occupies(new_head) {
            let info = Self::finish(&mut next, GameOverReason::SelfCollision);
            return StepResult {
                session: next,
                info,
            };
        }

        let ate_food = new_head == session.food;
        if !ate_food {
            next.snake.body.pop();
        }
        next.snake.body.insert(0, new_head);
        next.snake.direction = direction;

        if ate_food {
            next.score += 1;
            debug!(score = next.score, at = %new_head, "food eaten");

            match place_food(&mut self.rng, next.grid_size, &next.snake.body) {
                Some(food) => next.food = food,
                None => {
                    let mut info = Self::finish(&mut next, GameOverReason::BoardFull);
                    info.ate_food = true;
                    return StepResult {
                        session: next,
                        info,
                    };
                }
            }
        }

        StepResult {
            session: next,
            info: StepInfo {
                ate_food,
                game_over: None,
                new_high_score: None,
            },
        }
    }

    fn finish(session: &mut GameSession, reason: GameOverReason) -> StepInfo {
        session.is_alive = false;
        session.game_over = Some(reason);

        let new_high_score = (session.score > session.high_score).then(|| {
            session.high_score = session.score;
            session.score
        });

        StepInfo {
            ate_food: false,
            game_over: Some(reason),
            new_high_score,
        }
    }
}
