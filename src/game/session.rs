use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Instant;

use super::{
    cell::Direction,
    clock::TickGate,
    config::GameConfig,
    error::GameError,
    food::Food,
    geometry::GridGeometry,
    snake::Snake,
};

/// Text shown while the game waits for a restart
pub const GAME_OVER_MESSAGE: &str = "Game Over!\nPress Space to Restart!\nPress Esc to Close the Game!";

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// What a call to [`GameSession::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved: the game is over or no tick was due
    Idle,
    /// The snake moved
    Moved,
    /// The snake moved onto the food and will grow
    Ate,
    /// A collision ended the game; the session is already reset
    GameOver {
        cause: CollisionType,
        final_score: u32,
    },
}

/// One running game: the snake, its food, the score and the game-over state
pub struct GameSession<R = StdRng> {
    geometry: GridGeometry,
    snake: Snake,
    food: Food,
    score: u32,
    running: bool,
    message: Option<&'static str>,
    tick_gate: TickGate,
    rng: R,
}

impl GameSession<StdRng> {
    /// Create a session with an entropy-seeded generator
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a session whose food placement is reproducible
    pub fn seeded(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(config: &GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate().map_err(GameError::InvalidConfig)?;

        let geometry = config.geometry;
        let snake = Snake::new(config.initial_body.clone(), config.initial_direction);
        let food = Food::spawn(&snake, &geometry, &mut rng)?;

        Ok(Self {
            geometry,
            snake,
            food,
            score: 0,
            running: true,
            message: None,
            tick_gate: TickGate::new(config.tick_interval()),
            rng,
        })
    }

    /// Run one tick if the tick interval has elapsed at `now`
    ///
    /// Intended to be called every frame. The gate is only consulted while
    /// running, so a finished game does not bank ticks.
    pub fn advance(&mut self, now: Instant) -> Result<TickOutcome, GameError> {
        if !self.running || !self.tick_gate.is_due(now) {
            return Ok(TickOutcome::Idle);
        }
        self.update()
    }

    /// Execute one tick of the game
    pub fn update(&mut self) -> Result<TickOutcome, GameError> {
        if !self.running {
            return Ok(TickOutcome::Idle);
        }

        self.snake.advance();
        let ate = self.eat_food()?;

        if let Some(cause) = self.detect_collision() {
            let final_score = self.score;
            self.game_over(cause)?;
            return Ok(TickOutcome::GameOver { cause, final_score });
        }

        Ok(if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        })
    }

    /// Turn the snake; refused turns return false
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    /// Leave the game-over screen and start playing again
    ///
    /// The board was already reset when the game ended. The first move comes
    /// one full tick interval after the next `advance`.
    pub fn resume(&mut self) {
        if self.running {
            return;
        }
        info!("Game resumed");
        self.running = true;
        self.message = None;
        self.tick_gate.rearm();
    }

    fn eat_food(&mut self) -> Result<bool, GameError> {
        if self.snake.head() != self.food.position() {
            return Ok(false);
        }

        self.food
            .relocate(&self.snake, &self.geometry, &mut self.rng)?;
        self.snake.grow();
        self.score += 1;
        debug!(
            "Ate food at {:?}, score {}, next food at {:?}",
            self.snake.head(),
            self.score,
            self.food.position()
        );
        Ok(true)
    }

    /// First collision rule that fires for the current head, wall first
    fn detect_collision(&self) -> Option<CollisionType> {
        if !self.geometry.contains(self.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if self.snake.bites_itself() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn game_over(&mut self, cause: CollisionType) -> Result<(), GameError> {
        info!(
            "Game over ({:?}) at {:?} with score {}",
            cause,
            self.snake.head(),
            self.score
        );

        self.message = Some(GAME_OVER_MESSAGE);
        self.snake.reset();
        // Only after the reset, or the food could land under the new body
        self.food
            .relocate(&self.snake, &self.geometry, &mut self.rng)?;
        self.running = false;
        self.score = 0;
        Ok(())
    }
}

impl<R> GameSession<R> {
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pending game-over text, if the game is waiting for a restart
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }
}
