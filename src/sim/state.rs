//! Game state and core simulation types
//!
//! Everything the per-frame step mutates lives here. The session owns its
//! entity collections and RNG outright so multiple instances can coexist
//! and tests stay deterministic.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start command
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Playfield dimensions in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

impl FieldSize {
    /// Validate environment-provided dimensions.
    ///
    /// Spawn bounds and clamping assume a positive, finite field, so bad
    /// dimensions are a configuration error reported to the caller.
    pub fn new(width: f32, height: f32) -> Result<Self, FieldError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FieldError { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Rejected playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldError {
    pub width: f32,
    pub height: f32,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field dimensions must be positive and finite, got {}x{}",
            self.width, self.height
        )
    }
}

impl std::error::Error for FieldError {}

/// The player's basket
#[derive(Debug, Clone)]
pub struct Basket {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Keyboard movement per frame
    pub speed: f32,
}

impl Basket {
    /// Basket centered horizontally, resting above the bottom edge
    pub fn new(field: FieldSize) -> Self {
        Self {
            pos: Vec2::new(
                field.width / 2.0 - BASKET_WIDTH / 2.0,
                field.height - BASKET_BOTTOM_OFFSET,
            ),
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
            speed: BASKET_SPEED,
        }
    }

    /// Move so the basket is centered on the given x
    pub fn center_on(&mut self, x: f32) {
        self.pos.x = x - self.width / 2.0;
    }
}

/// A falling ball
#[derive(Debug, Clone)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per frame, frozen at spawn time
    pub fall_speed: f32,
    /// Cosmetic HSL hue in [0, 360)
    pub hue: f32,
    /// Set when the catch test fires; guards against double-scoring
    pub caught: bool,
}

/// A burst particle (visual only, never collides)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// 1.0 at birth, removed at <= 0
    pub life: f32,
    pub decay: f32,
    pub hue: f32,
}

/// Frame events for the UI sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A ball was caught at `pos`; `score` is the new total
    Caught { pos: Vec2, score: u32 },
    /// A ball fell past the field; `lives` is the new total
    Missed { lives: i32 },
    /// Lives ran out; `score` is the final total
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: i32,
    /// Monotonically non-decreasing difficulty scalar
    pub game_speed: f32,
    /// Monotonically non-increasing, floored at SPAWN_INTERVAL_FLOOR_MS
    pub spawn_interval_ms: f64,
    /// Wall-clock ms of the last spawn (from TickInput::now_ms)
    pub last_spawn_ms: f64,
    pub field: FieldSize,
    pub basket: Basket,
    pub balls: Vec<Ball>,
    pub particles: Vec<Particle>,
    /// Events emitted during the most recent tick
    pub events: Vec<GameEvent>,
    /// Frames simulated since start
    pub frame: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session in the Start phase.
    ///
    /// Fails if the environment handed us unusable field dimensions.
    pub fn new(field: FieldSize, seed: u64) -> Result<Self, FieldError> {
        // Re-validate in case the caller built the size before the
        // environment resized to garbage.
        let field = FieldSize::new(field.width, field.height)?;
        Ok(Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            lives: START_LIVES,
            game_speed: 1.0,
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            last_spawn_ms: 0.0,
            field,
            basket: Basket::new(field),
            balls: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Begin (or restart) a run: reset every counter and collection together,
    /// then enter Playing. `now_ms` anchors the spawn timer.
    pub fn start(&mut self, now_ms: f64) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = START_LIVES;
        self.game_speed = 1.0;
        self.spawn_interval_ms = SPAWN_INTERVAL_START_MS;
        self.last_spawn_ms = now_ms;
        self.basket = Basket::new(self.field);
        self.balls.clear();
        self.particles.clear();
        self.events.clear();
        self.frame = 0;
    }
}

/// Tiered end-of-run message for the game-over screen
pub fn rating_message(score: u32) -> &'static str {
    if score >= 500 {
        "Incredible! You are a basket master!"
    } else if score >= 300 {
        "Great job! You have excellent reflexes!"
    } else if score >= 150 {
        "Not bad! Keep practicing to improve!"
    } else {
        "Good try! You'll do better next time!"
    }
}
