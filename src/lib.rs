//! Basket Drop - a catch-the-falling-balls arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input resolution, spawning, collisions, game state)
//! - `renderer`: Canvas2D drawing layer (wasm32 only)
//! - `settings`: Persisted player preferences
//! - `highscores`: Persisted top-10 leaderboard

pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default playfield size in canvas pixels
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Basket defaults - sits near the bottom edge of the field
    pub const BASKET_WIDTH: f32 = 80.0;
    pub const BASKET_HEIGHT: f32 = 40.0;
    /// Distance from the field bottom to the basket top
    pub const BASKET_BOTTOM_OFFSET: f32 = 60.0;
    /// Keyboard movement speed (pixels per frame)
    pub const BASKET_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Fall speed = BALL_BASE_SPEED + game_speed * BALL_SPEED_FACTOR, frozen at spawn
    pub const BALL_BASE_SPEED: f32 = 2.0;
    pub const BALL_SPEED_FACTOR: f32 = 0.5;

    /// Score awarded per catch
    pub const CATCH_SCORE: u32 = 10;
    /// Lives at session start
    pub const START_LIVES: i32 = 3;

    /// Particles per catch burst
    pub const BURST_SIZE: usize = 8;
    /// Life lost per frame for burst particles
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Maximum absolute particle velocity component (pixels per frame)
    pub const PARTICLE_KICK: f32 = 5.0;

    /// A pointer source older than this is ignored
    pub const POINTER_FRESH_MS: f64 = 1000.0;

    /// Spawner pacing
    pub const SPAWN_INTERVAL_START_MS: f64 = 2000.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f64 = 800.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 5.0;
    /// Game speed gained per spawned ball, uncapped
    pub const GAME_SPEED_STEP: f32 = 0.001;
}
