//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame advancement only (no scheduled timers)
//! - Seeded RNG only
//! - Wall-clock readings enter solely through `TickInput`
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ball_hits_basket, ball_missed};
pub use input::{ControlSource, PointerSample, TickInput, resolve_source, steer_basket};
pub use spawn::try_spawn;
pub use state::{
    Ball, Basket, FieldError, FieldSize, GameEvent, GamePhase, GameState, Particle,
    rating_message,
};
pub use tick::tick;
