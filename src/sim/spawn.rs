//! Time-gated ball spawner
//!
//! At most one ball per tick, once the elapsed time since the last spawn
//! exceeds the current interval. Every spawn also ratchets the difficulty:
//! the interval shrinks toward its floor and the game speed grows without
//! bound. A ball's fall speed is fixed from the game speed at creation.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::state::{Ball, GameState};

/// Spawn a ball if the interval has elapsed. Returns true on spawn.
pub fn try_spawn(state: &mut GameState, now_ms: f64) -> bool {
    if now_ms - state.last_spawn_ms <= state.spawn_interval_ms {
        return false;
    }

    // One-radius margin from each side edge
    let min_x = BALL_RADIUS;
    let max_x = state.field.width - BALL_RADIUS;
    let x = if max_x > min_x {
        state.rng.random_range(min_x..max_x)
    } else {
        // Field narrower than a ball; degenerate but still playable
        state.field.width / 2.0
    };
    let hue = state.rng.random_range(0.0..360.0);

    state.balls.push(Ball {
        // Center one radius above the top edge, fully out of view
        pos: Vec2::new(x, -BALL_RADIUS),
        radius: BALL_RADIUS,
        fall_speed: BALL_BASE_SPEED + state.game_speed * BALL_SPEED_FACTOR,
        hue,
        caught: false,
    });
    state.last_spawn_ms = now_ms;

    state.spawn_interval_ms =
        (state.spawn_interval_ms - SPAWN_INTERVAL_STEP_MS).max(SPAWN_INTERVAL_FLOOR_MS);
    state.game_speed += GAME_SPEED_STEP;

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FieldSize;
    use proptest::prelude::*;

    fn playing_state(seed: u64) -> GameState {
        let field = FieldSize::new(800.0, 600.0).unwrap();
        let mut state = GameState::new(field, seed).unwrap();
        state.start(0.0);
        state
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let mut state = playing_state(1);
        assert!(!try_spawn(&mut state, 2000.0));
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = playing_state(1);
        assert!(try_spawn(&mut state, 2001.0));
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.last_spawn_ms, 2001.0);

        // Gate re-arms against the new timestamp
        assert!(!try_spawn(&mut state, 2500.0));
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_fall_speed_frozen_from_game_speed() {
        let mut state = playing_state(1);
        assert!(try_spawn(&mut state, 2001.0));
        // game_speed was 1.0 at creation time
        assert_eq!(state.balls[0].fall_speed, 2.5);

        state.game_speed = 4.0;
        // Already-spawned ball keeps its speed
        assert_eq!(state.balls[0].fall_speed, 2.5);
    }

    #[test]
    fn test_difficulty_ramps_monotonically() {
        let mut state = playing_state(2);
        let mut now = 0.0;
        let mut last_interval = state.spawn_interval_ms;
        let mut last_speed = state.game_speed;

        // Enough spawns to walk the interval from 2000 down past its floor
        for _ in 0..400 {
            now += state.spawn_interval_ms + 1.0;
            assert!(try_spawn(&mut state, now));
            assert!(state.spawn_interval_ms <= last_interval);
            assert!(state.game_speed >= last_speed);
            assert!(state.spawn_interval_ms >= SPAWN_INTERVAL_FLOOR_MS);
            last_interval = state.spawn_interval_ms;
            last_speed = state.game_speed;
        }
        assert_eq!(state.spawn_interval_ms, SPAWN_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn test_spawn_starts_above_field() {
        let mut state = playing_state(3);
        assert!(try_spawn(&mut state, 2001.0));
        assert_eq!(state.balls[0].pos.y, -BALL_RADIUS);
        assert!(!state.balls[0].caught);
    }

    proptest! {
        #[test]
        fn prop_spawn_x_respects_margins(seed in 0u64..10_000) {
            let mut state = playing_state(seed);
            prop_assert!(try_spawn(&mut state, 2001.0));
            let ball = &state.balls[0];
            prop_assert!(ball.pos.x >= BALL_RADIUS);
            prop_assert!(ball.pos.x <= state.field.width - BALL_RADIUS);
            prop_assert!(ball.hue >= 0.0 && ball.hue < 360.0);
        }
    }
}
