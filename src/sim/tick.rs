//! Per-frame simulation step
//!
//! Advances the session deterministically: resolve input, maybe spawn, move
//! balls and settle catches/misses, then age particles. All positions move in
//! pixels per frame; wall-clock time only enters through `TickInput::now_ms`
//! for spawn gating and pointer staleness.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::collision::{ball_hits_basket, ball_missed};
use super::input::{TickInput, steer_basket};
use super::spawn::try_spawn;
use super::state::{GameEvent, GamePhase, GameState, Particle};

/// Advance the game state by one frame. No-op outside Playing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;
    state.events.clear();

    steer_basket(&mut state.basket, input, state.field.width);
    try_spawn(state, input.now_ms);
    update_balls(state);
    update_particles(state);
}

/// Advance every ball, resolving catches and misses.
///
/// Reverse index traversal keeps removal mid-pass safe without skipping
/// elements. The pass runs to completion even after a game-over flip, so a
/// frame with several misses still charges exactly one life per miss.
fn update_balls(state: &mut GameState) {
    let mut i = state.balls.len();
    while i > 0 {
        i -= 1;

        state.balls[i].pos.y += state.balls[i].fall_speed;

        if !state.balls[i].caught && ball_hits_basket(&state.balls[i], &state.basket) {
            state.balls[i].caught = true;
            state.score += CATCH_SCORE;
            let ball = state.balls.remove(i);
            spawn_burst(state, ball.pos, ball.hue);
            state.events.push(GameEvent::Caught {
                pos: ball.pos,
                score: state.score,
            });
            continue;
        }

        if ball_missed(&state.balls[i], state.field.height) {
            state.balls.remove(i);
            state.lives -= 1;
            state.events.push(GameEvent::Missed { lives: state.lives });
            if state.lives <= 0 && state.phase == GamePhase::Playing {
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::GameOver { score: state.score });
            }
        }
    }
}

/// Emit a fixed-size particle burst at a caught ball's last position.
fn spawn_burst(state: &mut GameState, pos: Vec2, hue: f32) {
    for _ in 0..BURST_SIZE {
        let vel = Vec2::new(
            state.rng.random_range(-PARTICLE_KICK..PARTICLE_KICK),
            state.rng.random_range(-PARTICLE_KICK..PARTICLE_KICK),
        );
        state.particles.push(Particle {
            pos,
            vel,
            life: 1.0,
            decay: PARTICLE_DECAY,
            hue,
        });
    }
}

fn update_particles(state: &mut GameState) {
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life -= p.decay;
    }
    state.particles.retain(|p| p.life > 0.0);
}
