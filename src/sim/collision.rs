//! Catch and miss geometry
//!
//! The catch test treats the ball as its axis-aligned bounding square and
//! overlaps it against the basket rectangle; the miss test fires once the
//! ball's top edge has passed the field bottom.

use super::state::{Ball, Basket};

/// Does the ball's bounding square overlap the basket rectangle?
pub fn ball_hits_basket(ball: &Ball, basket: &Basket) -> bool {
    ball.pos.x + ball.radius > basket.pos.x
        && ball.pos.x - ball.radius < basket.pos.x + basket.width
        && ball.pos.y + ball.radius > basket.pos.y
        && ball.pos.y - ball.radius < basket.pos.y + basket.height
}

/// Has the ball fallen entirely below the playable field?
pub fn ball_missed(ball: &Ball, field_height: f32) -> bool {
    ball.pos.y - ball.radius > field_height
}
