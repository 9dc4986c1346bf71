//! Per-frame input aggregation
//!
//! The frontend collects raw key/pointer signals between frames; the sim
//! reduces them to one horizontal basket move per tick. Resolution order is
//! keyboard, then touch, then mouse, with pointer sources ignored once their
//! last update is older than [`POINTER_FRESH_MS`].

use crate::consts::*;

use super::state::Basket;

/// A pointer reading with its observation time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Horizontal position in canvas coordinates
    pub x: f32,
    /// Wall-clock ms when the reading was observed
    pub at_ms: f64,
}

impl PointerSample {
    fn is_fresh(&self, now_ms: f64) -> bool {
        now_ms - self.at_ms < POINTER_FRESH_MS
    }
}

/// Input for a single tick, assembled by the loop driver
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock ms for this frame; drives spawn gating and staleness
    pub now_ms: f64,
    /// A left-movement key is held
    pub left: bool,
    /// A right-movement key is held
    pub right: bool,
    /// Most recent mouse position, if any was ever observed
    pub mouse: Option<PointerSample>,
    /// Most recent touch position, if any was ever observed
    pub touch: Option<PointerSample>,
}

/// Which source controls the basket this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    Keyboard,
    Touch,
    Mouse,
    /// No key held and no fresh pointer; the basket stays put
    Idle,
}

/// Ordered resolution policy: keyboard preempts pointers regardless of
/// pointer recency; touch beats mouse among fresh pointers.
pub fn resolve_source(input: &TickInput) -> ControlSource {
    if input.left || input.right {
        return ControlSource::Keyboard;
    }
    if let Some(touch) = input.touch {
        if touch.is_fresh(input.now_ms) {
            return ControlSource::Touch;
        }
    }
    if let Some(mouse) = input.mouse {
        if mouse.is_fresh(input.now_ms) {
            return ControlSource::Mouse;
        }
    }
    ControlSource::Idle
}

/// Apply this frame's resolved input to the basket, then clamp into the field.
///
/// Holding both movement keys applies left then right, so the basket does not
/// move that frame.
pub fn steer_basket(basket: &mut Basket, input: &TickInput, field_width: f32) {
    match resolve_source(input) {
        ControlSource::Keyboard => {
            if input.left {
                basket.pos.x -= basket.speed;
            }
            if input.right {
                basket.pos.x += basket.speed;
            }
        }
        ControlSource::Touch => {
            // resolve_source only returns Touch when the sample exists
            if let Some(touch) = input.touch {
                basket.center_on(touch.x);
            }
        }
        ControlSource::Mouse => {
            if let Some(mouse) = input.mouse {
                basket.center_on(mouse.x);
            }
        }
        ControlSource::Idle => {}
    }

    // max(0.0) keeps the clamp well-formed on fields narrower than the basket
    basket.pos.x = basket.pos.x.clamp(0.0, (field_width - basket.width).max(0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FieldSize;
    use proptest::prelude::*;

    fn test_basket() -> Basket {
        Basket::new(FieldSize::new(800.0, 600.0).unwrap())
    }

    #[test]
    fn test_keyboard_preempts_fresh_pointers() {
        let input = TickInput {
            now_ms: 5000.0,
            left: true,
            right: false,
            mouse: Some(PointerSample { x: 100.0, at_ms: 4900.0 }),
            touch: Some(PointerSample { x: 700.0, at_ms: 4950.0 }),
        };
        assert_eq!(resolve_source(&input), ControlSource::Keyboard);
    }

    #[test]
    fn test_fresh_touch_beats_fresh_mouse() {
        let input = TickInput {
            now_ms: 5000.0,
            mouse: Some(PointerSample { x: 100.0, at_ms: 4990.0 }),
            touch: Some(PointerSample { x: 700.0, at_ms: 4100.0 }),
            ..Default::default()
        };
        assert_eq!(resolve_source(&input), ControlSource::Touch);
    }

    #[test]
    fn test_stale_touch_falls_back_to_mouse() {
        // Touch last updated 1200ms ago, mouse 500ms ago: the basket
        // follows the mouse.
        let mut basket = test_basket();
        let input = TickInput {
            now_ms: 5000.0,
            mouse: Some(PointerSample { x: 100.0, at_ms: 4500.0 }),
            touch: Some(PointerSample { x: 700.0, at_ms: 3800.0 }),
            ..Default::default()
        };
        assert_eq!(resolve_source(&input), ControlSource::Mouse);

        steer_basket(&mut basket, &input, 800.0);
        assert_eq!(basket.pos.x, 100.0 - basket.width / 2.0);
    }

    #[test]
    fn test_all_stale_leaves_basket_unchanged() {
        let mut basket = test_basket();
        let start_x = basket.pos.x;
        let input = TickInput {
            now_ms: 10_000.0,
            mouse: Some(PointerSample { x: 100.0, at_ms: 1000.0 }),
            touch: Some(PointerSample { x: 700.0, at_ms: 1000.0 }),
            ..Default::default()
        };
        assert_eq!(resolve_source(&input), ControlSource::Idle);

        steer_basket(&mut basket, &input, 800.0);
        assert_eq!(basket.pos.x, start_x);
    }

    #[test]
    fn test_keyboard_left_ten_frames() {
        // Basket width 80, field 800, speed 8: ten frames of left moves 80px.
        let mut basket = test_basket();
        let start_x = basket.pos.x;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            steer_basket(&mut basket, &input, 800.0);
        }
        assert_eq!(basket.pos.x, start_x - 80.0);
    }

    #[test]
    fn test_keyboard_clamps_at_left_edge() {
        let mut basket = test_basket();
        basket.pos.x = 4.0;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        steer_basket(&mut basket, &input, 800.0);
        assert_eq!(basket.pos.x, 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut basket = test_basket();
        let start_x = basket.pos.x;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        steer_basket(&mut basket, &input, 800.0);
        assert_eq!(basket.pos.x, start_x);
    }

    #[test]
    fn test_pointer_target_is_clamped() {
        let mut basket = test_basket();
        let input = TickInput {
            now_ms: 100.0,
            touch: Some(PointerSample { x: 795.0, at_ms: 50.0 }),
            ..Default::default()
        };
        steer_basket(&mut basket, &input, 800.0);
        assert_eq!(basket.pos.x, 800.0 - basket.width);
    }

    proptest! {
        #[test]
        fn prop_basket_stays_in_field(
            start_x in -200.0f32..1000.0,
            left: bool,
            right: bool,
            mouse_x in -100.0f32..900.0,
            touch_x in -100.0f32..900.0,
            mouse_age in 0.0f64..3000.0,
            touch_age in 0.0f64..3000.0,
        ) {
            let now_ms = 10_000.0;
            let mut basket = test_basket();
            basket.pos.x = start_x;
            let input = TickInput {
                now_ms,
                left,
                right,
                mouse: Some(PointerSample { x: mouse_x, at_ms: now_ms - mouse_age }),
                touch: Some(PointerSample { x: touch_x, at_ms: now_ms - touch_age }),
            };
            steer_basket(&mut basket, &input, 800.0);
            prop_assert!(basket.pos.x >= 0.0);
            prop_assert!(basket.pos.x <= 800.0 - basket.width);
        }
    }
}
