//! Canvas2D rendering module
//!
//! Pure presentation: reads the game state each frame and draws it. Nothing
//! here feeds back into the simulation.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::Settings;
use crate::sim::{Ball, Basket, GameState, Particle};

/// Canvas2D drawing layer bound to one canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw one frame
    pub fn render(&self, state: &GameState, settings: &Settings) -> Result<(), JsValue> {
        self.draw_background(state.frame, settings.background_motion())?;
        self.draw_basket(&state.basket)?;
        for ball in &state.balls {
            self.draw_ball(ball)?;
        }
        if settings.particles {
            for particle in &state.particles {
                self.draw_particle(particle)?;
            }
        }
        Ok(())
    }

    /// Sky-to-grass gradient with drifting cloud puffs.
    ///
    /// Clouds animate from the frame counter so rendering stays a pure
    /// function of state.
    fn draw_background(&self, frame: u64, motion: bool) -> Result<(), JsValue> {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        gradient.add_color_stop(0.0, "#87CEEB")?;
        gradient.add_color_stop(1.0, "#98FB98")?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        self.ctx.set_fill_style_str("rgba(255,255,255,0.3)");
        let t = if motion { frame as f64 / 60.0 } else { 0.0 };
        for i in 0..5 {
            let x = (t * 20.0 + i as f64 * 160.0) % (self.width + 100.0) - 50.0;
            let y = 50.0 + (t + i as f64).sin() * 20.0;
            self.ctx.begin_path();
            self.ctx.arc(x, y, 30.0, 0.0, TAU)?;
            self.ctx.arc(x + 20.0, y, 40.0, 0.0, TAU)?;
            self.ctx.arc(x + 40.0, y, 30.0, 0.0, TAU)?;
            self.ctx.fill();
        }
        Ok(())
    }

    /// Wooden basket: vertical gradient body, darker rim, four slats
    fn draw_basket(&self, basket: &Basket) -> Result<(), JsValue> {
        let x = basket.pos.x as f64;
        let y = basket.pos.y as f64;
        let w = basket.width as f64;
        let h = basket.height as f64;

        let gradient = self.ctx.create_linear_gradient(x, y, x, y + h);
        gradient.add_color_stop(0.0, "#8B4513")?;
        gradient.add_color_stop(1.0, "#A0522D")?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x, y, w, h);

        self.ctx.set_fill_style_str("#654321");
        self.ctx.fill_rect(x, y, w, 5.0);

        self.ctx.set_stroke_style_str("#654321");
        self.ctx.set_line_width(2.0);
        for i in 0..4 {
            let sx = x + w / 4.0 * i as f64;
            self.ctx.begin_path();
            self.ctx.move_to(sx, y);
            self.ctx.line_to(sx, y + h);
            self.ctx.stroke();
        }
        Ok(())
    }

    /// Shaded sphere: drop shadow, radial gradient, specular highlight
    fn draw_ball(&self, ball: &Ball) -> Result<(), JsValue> {
        let x = ball.pos.x as f64;
        let y = ball.pos.y as f64;
        let r = ball.radius as f64;

        self.ctx.set_fill_style_str("rgba(0,0,0,0.2)");
        self.ctx.begin_path();
        self.ctx.ellipse(x + 2.0, y + 2.0, r, r * 0.8, 0.0, 0.0, TAU)?;
        self.ctx.fill();

        let gradient = self
            .ctx
            .create_radial_gradient(x - 5.0, y - 5.0, 0.0, x, y, r)?;
        gradient.add_color_stop(0.0, "white")?;
        gradient.add_color_stop(0.3, &hsl(ball.hue))?;
        gradient.add_color_stop(1.0, "black")?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, TAU)?;
        self.ctx.fill();

        self.ctx.set_fill_style_str("rgba(255,255,255,0.6)");
        self.ctx.begin_path();
        self.ctx.arc(x - 5.0, y - 5.0, r * 0.3, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    /// Small dot fading with remaining life
    fn draw_particle(&self, particle: &Particle) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.set_global_alpha(particle.life as f64);
        self.ctx.set_fill_style_str(&hsl(particle.hue));
        self.ctx.begin_path();
        self.ctx
            .arc(particle.pos.x as f64, particle.pos.y as f64, 3.0, 0.0, TAU)?;
        self.ctx.fill();
        self.ctx.restore();
        Ok(())
    }
}

/// CSS color for a cosmetic hue tag
fn hsl(hue: f32) -> String {
    format!("hsl({:.0},70%,60%)", hue)
}
