//! Per-frame update and draw pass over the particle pool.
//!
//! [`advance_frame`] is the whole render loop body.  It is surface-agnostic:
//! the Bevy app passes a [`DrawList`] that the render systems turn into
//! meshes, and tests pass a recording surface.

use crate::field::{ParticleField, ParticleMode};
use crate::theme::Rgb;
use crate::viewport::Viewport;
use bevy::math::Vec2;
use bevy::prelude::Resource;

/// Something a frame can be painted onto.
pub trait Surface {
    /// Clear the surface; called once at the start of every frame.
    fn begin_frame(&mut self, viewport: &Viewport);
    /// Full-viewport fill drawn before any particle.
    fn fill_haze(&mut self, color: Rgb, alpha: f32);
    /// One filled circle in device pixels.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32);
}

/// A circle queued by the frame pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub alpha: f32,
}

/// Retained draw commands for the current frame.
///
/// `circles` keeps its allocation across frames.
#[derive(Resource, Debug, Default)]
pub struct DrawList {
    pub viewport: Viewport,
    pub haze: Option<(Rgb, f32)>,
    pub circles: Vec<DrawCircle>,
}

impl Surface for DrawList {
    fn begin_frame(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        self.haze = None;
        self.circles.clear();
    }

    fn fill_haze(&mut self, color: Rgb, alpha: f32) {
        self.haze = Some((color, alpha));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        self.circles.push(DrawCircle {
            center,
            radius,
            color,
            alpha,
        });
    }
}

/// Advance every particle by one frame and draw it onto `surface`.
///
/// Burst particles fly straight and fade slightly; on their
/// `burst_frames`-th frame they settle into drift.  Drift particles swirl
/// around the origin and fade linearly over their lifetime; expired or
/// escaped ones are respawned in place, so the pool length never changes here.
pub fn advance_frame(field: &mut ParticleField, accent: Rgb, surface: &mut impl Surface) {
    let viewport = *field.viewport();
    let origin = field.origin();
    let margin = field.respawn_margin();
    let burst_fade = field.config().burst_fade;
    let swirl_scale = field.config().swirl_scale;

    surface.begin_frame(&viewport);
    surface.fill_haze(accent, field.config().haze_alpha);

    for i in 0..field.len() {
        let p = &mut field.particles_mut()[i];
        p.age += 1;

        match p.mode {
            ParticleMode::Burst => {
                p.position += p.velocity;
                let t = (p.age as f32 / p.burst_frames as f32).min(1.0);
                let alpha = (p.base_alpha * (1.0 - t * burst_fade)).max(0.0);
                surface.fill_circle(p.position, p.radius, accent, alpha);

                if p.age >= p.burst_frames {
                    field.settle(i);
                }
            }
            ParticleMode::Drift => {
                let offset = p.position - origin;
                p.velocity += offset.perp() * p.swirl * swirl_scale;
                p.position += p.velocity;

                let fade = 1.0 - p.age as f32 / p.max_age as f32;
                let alpha = (p.base_alpha * fade.min(1.0)).clamp(0.0, p.base_alpha);
                surface.fill_circle(p.position, p.radius, accent, alpha);

                if p.age > p.max_age || !viewport.contains_with_margin(p.position, margin) {
                    field.respawn(i);
                }
            }
        }
    }
}
