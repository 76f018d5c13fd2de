//! Drawing-surface geometry in device pixels.

use bevy::math::Vec2;
use bevy::window::Window;

/// Size of the drawing surface.
///
/// `css_width`/`css_height` are logical (CSS) pixels; the particle field works
/// in device pixels, i.e. logical size × capped device pixel ratio, floored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub css_width: f32,
    pub css_height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// `device_pixel_ratio` is capped at `max_dpr` (itself at least 1) and
    /// kept as-is below that, fractional ratios included.  Non-finite or
    /// non-positive ratios are treated as 1.
    pub fn new(css_width: f32, css_height: f32, device_pixel_ratio: f32, max_dpr: f32) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(max_dpr.max(1.0))
        } else {
            1.0
        };
        Self {
            css_width: css_width.max(0.0),
            css_height: css_height.max(0.0),
            device_pixel_ratio: dpr,
        }
    }

    pub fn from_window(window: &Window, max_dpr: f32) -> Self {
        Self::new(window.width(), window.height(), window.scale_factor(), max_dpr)
    }

    /// Surface width in device pixels.
    pub fn width(&self) -> f32 {
        (self.css_width * self.device_pixel_ratio).floor()
    }

    /// Surface height in device pixels.
    pub fn height(&self) -> f32 {
        (self.css_height * self.device_pixel_ratio).floor()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// `true` if `p` lies inside the surface grown by `margin` on every side.
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin
            && p.x <= self.width() + margin
            && p.y >= -margin
            && p.y <= self.height() + margin
    }

    /// Convert a device-pixel point (origin top-left, y down) into Bevy 2D
    /// world space (origin centre, y up, logical pixels).
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        let dpr = self.device_pixel_ratio;
        Vec2::new(
            p.x / dpr - self.css_width * 0.5,
            self.css_height * 0.5 - p.y / dpr,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0, 2.0)
    }
}
