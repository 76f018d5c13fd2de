//! Compile-time defaults for every particle-field tuning value.
//!
//! These are the authoritative defaults behind [`crate::config::FieldConfig`].
//! `assets/particles.toml` may override any of them at startup; keep the file
//! and this module in sync when retuning.
//!
//! All distances and speeds are in device pixels (CSS pixels × device pixel
//! ratio) and all durations are in frames.

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Viewports at or below this CSS width use the mobile profile.
pub const MOBILE_MAX_WIDTH: f32 = 720.0;

/// Device pixel ratios above this are clamped to keep fill cost bounded.
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;

/// Respawn margin around the viewport, multiplied by the device pixel ratio.
pub const RESPAWN_MARGIN: f32 = 140.0;

// ── Origin ("hero" anchor) ────────────────────────────────────────────────────

/// Horizontal origin as a fraction of the viewport width.
pub const ORIGIN_X: f32 = 0.5;

/// Vertical origin as a fraction of the viewport height (desktop).
pub const DESKTOP_ORIGIN_Y: f32 = 0.26;

/// Vertical origin as a fraction of the viewport height (mobile).
pub const MOBILE_ORIGIN_Y: f32 = 0.30;

// ── Haze ──────────────────────────────────────────────────────────────────────

/// Alpha of the full-viewport accent fill drawn under the particles.
pub const HAZE_ALPHA: f32 = 0.09;

// ── Population ────────────────────────────────────────────────────────────────

pub const DESKTOP_BASE_COUNT: usize = 50;
pub const MOBILE_BASE_COUNT: usize = 22;

pub const DESKTOP_BURST_COUNT: usize = 220;
pub const MOBILE_BURST_COUNT: usize = 120;

/// Hard cap on the pool; a burst evicts the oldest entries beyond it.
pub const DESKTOP_POOL_CAP: usize = 420;
pub const MOBILE_POOL_CAP: usize = 220;

// ── Burst motion ──────────────────────────────────────────────────────────────

/// Frames a burst particle flies ballistically before settling into drift.
pub const DESKTOP_BURST_FRAMES: u32 = 120;
pub const MOBILE_BURST_FRAMES: u32 = 90;

/// Burst launch speed range (px/frame before dpr scaling).
pub const DESKTOP_BURST_SPEED_MIN: f32 = 2.8;
pub const DESKTOP_BURST_SPEED_MAX: f32 = 4.6;
pub const MOBILE_BURST_SPEED_MIN: f32 = 2.2;
pub const MOBILE_BURST_SPEED_MAX: f32 = 3.6;

/// Burst baseline alpha range.
pub const DESKTOP_BURST_ALPHA_MIN: f32 = 0.18;
pub const DESKTOP_BURST_ALPHA_MAX: f32 = 0.32;
pub const MOBILE_BURST_ALPHA_MIN: f32 = 0.16;
pub const MOBILE_BURST_ALPHA_MAX: f32 = 0.28;

/// Velocity multiplier applied when a burst particle converts to drift.
pub const DESKTOP_BURST_DAMPING: f32 = 0.12;
pub const MOBILE_BURST_DAMPING: f32 = 0.10;

/// Positional jitter around the origin for burst spawns (× dpr).
pub const BURST_JITTER: f32 = 3.0;

/// Angular jitter added to the uniformly random launch direction (radians).
pub const BURST_ANGLE_JITTER: f32 = 0.12;

/// Fraction of alpha lost over the burst phase.
pub const BURST_FADE: f32 = 0.35;

/// Probability that a burst particle is drawn large.
pub const BURST_LARGE_CHANCE: f64 = 0.20;
pub const BURST_RADIUS_SMALL: (f32, f32) = (1.0, 2.2);
pub const BURST_RADIUS_LARGE: (f32, f32) = (2.2, 4.4);

// ── Drift motion ──────────────────────────────────────────────────────────────

/// Drift speed range (px/frame before dpr scaling).
pub const DESKTOP_DRIFT_SPEED_MIN: f32 = 0.10;
pub const DESKTOP_DRIFT_SPEED_MAX: f32 = 0.28;
pub const MOBILE_DRIFT_SPEED_MIN: f32 = 0.08;
pub const MOBILE_DRIFT_SPEED_MAX: f32 = 0.22;

/// Swirl strength (before dpr scaling).
pub const DESKTOP_SWIRL: f32 = 0.00080;
pub const MOBILE_SWIRL: f32 = 0.00055;

/// Extra factor applied to the swirl acceleration each frame.
pub const SWIRL_SCALE: f32 = 0.0009;

/// Drift baseline alpha range (fresh spawns and post-burst).
pub const DRIFT_ALPHA_MIN: f32 = 0.05;
pub const DRIFT_ALPHA_MAX: f32 = 0.14;

/// Lifetime range (frames) for freshly spawned drift particles.
pub const DRIFT_LIFETIME_MIN: u32 = 900;
pub const DRIFT_LIFETIME_MAX: u32 = 1500;

/// Lifetime range (frames) assigned when a burst particle settles.
pub const SETTLED_LIFETIME_MIN: u32 = 900;
pub const SETTLED_LIFETIME_MAX: u32 = 1600;

/// Probability that a drift particle is drawn large.
pub const DRIFT_LARGE_CHANCE: f64 = 0.12;
pub const DRIFT_RADIUS_SMALL: (f32, f32) = (0.9, 2.0);
pub const DRIFT_RADIUS_LARGE: (f32, f32) = (1.8, 3.4);

// ── Theme ─────────────────────────────────────────────────────────────────────

/// Accent used when nothing has been chosen yet.
pub const DEFAULT_ACCENT_HEX: &str = "#6366f1";
