//! Runtime particle-field configuration loaded from `assets/particles.toml`.
//!
//! [`FieldConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`].  At startup, [`load_field_config`] reads
//! `assets/particles.toml` and overwrites the defaults with any values present
//! in the file.  Top-level keys fall back to the compile-time defaults
//! individually; a `[desktop]` or `[mobile]` table, when present, must list
//! every profile key.
//!
//! The source variants of this effect disagreed on counts, swirl and origin,
//! so none of these values are behavioural contracts: retune freely.

use crate::constants::*;
use crate::error::{self, ClickozError, ClickozResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the tuning file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/particles.toml";

/// Environment variable that forces the reduced-motion preference on.
pub const REDUCED_MOTION_ENV: &str = "CLICKOZ_REDUCED_MOTION";

/// Viewport size class; selects a [`DeviceProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

/// The tuning values that differ between narrow and wide viewports.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceProfile {
    /// Drift particles seeded on init/resize.
    pub base_count: usize,
    /// Particles emitted by one `big_burst`.
    pub burst_count: usize,
    /// Upper bound on the pool length.
    pub pool_cap: usize,
    /// Frames spent in burst mode.
    pub burst_frames: u32,
    pub burst_speed_min: f32,
    pub burst_speed_max: f32,
    pub burst_alpha_min: f32,
    pub burst_alpha_max: f32,
    /// Velocity multiplier on the burst → drift transition.
    pub burst_damping: f32,
    pub drift_speed_min: f32,
    pub drift_speed_max: f32,
    /// Swirl strength before dpr scaling.
    pub swirl: f32,
    /// Vertical origin as a fraction of viewport height.
    pub origin_y: f32,
}

impl DeviceProfile {
    pub fn desktop() -> Self {
        Self {
            base_count: DESKTOP_BASE_COUNT,
            burst_count: DESKTOP_BURST_COUNT,
            pool_cap: DESKTOP_POOL_CAP,
            burst_frames: DESKTOP_BURST_FRAMES,
            burst_speed_min: DESKTOP_BURST_SPEED_MIN,
            burst_speed_max: DESKTOP_BURST_SPEED_MAX,
            burst_alpha_min: DESKTOP_BURST_ALPHA_MIN,
            burst_alpha_max: DESKTOP_BURST_ALPHA_MAX,
            burst_damping: DESKTOP_BURST_DAMPING,
            drift_speed_min: DESKTOP_DRIFT_SPEED_MIN,
            drift_speed_max: DESKTOP_DRIFT_SPEED_MAX,
            swirl: DESKTOP_SWIRL,
            origin_y: DESKTOP_ORIGIN_Y,
        }
    }

    pub fn mobile() -> Self {
        Self {
            base_count: MOBILE_BASE_COUNT,
            burst_count: MOBILE_BURST_COUNT,
            pool_cap: MOBILE_POOL_CAP,
            burst_frames: MOBILE_BURST_FRAMES,
            burst_speed_min: MOBILE_BURST_SPEED_MIN,
            burst_speed_max: MOBILE_BURST_SPEED_MAX,
            burst_alpha_min: MOBILE_BURST_ALPHA_MIN,
            burst_alpha_max: MOBILE_BURST_ALPHA_MAX,
            burst_damping: MOBILE_BURST_DAMPING,
            drift_speed_min: MOBILE_DRIFT_SPEED_MIN,
            drift_speed_max: MOBILE_DRIFT_SPEED_MAX,
            swirl: MOBILE_SWIRL,
            origin_y: MOBILE_ORIGIN_Y,
        }
    }

    fn validate(&self, class: &'static str) -> ClickozResult<()> {
        if self.pool_cap == 0 {
            return Err(ClickozError::UnsafeConstant {
                name: class,
                value: 0.0,
                safe_range: "pool_cap ≥ 1",
            });
        }
        if self.burst_frames == 0 {
            return Err(ClickozError::UnsafeConstant {
                name: class,
                value: 0.0,
                safe_range: "burst_frames ≥ 1",
            });
        }
        error::validate_range("burst_speed", self.burst_speed_min, self.burst_speed_max)?;
        error::validate_range("burst_alpha", self.burst_alpha_min, self.burst_alpha_max)?;
        error::validate_range("drift_speed", self.drift_speed_min, self.drift_speed_max)?;
        error::validate_unit_interval("burst_alpha_max", self.burst_alpha_max)?;
        error::validate_unit_interval("burst_damping", self.burst_damping)?;
        error::validate_unit_interval("origin_y", self.origin_y)?;
        error::validate_swirl(self.swirl)?;
        Ok(())
    }
}

/// Runtime-tunable particle-field configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    // ── Accessibility ─────────────────────────────────────────────────────────
    /// When set before initialisation the whole component stays inert.
    pub reduced_motion: bool,

    // ── Viewport ──────────────────────────────────────────────────────────────
    pub mobile_max_width: f32,
    pub max_device_pixel_ratio: f32,
    pub respawn_margin: f32,
    pub origin_x: f32,

    // ── Drawing ───────────────────────────────────────────────────────────────
    pub haze_alpha: f32,

    // ── Burst ─────────────────────────────────────────────────────────────────
    pub burst_jitter: f32,
    pub burst_angle_jitter: f32,
    pub burst_fade: f32,
    pub burst_large_chance: f64,
    pub burst_radius_small: (f32, f32),
    pub burst_radius_large: (f32, f32),

    // ── Drift ─────────────────────────────────────────────────────────────────
    pub swirl_scale: f32,
    pub drift_alpha_min: f32,
    pub drift_alpha_max: f32,
    pub drift_lifetime_min: u32,
    pub drift_lifetime_max: u32,
    pub settled_lifetime_min: u32,
    pub settled_lifetime_max: u32,
    pub drift_large_chance: f64,
    pub drift_radius_small: (f32, f32),
    pub drift_radius_large: (f32, f32),

    // ── Theme ─────────────────────────────────────────────────────────────────
    /// Initial accent colour (hex).  Unparseable values fall back silently.
    pub accent: String,
    /// Secondary accent; empty means "same as `accent`".
    pub accent_secondary: String,

    // ── Device profiles ───────────────────────────────────────────────────────
    #[serde(default = "DeviceProfile::desktop")]
    pub desktop: DeviceProfile,
    #[serde(default = "DeviceProfile::mobile")]
    pub mobile: DeviceProfile,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            mobile_max_width: MOBILE_MAX_WIDTH,
            max_device_pixel_ratio: MAX_DEVICE_PIXEL_RATIO,
            respawn_margin: RESPAWN_MARGIN,
            origin_x: ORIGIN_X,
            haze_alpha: HAZE_ALPHA,
            burst_jitter: BURST_JITTER,
            burst_angle_jitter: BURST_ANGLE_JITTER,
            burst_fade: BURST_FADE,
            burst_large_chance: BURST_LARGE_CHANCE,
            burst_radius_small: BURST_RADIUS_SMALL,
            burst_radius_large: BURST_RADIUS_LARGE,
            swirl_scale: SWIRL_SCALE,
            drift_alpha_min: DRIFT_ALPHA_MIN,
            drift_alpha_max: DRIFT_ALPHA_MAX,
            drift_lifetime_min: DRIFT_LIFETIME_MIN,
            drift_lifetime_max: DRIFT_LIFETIME_MAX,
            settled_lifetime_min: SETTLED_LIFETIME_MIN,
            settled_lifetime_max: SETTLED_LIFETIME_MAX,
            drift_large_chance: DRIFT_LARGE_CHANCE,
            drift_radius_small: DRIFT_RADIUS_SMALL,
            drift_radius_large: DRIFT_RADIUS_LARGE,
            accent: DEFAULT_ACCENT_HEX.to_string(),
            accent_secondary: String::new(),
            desktop: DeviceProfile::desktop(),
            mobile: DeviceProfile::mobile(),
        }
    }
}

impl FieldConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> ClickozResult<Self> {
        let config: FieldConfig =
            toml::from_str(contents).map_err(|e| ClickozError::ConfigParse {
                path: CONFIG_PATH.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value against the range the field can render sanely.
    pub fn validate(&self) -> ClickozResult<()> {
        error::validate_positive("mobile_max_width", self.mobile_max_width)?;
        error::validate_device_pixel_ratio(self.max_device_pixel_ratio)?;
        error::validate_non_negative("respawn_margin", self.respawn_margin)?;
        error::validate_unit_interval("origin_x", self.origin_x)?;
        error::validate_unit_interval("haze_alpha", self.haze_alpha)?;
        error::validate_unit_interval("burst_fade", self.burst_fade)?;
        error::validate_unit_interval("drift_alpha_max", self.drift_alpha_max)?;
        error::validate_range("drift_alpha", self.drift_alpha_min, self.drift_alpha_max)?;
        error::validate_range(
            "burst_radius_small",
            self.burst_radius_small.0,
            self.burst_radius_small.1,
        )?;
        error::validate_range(
            "burst_radius_large",
            self.burst_radius_large.0,
            self.burst_radius_large.1,
        )?;
        error::validate_range(
            "drift_radius_small",
            self.drift_radius_small.0,
            self.drift_radius_small.1,
        )?;
        error::validate_range(
            "drift_radius_large",
            self.drift_radius_large.0,
            self.drift_radius_large.1,
        )?;
        error::validate_lifetime(
            "drift_lifetime",
            self.drift_lifetime_min,
            self.drift_lifetime_max,
        )?;
        error::validate_lifetime(
            "settled_lifetime",
            self.settled_lifetime_min,
            self.settled_lifetime_max,
        )?;
        error::validate_probability("burst_large_chance", self.burst_large_chance)?;
        error::validate_probability("drift_large_chance", self.drift_large_chance)?;
        self.desktop.validate("desktop")?;
        self.mobile.validate("mobile")?;
        Ok(())
    }

    /// Device class for a viewport `css_width` pixels wide.
    pub fn device_class(&self, css_width: f32) -> DeviceClass {
        if css_width <= self.mobile_max_width {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn profile(&self, class: DeviceClass) -> &DeviceProfile {
        match class {
            DeviceClass::Desktop => &self.desktop,
            DeviceClass::Mobile => &self.mobile,
        }
    }
}

/// `true` when the environment asks for reduced motion.
pub fn reduced_motion_from_env() -> bool {
    std::env::var(REDUCED_MOTION_ENV)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Startup system: attempt to load `assets/particles.toml` and overwrite the
/// `FieldConfig` resource with any values present in the file.
///
/// Parse and validation errors are logged but do not abort the app; the
/// compiled defaults stay in place.  The reduced-motion environment override
/// is applied last.
pub fn load_field_config(mut config: ResMut<FieldConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match FieldConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded particle config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }

    if reduced_motion_from_env() {
        config.reduced_motion = true;
        info!("{REDUCED_MOTION_ENV} set; particle field will stay inert");
    }
}
