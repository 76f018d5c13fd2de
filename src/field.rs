//! Particle field state: the fixed-size pool and its spawn rules.
//!
//! ## Lifecycle
//!
//! ```text
//! spawn_burst ──► Burst ──(age ≥ burst_frames)──► Drift ──(expired | out of bounds)──► Drift (respawned)
//! spawn_drift ──────────────────────────────────► Drift
//! ```
//!
//! The pool is a `Vec` whose capacity is reserved once for
//! `pool_cap + burst_count`.  Frame updates replace particles in place and
//! never change its length; only [`ParticleField::big_burst`] and
//! [`ParticleField::resize`] do, and both leave it at or below the cap.

use crate::config::{DeviceClass, DeviceProfile, FieldConfig};
use crate::viewport::Viewport;
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Motion mode of a single particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleMode {
    /// Ballistic launch from the origin for `burst_frames` frames.
    Burst,
    /// Slow swirl around the origin until expiry.
    Drift,
}

/// One pool entry.  All lengths are device pixels, all times frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Added to `position` once per frame.
    pub velocity: Vec2,
    pub radius: f32,
    /// Alpha at age zero; the drawn alpha never exceeds it.
    pub base_alpha: f32,
    pub age: u32,
    /// Drift lifetime; meaningless while in burst mode.
    pub max_age: u32,
    /// Frames spent in burst mode before settling.
    pub burst_frames: u32,
    /// Swirl strength, already dpr-scaled.
    pub swirl: f32,
    pub mode: ParticleMode,
}

/// The pool plus everything needed to (re)spawn into it.
#[derive(Resource)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    class: DeviceClass,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    /// Build and seed a field with an entropy-seeded RNG.
    pub fn new(config: FieldConfig, viewport: Viewport) -> Self {
        Self::with_rng(config, viewport, StdRng::from_entropy())
    }

    /// Build and seed a field with a deterministic RNG.
    pub fn seeded(config: FieldConfig, viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(config, viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, viewport: Viewport, rng: StdRng) -> Self {
        let class = config.device_class(viewport.css_width);
        let mut field = Self {
            config,
            viewport,
            class,
            particles: Vec::new(),
            rng,
        };
        field.reseed();
        field
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn device_class(&self) -> DeviceClass {
        self.class
    }

    pub fn profile(&self) -> &DeviceProfile {
        self.config.profile(self.class)
    }

    /// Device-class default for [`Self::big_burst`].
    pub fn burst_count(&self) -> usize {
        self.profile().burst_count
    }

    pub fn pool_cap(&self) -> usize {
        self.profile().pool_cap
    }

    /// The hero anchor every burst launches from and every drift swirls around.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(
            self.viewport.width() * self.config.origin_x,
            self.viewport.height() * self.profile().origin_y,
        )
    }

    /// Half-width of the band outside the viewport where drift may wander.
    pub fn respawn_margin(&self) -> f32 {
        self.config.respawn_margin * self.viewport.device_pixel_ratio
    }

    // ── Spawning ──────────────────────────────────────────────────────────────

    /// A fresh drift particle, uniformly placed when `random_position`,
    /// otherwise exactly at [`Self::origin`].
    pub fn spawn_drift(&mut self, random_position: bool) -> Particle {
        let dpr = self.viewport.device_pixel_ratio;
        let origin = self.origin();
        let (w, h) = (self.viewport.width(), self.viewport.height());
        let Self {
            config: cfg,
            rng,
            class,
            ..
        } = self;
        let profile = cfg.profile(*class);

        let large = rng.gen_bool(cfg.drift_large_chance);
        let (r_min, r_max) = if large {
            cfg.drift_radius_large
        } else {
            cfg.drift_radius_small
        };
        let radius = rng.gen_range(r_min..r_max) * dpr;

        let position = if random_position {
            Vec2::new(sample(rng, 0.0, w), sample(rng, 0.0, h))
        } else {
            origin
        };

        let speed = rng.gen_range(profile.drift_speed_min..profile.drift_speed_max) * dpr;
        let angle = rng.gen_range(0.0..TAU);

        Particle {
            position,
            velocity: Vec2::from_angle(angle) * speed,
            radius,
            base_alpha: rng.gen_range(cfg.drift_alpha_min..cfg.drift_alpha_max),
            age: 0,
            max_age: rng.gen_range(cfg.drift_lifetime_min..=cfg.drift_lifetime_max),
            burst_frames: profile.burst_frames,
            swirl: profile.swirl * dpr,
            mode: ParticleMode::Drift,
        }
    }

    /// A burst particle launched from the origin in a uniformly random
    /// direction, fast enough to reach the edges within its frame budget.
    pub fn spawn_burst(&mut self) -> Particle {
        let dpr = self.viewport.device_pixel_ratio;
        let origin = self.origin();
        let Self {
            config: cfg,
            rng,
            class,
            ..
        } = self;
        let profile = cfg.profile(*class);

        let jitter = cfg.burst_jitter * dpr;
        let position = origin
            + Vec2::new(
                sample(rng, -jitter, jitter),
                sample(rng, -jitter, jitter),
            );

        let spread = cfg.burst_angle_jitter;
        let angle = rng.gen_range(0.0..TAU) + sample(rng, -spread, spread);
        let speed = rng.gen_range(profile.burst_speed_min..profile.burst_speed_max) * dpr;

        let large = rng.gen_bool(cfg.burst_large_chance);
        let (r_min, r_max) = if large {
            cfg.burst_radius_large
        } else {
            cfg.burst_radius_small
        };

        Particle {
            position,
            velocity: Vec2::from_angle(angle) * speed,
            radius: rng.gen_range(r_min..r_max) * dpr,
            base_alpha: rng.gen_range(profile.burst_alpha_min..profile.burst_alpha_max),
            age: 0,
            max_age: profile.burst_frames,
            burst_frames: profile.burst_frames,
            swirl: profile.swirl * dpr,
            mode: ParticleMode::Burst,
        }
    }

    /// Append `count` burst particles, then evict the oldest entries beyond
    /// the pool cap.
    pub fn big_burst(&mut self, count: usize) {
        for _ in 0..count {
            let particle = self.spawn_burst();
            self.particles.push(particle);
        }
        let cap = self.pool_cap();
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
        }
    }

    /// Adopt a new viewport: re-classify, rebuild the base drift population,
    /// and fire one big burst.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.class = self.config.device_class(viewport.css_width);
        self.reseed();
    }

    fn reseed(&mut self) {
        let profile = self.profile().clone();
        self.particles.clear();
        self.particles.reserve(profile.pool_cap + profile.burst_count);
        for _ in 0..profile.base_count.min(profile.pool_cap) {
            let particle = self.spawn_drift(true);
            self.particles.push(particle);
        }
        self.big_burst(profile.burst_count);
    }

    // ── Frame helpers ─────────────────────────────────────────────────────────

    /// Post-burst drift parameters: damped velocity, fresh lifetime and a
    /// lower baseline alpha.
    pub(crate) fn settle(&mut self, index: usize) {
        let damping = self.profile().burst_damping;
        let cfg = &self.config;
        let max_age = self
            .rng
            .gen_range(cfg.settled_lifetime_min..=cfg.settled_lifetime_max);
        let base_alpha = self.rng.gen_range(cfg.drift_alpha_min..cfg.drift_alpha_max);

        let p = &mut self.particles[index];
        p.mode = ParticleMode::Drift;
        p.velocity *= damping;
        p.age = 0;
        p.max_age = max_age;
        p.base_alpha = base_alpha;
    }

    /// Replace the particle at `index` with a randomly placed drift particle.
    pub(crate) fn respawn(&mut self, index: usize) {
        let particle = self.spawn_drift(true);
        self.particles[index] = particle;
    }
}

/// Uniform sample in `[lo, hi)`, or `lo` for an empty range (zero-size
/// viewports, zero jitter).
fn sample(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
