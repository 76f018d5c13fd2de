//! Bevy wiring for the background particle field.
//!
//! ## Design
//!
//! The pool lives in a single [`ParticleField`] resource rather than as one
//! entity per particle, so a frame is one tight loop over a `Vec` and nothing
//! is spawned or despawned per particle.  [`crate::rendering`] mirrors the
//! resulting [`DrawList`] onto mesh entities.
//!
//! | System                        | Schedule | Purpose                                     |
//! |-------------------------------|----------|---------------------------------------------|
//! | `init_particle_field`         | Startup  | Seed the pool, or leave the field inert     |
//! | `resize_field_system`         | Update   | Re-seed for the new viewport                |
//! | `visibility_system`           | Update   | Pause/resume the [`FrameScheduler`]         |
//! | `accent_burst_system`         | Update   | Secondary burst on accent change            |
//! | `particle_frame_system`       | Update   | Step + draw once, while the scheduler runs  |
//!
//! The chain runs after [`apply_accent_system`] when the theme plugin is
//! present.
//!
//! The field is inert (no resource, scheduler disabled) when reduced motion is
//! requested or there is no primary window to draw on.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::frame::{advance_frame, DrawList};
use crate::scheduler::{scheduler_running, FrameScheduler};
use crate::theme::{apply_accent_system, AccentSelected, ThemeColor};
use crate::viewport::Viewport;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowOccluded, WindowResized};

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ParticleFieldPlugin;

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldConfig>()
            .init_resource::<ThemeColor>()
            .init_resource::<FrameScheduler>()
            .init_resource::<DrawList>()
            .add_message::<AccentSelected>()
            .add_message::<WindowResized>()
            .add_message::<WindowOccluded>()
            .add_systems(Startup, init_particle_field)
            .add_systems(
                Update,
                (
                    resize_field_system,
                    visibility_system,
                    accent_burst_system,
                    particle_frame_system.run_if(scheduler_running),
                )
                    .chain()
                    // Draw a newly picked accent on the same frame.
                    .after(apply_accent_system),
            );
    }
}

// ── Startup system ────────────────────────────────────────────────────────────

/// Seed the pool from the primary window and start the scheduler.
pub fn init_particle_field(
    mut commands: Commands,
    config: Res<FieldConfig>,
    mut scheduler: ResMut<FrameScheduler>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if config.reduced_motion {
        scheduler.disable();
        info!("Reduced motion requested; particle field disabled");
        return;
    }
    let Ok(window) = windows.single() else {
        scheduler.disable();
        info!("No primary window; particle field disabled");
        return;
    };

    let viewport = Viewport::from_window(window, config.max_device_pixel_ratio);
    let field = ParticleField::new(config.clone(), viewport);
    info!(
        "Particle field seeded: {} particles ({:?}, {}x{} device px, cap {})",
        field.len(),
        field.device_class(),
        viewport.width(),
        viewport.height(),
        field.pool_cap()
    );
    commands.insert_resource(field);
    scheduler.start();
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Re-seed the base population and burst again for the primary window's new
/// size.  Several resize messages in one frame collapse into one re-seed.
pub fn resize_field_system(
    mut resized: MessageReader<WindowResized>,
    field: Option<ResMut<ParticleField>>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
) {
    let Some(mut field) = field else {
        resized.clear();
        return;
    };
    let Ok((primary, window)) = windows.single() else {
        resized.clear();
        return;
    };
    let Some(last) = resized.read().filter(|m| m.window == primary).last() else {
        return;
    };

    let max_dpr = field.config().max_device_pixel_ratio;
    let viewport = Viewport::new(last.width, last.height, window.scale_factor(), max_dpr);
    if viewport == *field.viewport() {
        return;
    }
    field.resize(viewport);
    debug!(
        "Particle field re-seeded for {}x{} ({:?}): {} particles",
        viewport.css_width,
        viewport.css_height,
        field.device_class(),
        field.len()
    );
}

/// Window occlusion is the "document hidden" signal.
pub fn visibility_system(
    mut occluded: MessageReader<WindowOccluded>,
    mut scheduler: ResMut<FrameScheduler>,
) {
    let Some(last) = occluded.read().last() else {
        return;
    };
    if scheduler.is_disabled() {
        return;
    }
    let visible = !last.occluded;
    if visible != scheduler.is_running() {
        scheduler.set_visible(visible);
        debug!(
            "Particle loop {}",
            if visible { "resumed" } else { "paused" }
        );
    }
}

/// Any accent pick fires one more big burst into the same pool.
pub fn accent_burst_system(
    mut selections: MessageReader<AccentSelected>,
    field: Option<ResMut<ParticleField>>,
) {
    let picked = selections.read().count() > 0;
    let Some(mut field) = field else {
        return;
    };
    if picked {
        let count = field.burst_count();
        field.big_burst(count);
    }
}

/// One animation frame: step every particle and record what to draw.
pub fn particle_frame_system(
    field: Option<ResMut<ParticleField>>,
    theme: Res<ThemeColor>,
    mut draw_list: ResMut<DrawList>,
    mut scheduler: ResMut<FrameScheduler>,
) {
    let Some(mut field) = field else {
        return;
    };
    advance_frame(&mut field, theme.rgb(), &mut *draw_list);
    scheduler.record_frame();
}
