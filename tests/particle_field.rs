//! Headless tests for the particle field plugin.
//!
//! These tests use [`MinimalPlugins`] with a bare `Window` entity marked
//! [`PrimaryWindow`]: no renderer, no winit.  Window events are injected as
//! messages, the same way the windowing backend would deliver them.
//!
//! Covered scenarios:
//! 1. Startup seeds base + burst particles for a desktop-sized window.
//! 2. Reduced motion leaves the field inert and never schedules a frame.
//! 3. No primary window leaves the field inert.
//! 4. A resize to a narrow width re-seeds with the mobile profile.
//! 5. An accent pick bursts again without exceeding the pool cap.
//! 6. Occlusion pauses the frame loop and un-occlusion resumes it.
//! 7. Every frame refreshes the draw list in the current accent.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowOccluded, WindowResized, WindowResolution};
use clickoz::config::{DeviceClass, FieldConfig};
use clickoz::field::ParticleField;
use clickoz::frame::DrawList;
use clickoz::particles::ParticleFieldPlugin;
use clickoz::scheduler::FrameScheduler;
use clickoz::theme::{AccentSelected, ThemeColor, ThemePlugin, SWATCHES};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal app with the field plugin and the given config.  No window yet.
fn app_with_config(config: FieldConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, ParticleFieldPlugin));
    app.insert_resource(config);
    app
}

/// Spawn a primary window of `width`×`height` logical px at dpr 1.
fn spawn_primary_window(app: &mut App, width: u32, height: u32) -> Entity {
    app.world_mut()
        .spawn((
            Window {
                resolution: WindowResolution::new(width, height).with_scale_factor_override(1.0),
                ..Default::default()
            },
            PrimaryWindow,
        ))
        .id()
}

/// Desktop-sized app after its first frame.
fn desktop_app() -> (App, Entity) {
    let mut app = app_with_config(FieldConfig::default());
    let window = spawn_primary_window(&mut app, 1920, 1080);
    app.update();
    (app, window)
}

fn field(app: &App) -> &ParticleField {
    app.world().resource::<ParticleField>()
}

fn scheduler(app: &App) -> &FrameScheduler {
    app.world().resource::<FrameScheduler>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// 50 drift particles plus one 220-particle burst on a 1920-wide window.
#[test]
fn startup_seeds_desktop_population() {
    let (app, _) = desktop_app();
    let field = field(&app);
    assert_eq!(field.device_class(), DeviceClass::Desktop);
    assert_eq!(field.len(), 270);
    assert!(field.len() <= field.pool_cap());
    assert!(scheduler(&app).is_running());
    assert_eq!(scheduler(&app).frames_run(), 1);
}

/// Frames respawn in place: the pool length is stable across many frames.
#[test]
fn pool_length_is_stable_across_frames() {
    let (mut app, _) = desktop_app();
    for _ in 0..200 {
        app.update();
    }
    assert_eq!(field(&app).len(), 270);
    assert_eq!(scheduler(&app).frames_run(), 201);
}

#[test]
fn reduced_motion_stays_inert() {
    let mut app = app_with_config(FieldConfig {
        reduced_motion: true,
        ..Default::default()
    });
    spawn_primary_window(&mut app, 1920, 1080);
    for _ in 0..5 {
        app.update();
    }
    assert!(app.world().get_resource::<ParticleField>().is_none());
    assert!(scheduler(&app).is_disabled());
    assert_eq!(scheduler(&app).frames_run(), 0);
    assert!(app.world().resource::<DrawList>().circles.is_empty());
}

#[test]
fn missing_window_stays_inert() {
    let mut app = app_with_config(FieldConfig::default());
    app.update();
    app.update();
    assert!(app.world().get_resource::<ParticleField>().is_none());
    assert!(scheduler(&app).is_disabled());
    assert_eq!(scheduler(&app).frames_run(), 0);
}

/// 700 css px is under the 720 px breakpoint: 22 drift + 120 burst.
#[test]
fn resize_to_narrow_width_uses_mobile_profile() {
    let (mut app, window) = desktop_app();
    app.world_mut().write_message(WindowResized {
        window,
        width: 700.0,
        height: 900.0,
    });
    app.update();

    let field = field(&app);
    assert_eq!(field.device_class(), DeviceClass::Mobile);
    assert_eq!(field.len(), 142);
    assert_eq!(field.viewport().css_width, 700.0);
}

/// A resize for some other window is ignored.
#[test]
fn resize_of_secondary_window_is_ignored() {
    let (mut app, _) = desktop_app();
    let other = app.world_mut().spawn(Window::default()).id();
    app.world_mut().write_message(WindowResized {
        window: other,
        width: 400.0,
        height: 400.0,
    });
    app.update();
    assert_eq!(field(&app).device_class(), DeviceClass::Desktop);
    assert_eq!(field(&app).len(), 270);
}

/// 270 + 220 would overflow the 420 cap; the oldest 70 are evicted.
#[test]
fn accent_pick_bursts_within_cap() {
    let (mut app, _) = desktop_app();
    let picked = AccentSelected::swatch(2).expect("swatch exists");
    app.world_mut().write_message(picked);
    app.update();

    let field = field(&app);
    assert_eq!(field.len(), field.pool_cap());
    assert_eq!(field.len(), 420);
}

#[test]
fn occlusion_pauses_and_resumes_frames() {
    let (mut app, window) = desktop_app();
    app.world_mut().write_message(WindowOccluded {
        window,
        occluded: true,
    });
    app.update();
    assert!(!scheduler(&app).is_running());
    let paused_at = scheduler(&app).frames_run();
    assert_eq!(paused_at, 1);

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(scheduler(&app).frames_run(), paused_at);

    app.world_mut().write_message(WindowOccluded {
        window,
        occluded: false,
    });
    app.update();
    assert!(scheduler(&app).is_running());
    assert_eq!(scheduler(&app).frames_run(), paused_at + 1);
}

/// The draw list holds one circle per particle, all in the theme accent.
#[test]
fn frame_draws_every_particle_in_accent() {
    let mut app = app_with_config(FieldConfig::default());
    app.add_plugins(ThemePlugin);
    spawn_primary_window(&mut app, 1280, 800);
    app.update();

    let picked = AccentSelected::swatch(3).expect("swatch exists");
    app.world_mut().write_message(picked);
    app.update();

    let accent = app.world().resource::<ThemeColor>().rgb();
    assert_eq!(accent, clickoz::theme::hex_to_rgb(SWATCHES[3].1));

    let draw_list = app.world().resource::<DrawList>();
    assert_eq!(draw_list.circles.len(), field(&app).len());
    assert!(draw_list.circles.iter().all(|c| c.color == accent));
    assert!(draw_list
        .circles
        .iter()
        .all(|c| (0.0..=1.0).contains(&c.alpha)));
    assert_eq!(draw_list.haze.map(|(color, _)| color), Some(accent));
}
