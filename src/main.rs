use bevy::prelude::*;
use bevy::window::WindowResolution;
use clickoz::config::{self, FieldConfig};
use clickoz::graphics;
use clickoz::particles::{self, ParticleFieldPlugin};
use clickoz::rendering::ParticleRenderPlugin;
use clickoz::theme::{self, ThemePlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Clickoz".into(),
                resolution: WindowResolution::new(1280, 720),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_field_config overwrites them from
        // assets/particles.toml (if present) in the Startup schedule.
        .insert_resource(FieldConfig::default())
        .add_plugins((ThemePlugin, ParticleFieldPlugin, ParticleRenderPlugin))
        .add_systems(
            Startup,
            (
                // Load config first so the field and theme see the final values.
                config::load_field_config
                    .before(particles::init_particle_field)
                    .before(theme::init_theme_from_config),
                graphics::setup_camera,
            ),
        )
        .run();
}
