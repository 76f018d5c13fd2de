use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The default `Camera2d` maps one world unit to one logical pixel with the
/// origin at the window centre, which is what [`crate::viewport::Viewport::to_world`]
/// assumes.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    debug!("Camera spawned");
}
