//! Mirror the frame's [`DrawList`] onto Bevy mesh entities.
//!
//! ## Layer Model
//!
//! | Layer          | Technology    | Driven by                          |
//! |----------------|---------------|------------------------------------|
//! | Haze           | `ClearColor`  | `DrawList::haze` over black        |
//! | Particles      | `Mesh2d`      | one entity per `DrawList` circle   |
//!
//! A single shared unit-circle mesh [`ParticleMesh`] is created at startup;
//! each sprite entity owns its own [`ColorMaterial`] so its alpha can be faded
//! individually.  Sprite entities are only spawned or despawned when the pool
//! length changes (init, resize, burst); steady-state frames just rewrite
//! transforms and material colours.

use crate::frame::DrawList;
use crate::particles::particle_frame_system;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Sides of the polygon approximating a particle disc.
const CIRCLE_SIDES: u32 = 12;

/// Particles sit above the camera's near default but below any UI.
const PARTICLE_Z: f32 = 0.5;

// ── Resources & components ───────────────────────────────────────────────────

/// Shared unit circle mesh used by every particle sprite.
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

/// Mesh entity that draws `DrawList::circles[index]`.
#[derive(Component)]
pub struct ParticleSprite {
    pub index: usize,
    material: Handle<ColorMaterial>,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ParticleRenderPlugin;

impl Plugin for ParticleRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_particle_mesh).add_systems(
            Update,
            (sync_particle_sprites_system, haze_system).after(particle_frame_system),
        );
    }
}

// ── Startup system ────────────────────────────────────────────────────────────

fn init_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(circle_mesh(1.0, CIRCLE_SIDES));
    commands.insert_resource(ParticleMesh(handle));
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Keep exactly one sprite per queued circle and copy position, size and
/// alpha across.  Skipped on frames where the loop did not run.
pub fn sync_particle_sprites_system(
    mut commands: Commands,
    draw_list: Res<DrawList>,
    particle_mesh: Option<Res<ParticleMesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut sprites: Query<(Entity, &ParticleSprite, &mut Transform)>,
) {
    if !draw_list.is_changed() {
        return;
    }
    let Some(particle_mesh) = particle_mesh else {
        return;
    };

    let viewport = draw_list.viewport;
    let dpr = viewport.device_pixel_ratio;
    let circles = &draw_list.circles;
    let mut kept = 0usize;

    for (entity, sprite, mut transform) in sprites.iter_mut() {
        let Some(circle) = circles.get(sprite.index) else {
            commands.entity(entity).despawn();
            continue;
        };
        kept += 1;
        transform.translation = viewport.to_world(circle.center).extend(PARTICLE_Z);
        transform.scale = Vec3::splat(circle.radius / dpr);
        if let Some(mat) = materials.get_mut(&sprite.material) {
            mat.color = circle.color.with_alpha(circle.alpha);
        }
    }

    // Sprites always cover a prefix 0..kept of the circle list.
    for (index, circle) in circles.iter().enumerate().skip(kept) {
        let material = materials.add(ColorMaterial::from_color(
            circle.color.with_alpha(circle.alpha),
        ));
        commands.spawn((
            ParticleSprite {
                index,
                material: material.clone(),
            },
            Mesh2d(particle_mesh.0.clone()),
            MeshMaterial2d(material),
            Transform::from_translation(viewport.to_world(circle.center).extend(PARTICLE_Z))
                .with_scale(Vec3::splat(circle.radius / dpr)),
        ));
    }
}

/// The low-alpha accent fill behind the particles, composited over black.
pub fn haze_system(draw_list: Res<DrawList>, clear_color: Option<ResMut<ClearColor>>) {
    if !draw_list.is_changed() {
        return;
    }
    let (Some((color, alpha)), Some(mut clear_color)) = (draw_list.haze, clear_color) else {
        return;
    };
    clear_color.0 = color.over_black(alpha);
}

// ── Mesh helper ───────────────────────────────────────────────────────────────

/// Build a filled circle mesh approximated by an `n`-sided regular polygon.
///
/// Uses a triangle fan from the centre: `(0, i, i+1 mod n)`.
fn circle_mesh(radius: f32, sides: u32) -> Mesh {
    let n = sides as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n + 1);

    positions.push([0.0, 0.0, 0.0]);
    normals.push([0.0, 0.0, 1.0]);
    uvs.push([0.5, 0.5]);

    for i in 0..n {
        let angle = std::f32::consts::TAU * i as f32 / n as f32;
        let (sin, cos) = angle.sin_cos();
        positions.push([radius * cos, radius * sin, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([cos * 0.5 + 0.5, sin * 0.5 + 0.5]);
    }

    let indices: Vec<u32> = (0..sides)
        .flat_map(|i| [0, i + 1, (i + 1) % sides + 1])
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
