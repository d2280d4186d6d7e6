//! World setup systems for camera, lighting, and ground

use bevy::prelude::*;

use super::components::{Ground, MainCamera, SimStreetResource};

/// System to setup the world environment (ground, lighting, camera)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_street: Res<SimStreetResource>,
) {
    let road_length = sim_street.0.config().road_length;
    let center = Vec3::new(road_length / 2.0, 0.0, 0.0);

    // Angled camera looking down the middle of the street
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(center.x, road_length * 0.45, road_length * 0.35)
            .looking_at(center, Vec3::Y),
    ));

    // Spawn a directional light
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(center.x + 4.0, 8.0, 4.0).looking_at(center, Vec3::Y),
    ));

    // Spawn a ground plane
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(road_length * 1.5, road_length))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_translation(center),
    ));
}
