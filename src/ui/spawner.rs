//! Systems for spawning the static street visuals and the overlay

use bevy::prelude::*;

use super::components::{light_color, HudText, LightLamp, LightLineDash, SimStreetResource};

const ROAD_WIDTH: f32 = 6.0;
const ROAD_HEIGHT: f32 = 0.05;
const POLE_HEIGHT: f32 = 5.0;
const POLE_OFFSET: f32 = ROAD_WIDTH / 2.0 + 1.0;
const LAMP_RADIUS: f32 = 0.8;

/// System to create the road, light line and light pole from simulation state
pub fn spawn_street_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_street: Res<SimStreetResource>,
) {
    let street = &sim_street.0;
    let config = street.config();

    // Road slab
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(config.road_length, ROAD_HEIGHT, ROAD_WIDTH))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.2, 0.2))),
        Transform::from_translation(Vec3::new(config.road_length / 2.0, ROAD_HEIGHT / 2.0, 0.0)),
    ));

    spawn_light_line(&mut commands, &mut meshes, &mut materials, config.light_position);

    // Where cars actually halt, when that is short of the light line
    if config.stop_buffer > 0.0 {
        let stop_x = (config.light_position - config.stop_buffer).max(0.0);
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.3, ROAD_HEIGHT, ROAD_WIDTH))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
            Transform::from_translation(Vec3::new(stop_x, ROAD_HEIGHT, 0.0)),
        ));
    }

    // Light pole with a lamp that changes color
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.3, POLE_HEIGHT, 0.3))),
        MeshMaterial3d(materials.add(Color::srgb(0.4, 0.4, 0.4))),
        Transform::from_translation(Vec3::new(
            config.light_position,
            POLE_HEIGHT / 2.0,
            -POLE_OFFSET,
        )),
    ));
    commands.spawn((
        LightLamp,
        Mesh3d(meshes.add(Sphere::new(LAMP_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: light_color(street.light_color()),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(Vec3::new(
            config.light_position,
            POLE_HEIGHT + LAMP_RADIUS,
            -POLE_OFFSET,
        )),
    ));
}

/// Dashed line across the road at the light position
fn spawn_light_line(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    light_position: f32,
) {
    const DASH_LENGTH: f32 = 0.6;
    const DASH_COUNT: usize = 5;
    let dash_color = Color::srgb(0.6, 0.6, 0.6);

    let spacing = ROAD_WIDTH / DASH_COUNT as f32;
    for i in 0..DASH_COUNT {
        let z = -ROAD_WIDTH / 2.0 + spacing * (i as f32 + 0.5);
        commands.spawn((
            LightLineDash,
            Mesh3d(meshes.add(Cuboid::new(0.2, ROAD_HEIGHT, DASH_LENGTH))),
            MeshMaterial3d(materials.add(dash_color)),
            Transform::from_translation(Vec3::new(light_position, ROAD_HEIGHT * 1.5, z)),
        ));
    }
}

/// System to setup the text overlay at the top-left of the screen
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Tick: 0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HudText::Status,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText::Stats,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.5)),
                HudText::Paused,
            ));
        });
}
