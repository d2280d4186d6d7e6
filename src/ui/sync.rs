//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    light_color, CarLink, EntityMappings, HudText, LightLamp, LightLineDash, ShownLight,
    SimPaused, SimStreetResource,
};
use crate::simulation::CAR_LENGTH;

const CAR_WIDTH: f32 = 1.8;
const CAR_HEIGHT: f32 = 1.4;

/// System to run one simulation step per fixed timestep
pub fn tick_simulation(paused: Res<SimPaused>, mut sim_street: ResMut<SimStreetResource>) {
    if !paused.0 {
        sim_street.0.tick();
    }
}

/// System to sync car visuals from simulation state
pub fn sync_cars(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_street: Res<SimStreetResource>,
    mut mappings: ResMut<EntityMappings>,
    mut car_query: Query<(&CarLink, &mut Transform)>,
) {
    let street = &sim_street.0;
    // Boxes are centered, so shift them back to put the car's front on its position
    let car_center = |position: f32| Vec3::new(position - CAR_LENGTH / 2.0, CAR_HEIGHT / 2.0, 0.0);

    // Cars that left the street
    for entity in mappings.release_departed(street) {
        commands.entity(entity).despawn();
    }

    for (link, mut transform) in car_query.iter_mut() {
        if let Some(car) = street.cars.get(&link.0) {
            transform.translation = car_center(car.position);
        }
    }

    // Spawn new cars
    for (id, car) in &street.cars {
        if !mappings.cars.contains_key(id) {
            let entity = commands
                .spawn((
                    CarLink(*id),
                    Mesh3d(meshes.add(Cuboid::new(CAR_LENGTH, CAR_HEIGHT, CAR_WIDTH))),
                    MeshMaterial3d(materials.add(Color::srgb(0.27, 0.51, 0.71))),
                    Transform::from_translation(car_center(car.position)),
                ))
                .id();
            mappings.cars.insert(*id, entity);
        }
    }
}

/// System to recolor the lamp and the light line to the current phase
pub fn update_light_visuals(
    sim_street: Res<SimStreetResource>,
    lamp_query: Query<&MeshMaterial3d<StandardMaterial>, With<LightLamp>>,
    dash_query: Query<&MeshMaterial3d<StandardMaterial>, With<LightLineDash>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut shown: ResMut<ShownLight>,
) {
    // Touching a material marks it changed, so only repaint on a phase change
    let Some(phase) = shown.repaint(sim_street.0.light_color()) else {
        return;
    };
    let color = light_color(phase);

    for material_handle in lamp_query.iter().chain(dash_query.iter()) {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = color;
        }
    }
}

/// System to refresh the overlay text
pub fn update_hud_text(
    sim_street: Res<SimStreetResource>,
    paused: Res<SimPaused>,
    mut text_query: Query<(&HudText, &mut Text)>,
) {
    let street = &sim_street.0;
    let frame = street.frame();
    let stats = street.stats();

    for (kind, mut text) in text_query.iter_mut() {
        match kind {
            HudText::Status => {
                **text = format!(
                    "{} | Next change: {:.1}s",
                    street.status_line(),
                    frame.time_until_change
                );
            }
            HudText::Stats => {
                **text = format!(
                    "Queue: {} | Exited: {} | Blocked: {} | Avg wait: {:.1}s | {:.1} cars/min",
                    frame.queue_length,
                    stats.cars_exited,
                    stats.arrivals_blocked,
                    stats.average_wait(),
                    stats.throughput_per_minute(frame.time)
                );
            }
            HudText::Paused => {
                **text = if paused.0 {
                    "PAUSED (Space to resume)".to_string()
                } else {
                    String::new()
                };
            }
        }
    }
}
