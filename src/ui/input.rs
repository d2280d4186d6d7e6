//! Input handling systems

use bevy::prelude::*;
use bevy::log::info;

use super::components::{SimPaused, SimStreetResource};

/// Handle basic keyboard input
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<AppExit>,
    mut paused: ResMut<SimPaused>,
    mut sim_street: ResMut<SimStreetResource>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    if keyboard.just_pressed(KeyCode::Space) {
        paused.0 = !paused.0;
        info!("Simulation {}", if paused.0 { "paused" } else { "resumed" });
    }

    // Force an arrival regardless of the random draw
    if keyboard.just_pressed(KeyCode::Enter) && sim_street.0.try_spawn_car_at_entrance().is_none() {
        info!("Entrance occupied, no car added");
    }
}
