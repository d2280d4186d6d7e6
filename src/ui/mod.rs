//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimStreet` and renders it using Bevy's 3D graphics.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, ShownLight, SimPaused, SimStreetResource};

use input::handle_input;
use spawner::{setup_hud, spawn_street_visuals};
use sync::{sync_cars, tick_simulation, update_hud_text, update_light_visuals};
use world::setup_world;

/// Plugin to register all UI systems
///
/// Expects a [`SimStreetResource`] to be inserted before the app runs.
pub struct TrafficLightUIPlugin;

impl Plugin for TrafficLightUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EntityMappings>()
            .init_resource::<SimPaused>()
            .init_resource::<ShownLight>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_street_visuals.after(setup_world),
                    setup_hud,
                ),
            )
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    sync_cars,
                    update_light_visuals,
                    update_hud_text,
                    handle_input,
                ),
            );
    }
}
