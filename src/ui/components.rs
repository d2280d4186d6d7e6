//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{CarId, LightColor, SimStreet};

/// Resource wrapper for the street simulation
#[derive(Resource)]
pub struct SimStreetResource(pub SimStreet);

/// Whether the simulation clock is halted
#[derive(Resource, Default)]
pub struct SimPaused(pub bool);

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a Bevy entity to a simulation car
#[derive(Component)]
pub struct CarLink(pub CarId);

/// The lamp on top of the light pole
#[derive(Component)]
pub struct LightLamp;

/// Dashes marking the light line across the road
#[derive(Component)]
pub struct LightLineDash;

/// Marker for overlay text elements
#[derive(Component)]
pub enum HudText {
    /// Tick, light color and cars on the road
    Status,
    /// Running statistics
    Stats,
    /// Paused indicator
    Paused,
}

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub cars: HashMap<CarId, Entity>,
}

impl EntityMappings {
    /// Drop mappings for cars no longer on the street, returning their entities
    pub fn release_departed(&mut self, street: &SimStreet) -> Vec<Entity> {
        let mut departed = Vec::new();
        self.cars.retain(|id, entity| {
            let on_street = street.cars.contains_key(id);
            if !on_street {
                departed.push(*entity);
            }
            on_street
        });
        departed
    }
}

/// Light color currently painted on the lamp and the light line
#[derive(Resource, Default)]
pub struct ShownLight(pub Option<LightColor>);

impl ShownLight {
    /// Mark `current` as shown, returning it only when the visuals need repainting
    pub fn repaint(&mut self, current: LightColor) -> Option<LightColor> {
        if self.0 == Some(current) {
            return None;
        }
        self.0 = Some(current);
        Some(current)
    }
}

/// Render color for each light phase
pub fn light_color(color: LightColor) -> Color {
    match color {
        LightColor::Green => Color::srgb(0.0, 0.8, 0.0),
        LightColor::Yellow => Color::srgb(1.0, 0.84, 0.0),
        LightColor::Red => Color::srgb(0.9, 0.0, 0.0),
    }
}
