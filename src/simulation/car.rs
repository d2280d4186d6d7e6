//! Car movement logic for the traffic light simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{CarId, STOPPED_EPSILON};

/// Result of a car update indicating what action should be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarUpdateResult {
    Continue,   // Car is still on the street
    ReachedEnd, // Car drove off the end of the street
}

/// A car in the traffic simulation
#[derive(Debug, Clone)]
pub struct SimCar {
    pub id: CarId,
    /// Distance from the street entrance in meters
    pub position: f32,
    /// Cruising speed in meters per second
    pub speed: f32,
    /// Simulation time at which the car entered the street
    pub spawned_at: f32,
    /// Total seconds spent stationary
    pub wait_time: f32,
    /// Number of times the car came to a halt
    pub stops: u32,
    pub is_stopped: bool,
}

impl SimCar {
    pub fn new(id: CarId, position: f32, speed: f32, spawned_at: f32) -> Self {
        Self {
            id,
            position,
            speed,
            spawned_at,
            wait_time: 0.0,
            stops: 0,
            is_stopped: false,
        }
    }

    /// Furthest position the light lets this car reach
    ///
    /// Returns `None` when the light does not constrain the car: it is green,
    /// or the car is already beyond the light line. A car sitting exactly on
    /// the line waits there.
    pub fn light_limit(&self, light_position: f32, stop_buffer: f32, light_open: bool) -> Option<f32> {
        if light_open || self.position > light_position {
            return None;
        }

        // A car already inside the buffer holds where it is.
        Some((light_position - stop_buffer).max(self.position))
    }

    /// Advance the car by `delta_secs`, never past `limit`
    ///
    /// Returns the distance moved.
    pub fn advance(&mut self, delta_secs: f32, limit: Option<f32>) -> f32 {
        let step_distance = self.speed * delta_secs;
        let movement = match limit {
            Some(limit) => step_distance.min((limit - self.position).max(0.0)),
            None => step_distance,
        };
        self.position += movement;

        let wanted_to_move = step_distance > STOPPED_EPSILON;
        if wanted_to_move && movement <= STOPPED_EPSILON {
            if !self.is_stopped {
                self.stops += 1;
            }
            self.is_stopped = true;
            self.wait_time += delta_secs;
        } else {
            self.is_stopped = false;
        }

        movement
    }

    pub fn check_end(&self, road_length: f32) -> CarUpdateResult {
        if self.position >= road_length {
            CarUpdateResult::ReachedEnd
        } else {
            CarUpdateResult::Continue
        }
    }

    /// Seconds since the car entered the street
    pub fn travel_time(&self, now: f32) -> f32 {
        (now - self.spawned_at).max(0.0)
    }
}
