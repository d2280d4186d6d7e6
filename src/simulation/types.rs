//! Core types for the traffic light simulation
//!
//! These are standalone types that don't depend on Bevy.

use std::fmt;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub SimId);

/// Color currently shown by the traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightColor {
    Green,
    Yellow,
    Red,
}

impl LightColor {
    pub fn name(&self) -> &'static str {
        match self {
            LightColor::Green => "Green",
            LightColor::Yellow => "Yellow",
            LightColor::Red => "Red",
        }
    }

    /// Single character used by the terminal renderer
    pub fn initial(&self) -> char {
        match self {
            LightColor::Green => 'G',
            LightColor::Yellow => 'Y',
            LightColor::Red => 'R',
        }
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Length of a car in meters
pub const CAR_LENGTH: f32 = 4.0;

/// Safe following distance multiplier for CAR_LENGTH
pub const SAFE_FOLLOWING_MULTIPLIER: f32 = 1.5;

/// Gap left before the light line when stopping on yellow or red
pub const DEFAULT_STOP_BUFFER: f32 = 2.0;

/// Cars moving less than this in a tick count as stationary
pub const STOPPED_EPSILON: f32 = 1e-4;
