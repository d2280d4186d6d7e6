//! Street configuration and built-in scenarios

use anyhow::{ensure, Result};
use log::warn;

use super::light::TrafficLight;
use super::types::{CAR_LENGTH, DEFAULT_STOP_BUFFER, SAFE_FOLLOWING_MULTIPLIER};

/// Default street geometry shared by both scenarios
pub const DEFAULT_ROAD_LENGTH: f32 = 120.0;
pub const DEFAULT_LIGHT_POSITION: f32 = 60.0;
pub const DEFAULT_TIME_STEP: f32 = 0.1;

/// Seed used by the two-phase scenario so its runs are reproducible
pub const TWO_PHASE_SEED: u64 = 13;

/// How new cars arrive at the street entrance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrivalModel {
    /// Fixed probability of one arrival per tick
    PerTick(f32),
    /// Expected arrivals per second, approximated as one Bernoulli draw per tick
    PerSecond(f32),
}

impl ArrivalModel {
    /// Probability of an arrival during a tick of `time_step` seconds
    pub fn probability(&self, time_step: f32) -> f32 {
        let p = match *self {
            ArrivalModel::PerTick(p) => p,
            ArrivalModel::PerSecond(rate) => rate * time_step,
        };
        p.clamp(0.0, 1.0)
    }

    /// Same model with a different rate
    pub fn with_rate(&self, rate: f32) -> Self {
        match self {
            ArrivalModel::PerTick(_) => ArrivalModel::PerTick(rate),
            ArrivalModel::PerSecond(_) => ArrivalModel::PerSecond(rate),
        }
    }

    pub fn rate(&self) -> f32 {
        match *self {
            ArrivalModel::PerTick(rate) | ArrivalModel::PerSecond(rate) => rate,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ArrivalModel::PerTick(p) => format!("{:.2} per tick", p),
            ArrivalModel::PerSecond(rate) => format!("{:.2} cars/s", rate),
        }
    }
}

/// Preset street setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Green/red light, cars stop right on the line, seeded arrivals
    TwoPhase,
    /// Green/yellow/red light, cars stop a little before the line
    #[default]
    ThreePhase,
}

/// Everything needed to build a street simulation
#[derive(Debug, Clone, PartialEq)]
pub struct StreetConfig {
    /// Length of the street in meters
    pub road_length: f32,
    /// Distance of the light line from the entrance
    pub light_position: f32,
    /// Cruising speed of every car in meters per second
    pub car_speed: f32,
    /// Simulation step in seconds
    pub time_step: f32,
    /// Gap cars leave before the light line when stopping
    pub stop_buffer: f32,
    /// Minimum gap kept behind the car ahead
    pub following_distance: f32,
    pub arrivals: ArrivalModel,
    pub light: TrafficLight,
    /// Seed for reproducible runs; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for StreetConfig {
    fn default() -> Self {
        Self::from_scenario(Scenario::default())
    }
}

impl StreetConfig {
    pub fn from_scenario(scenario: Scenario) -> Self {
        match scenario {
            Scenario::TwoPhase => Self {
                road_length: DEFAULT_ROAD_LENGTH,
                light_position: DEFAULT_LIGHT_POSITION,
                car_speed: 20.0,
                time_step: DEFAULT_TIME_STEP,
                stop_buffer: 0.0,
                following_distance: CAR_LENGTH * SAFE_FOLLOWING_MULTIPLIER,
                arrivals: ArrivalModel::PerTick(0.35),
                light: TrafficLight::two_phase(4.0, 3.0),
                seed: Some(TWO_PHASE_SEED),
            },
            Scenario::ThreePhase => Self {
                road_length: DEFAULT_ROAD_LENGTH,
                light_position: DEFAULT_LIGHT_POSITION,
                car_speed: 12.0,
                time_step: DEFAULT_TIME_STEP,
                stop_buffer: DEFAULT_STOP_BUFFER,
                following_distance: CAR_LENGTH * SAFE_FOLLOWING_MULTIPLIER,
                arrivals: ArrivalModel::PerSecond(0.25),
                light: TrafficLight::new(12.0, 3.0, 10.0),
                seed: None,
            },
        }
    }

    /// Check that the configuration describes a drivable street
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.road_length.is_finite() && self.road_length > 0.0,
            "Road length must be positive (got {})",
            self.road_length
        );
        ensure!(
            self.light_position.is_finite() && self.light_position >= 0.0,
            "Light position must be non-negative (got {})",
            self.light_position
        );
        ensure!(
            self.light_position < self.road_length,
            "Stop line must be within the road length."
        );
        ensure!(
            self.time_step.is_finite() && self.time_step > 0.0,
            "Time step must be positive (got {})",
            self.time_step
        );
        ensure!(
            self.car_speed.is_finite() && self.car_speed >= 0.0,
            "Car speed must be non-negative (got {})",
            self.car_speed
        );
        ensure!(
            self.stop_buffer.is_finite() && self.stop_buffer >= 0.0,
            "Stop buffer must be non-negative (got {})",
            self.stop_buffer
        );
        ensure!(
            self.following_distance.is_finite() && self.following_distance >= 0.0,
            "Following distance must be non-negative (got {})",
            self.following_distance
        );

        let rate = self.arrivals.rate();
        ensure!(
            rate.is_finite() && rate >= 0.0,
            "Arrival rate must be non-negative (got {})",
            rate
        );
        match self.arrivals {
            ArrivalModel::PerTick(p) => {
                ensure!(p <= 1.0, "Per-tick arrival probability must be at most 1 (got {})", p);
            }
            ArrivalModel::PerSecond(rate) => {
                if rate * self.time_step > 1.0 {
                    warn!(
                        "Arrival rate {} cars/s exceeds one car per tick at step {}s; capping at one arrival per tick",
                        rate, self.time_step
                    );
                }
            }
        }

        self.light.validate()
    }
}
