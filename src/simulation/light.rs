//! Traffic light phase logic
//!
//! Standalone implementation that doesn't depend on Bevy.

use anyhow::{ensure, Result};

use super::types::LightColor;

/// A fixed-cycle traffic light: green, then yellow, then red
///
/// The color is a pure function of elapsed simulation time, so the light
/// itself carries no mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficLight {
    pub green_duration: f32,
    pub yellow_duration: f32,
    pub red_duration: f32,
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new(12.0, 3.0, 10.0)
    }
}

impl TrafficLight {
    pub fn new(green_duration: f32, yellow_duration: f32, red_duration: f32) -> Self {
        Self {
            green_duration,
            yellow_duration,
            red_duration,
        }
    }

    /// A light that only switches between green and red
    pub fn two_phase(green_duration: f32, red_duration: f32) -> Self {
        Self::new(green_duration, 0.0, red_duration)
    }

    pub fn cycle_length(&self) -> f32 {
        self.green_duration + self.yellow_duration + self.red_duration
    }

    /// Position within the current cycle, always in `[0, cycle)`
    fn cycle_position(&self, time: f32) -> f32 {
        time.rem_euclid(self.cycle_length())
    }

    /// Color of the light at the given elapsed time
    pub fn phase(&self, time: f32) -> LightColor {
        let position = self.cycle_position(time);
        if position < self.green_duration {
            LightColor::Green
        } else if position < self.green_duration + self.yellow_duration {
            LightColor::Yellow
        } else {
            LightColor::Red
        }
    }

    /// Whether cars may cross the light line at `time`. Yellow means stop.
    pub fn allows_passing(&self, time: f32) -> bool {
        self.phase(time) == LightColor::Green
    }

    /// Seconds until the light shows a different color
    pub fn time_until_change(&self, time: f32) -> f32 {
        let position = self.cycle_position(time);
        let green_end = self.green_duration;
        let yellow_end = green_end + self.yellow_duration;
        let remaining = match self.phase(time) {
            LightColor::Green => green_end - position,
            LightColor::Yellow => yellow_end - position,
            LightColor::Red => self.cycle_length() - position,
        };
        remaining.max(0.0)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, duration) in [
            ("green", self.green_duration),
            ("yellow", self.yellow_duration),
            ("red", self.red_duration),
        ] {
            ensure!(
                duration.is_finite() && duration >= 0.0,
                "Light {} duration must be a non-negative number (got {})",
                name,
                duration
            );
        }
        ensure!(
            self.cycle_length() > 0.0,
            "Light cycle must be longer than zero seconds"
        );
        Ok(())
    }
}
