//! Traffic Light Simulation Library
//!
//! Cars on a one-way street passing a single traffic light. The simulation
//! can run headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
