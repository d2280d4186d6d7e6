//! Standalone traffic light simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod car;
mod config;
mod lane;
mod light;
mod stats;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use car::{CarUpdateResult, SimCar};
#[allow(unused_imports)]
pub use config::{
    ArrivalModel, Scenario, StreetConfig, DEFAULT_LIGHT_POSITION, DEFAULT_ROAD_LENGTH,
    DEFAULT_TIME_STEP, TWO_PHASE_SEED,
};
#[allow(unused_imports)]
pub use lane::Lane;
pub use light::TrafficLight;
#[allow(unused_imports)]
pub use stats::SimStats;
#[allow(unused_imports)]
pub use types::{
    CarId, LightColor, SimId, CAR_LENGTH, DEFAULT_STOP_BUFFER, SAFE_FOLLOWING_MULTIPLIER,
    STOPPED_EPSILON,
};
pub use world::{SimStreet, StreetFrame, DEFAULT_STRIP_WIDTH};
