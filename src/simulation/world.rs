//! Street simulation that ties everything together
//!
//! This is the entry point for running the traffic light simulation
//! without any Bevy dependencies.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::collections::HashMap;

use super::car::{CarUpdateResult, SimCar};
use super::config::StreetConfig;
use super::lane::Lane;
use super::stats::SimStats;
use super::types::{CarId, LightColor, SimId};

/// Width of the terminal rendition used by `draw_street`
pub const DEFAULT_STRIP_WIDTH: usize = 80;

/// Narrowest strip `render_strip` will draw
const MIN_STRIP_WIDTH: usize = 10;

/// Snapshot of the street handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct StreetFrame {
    pub tick: u64,
    pub time: f32,
    pub light: LightColor,
    /// Seconds until the light changes color
    pub time_until_change: f32,
    /// Cars from the front of the street to the back
    pub cars: Vec<(CarId, f32)>,
    pub queue_length: usize,
}

/// A one-way street with a single traffic light
pub struct SimStreet {
    config: StreetConfig,

    /// All cars currently on the street
    pub cars: HashMap<CarId, SimCar>,

    /// Ordering of the cars along the lane
    lane: Lane,

    /// Next ID to assign
    next_id: usize,

    /// Completed simulation steps
    tick: u64,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    stats: SimStats,
}

impl SimStreet {
    pub fn new(config: StreetConfig) -> Result<Self> {
        config.validate().context("Invalid street configuration")?;

        let rng = config.seed.map(StdRng::seed_from_u64);
        info!(
            "Street ready: {:.0}m long, light at {:.0}m, arrivals {}, seed {:?}",
            config.road_length,
            config.light_position,
            config.arrivals.describe(),
            config.seed
        );

        Ok(Self {
            config,
            cars: HashMap::new(),
            lane: Lane::new(),
            next_id: 0,
            tick: 0,
            rng,
            stats: SimStats::default(),
        })
    }

    pub fn config(&self) -> &StreetConfig {
        &self.config
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Elapsed simulation time in seconds
    ///
    /// Derived from the tick count so long runs don't accumulate rounding drift.
    pub fn time(&self) -> f32 {
        self.tick as f32 * self.config.time_step
    }

    /// Light color at the current time, which the next tick samples
    pub fn light_color(&self) -> LightColor {
        self.config.light.phase(self.time())
    }

    /// Get a random value in `[0, 1)`, using seeded RNG if available
    fn random_unit(&mut self) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.random::<f32>(),
            None => rand::rng().random::<f32>(),
        }
    }

    fn next_car_id(&mut self) -> CarId {
        let id = CarId(SimId(self.next_id));
        self.next_id += 1;
        id
    }

    /// Whether the rearmost car is still too close to the entrance for another car
    pub fn entrance_blocked(&self) -> bool {
        match self.lane.rearmost() {
            Some((position, _)) => {
                self.config.following_distance > 0.0 && position < self.config.following_distance
            }
            None => false,
        }
    }

    /// Draw one random arrival and spawn a car if it happens
    pub fn spawn_car(&mut self) -> Option<CarId> {
        let probability = self.config.arrivals.probability(self.config.time_step);
        if probability <= 0.0 || self.random_unit() >= probability {
            return None;
        }
        self.try_spawn_car_at_entrance()
    }

    /// Put a car at the entrance unless another car is in the way
    pub fn try_spawn_car_at_entrance(&mut self) -> Option<CarId> {
        if self.entrance_blocked() {
            self.stats.record_blocked_arrival();
            debug!("Arrival blocked at tick {}: entrance occupied", self.tick);
            return None;
        }

        let id = self.next_car_id();
        let car = SimCar::new(id, 0.0, self.config.car_speed, self.time());
        self.lane.update_car_position(id, car.position);
        self.cars.insert(id, car);
        self.stats.record_spawn();
        debug!("Car {:?} entered at t={:.1}s", id.0 .0, self.time());
        Some(id)
    }

    /// Move every car one step, front to back, and return the cars that left
    fn update_cars(&mut self, light_open: bool) -> Vec<CarId> {
        let delta_secs = self.config.time_step;
        let light_position = self.config.light_position;
        let stop_buffer = self.config.stop_buffer;
        let following_distance = self.config.following_distance;
        let road_length = self.config.road_length;

        let mut reached_end = Vec::new();
        let mut queue_length = 0;

        // Front cars move first so followers see where their leader ended up.
        for car_id in self.lane.front_to_back() {
            let leader = self.lane.car_ahead(car_id);
            let Some(car) = self.cars.get_mut(&car_id) else {
                warn!("Car {:?} tracked on the lane but missing from the street", car_id.0 .0);
                self.lane.remove_car(car_id);
                continue;
            };

            let light_limit = car.light_limit(light_position, stop_buffer, light_open);
            let follow_limit = leader.map(|(leader_position, _)| leader_position - following_distance);
            let limit = match (light_limit, follow_limit) {
                (Some(light), Some(follow)) => Some(light.min(follow)),
                (light, follow) => light.or(follow),
            };

            car.advance(delta_secs, limit);
            if car.is_stopped {
                queue_length += 1;
            }
            self.lane.update_car_position(car_id, car.position);

            if car.check_end(road_length) == CarUpdateResult::ReachedEnd {
                reached_end.push(car_id);
            }
        }

        self.stats.record_queue(queue_length);
        reached_end
    }

    /// Main simulation tick
    pub fn tick(&mut self) {
        self.spawn_car();

        // The light is sampled before the clock moves. Renderers read the state after
        // the tick, so at a phase boundary they show the color for the next step.
        let light_open = self.config.light.allows_passing(self.time());
        let reached_end = self.update_cars(light_open);

        self.tick += 1;
        let now = self.time();

        for car_id in reached_end {
            self.lane.remove_car(car_id);
            if let Some(car) = self.cars.remove(&car_id) {
                self.stats.record_exit(&car, now);
                debug!(
                    "Car {:?} left after {:.1}s ({:.1}s waiting)",
                    car_id.0 .0,
                    car.travel_time(now),
                    car.wait_time
                );
            }
        }
    }

    /// Run for a number of ticks
    pub fn run_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Run until `seconds` of simulation time have elapsed, returning the ticks run
    pub fn run_for(&mut self, seconds: f32) -> u64 {
        let ticks = (seconds.max(0.0) / self.config.time_step).round() as u64;
        self.run_ticks(ticks);
        ticks
    }

    /// Cars from the front of the street to the back
    pub fn cars_in_order(&self) -> Vec<&SimCar> {
        self.lane
            .front_to_back()
            .into_iter()
            .filter_map(|id| self.cars.get(&id))
            .collect()
    }

    /// Car positions from the front of the street to the back
    pub fn car_positions(&self) -> Vec<f32> {
        self.cars_in_order().iter().map(|car| car.position).collect()
    }

    /// Cars currently stationary
    pub fn queue_length(&self) -> usize {
        self.cars.values().filter(|car| car.is_stopped).count()
    }

    /// Cars that have not reached the light line yet
    pub fn cars_before_light(&self) -> usize {
        self.lane.cars_before(self.config.light_position)
    }

    pub fn frame(&self) -> StreetFrame {
        let time = self.time();
        StreetFrame {
            tick: self.tick,
            time,
            light: self.config.light.phase(time),
            time_until_change: self.config.light.time_until_change(time),
            cars: self
                .cars_in_order()
                .iter()
                .map(|car| (car.id, car.position))
                .collect(),
            queue_length: self.queue_length(),
        }
    }

    /// One-line status: ticks run, light color and cars on the road
    ///
    /// The color is the one the next tick will obey, the same as [`Self::light_color`].
    pub fn status_line(&self) -> String {
        format!(
            "Tick: {} | Light: {} | Cars on road: {}",
            self.tick,
            self.light_color(),
            self.cars.len()
        )
    }

    /// Render the street as text: light row, road row and status line
    pub fn render_strip(&self, width: usize) -> String {
        let width = width.max(MIN_STRIP_WIDTH);
        let scale = (width - 1) as f32 / self.config.road_length;
        let to_column = |x: f32| -> usize { ((x.max(0.0) * scale).round() as usize).min(width - 1) };

        let light_column = to_column(self.config.light_position);

        let mut light_row = vec![' '; width];
        light_row[light_column] = self.light_color().initial();

        let mut road_row = vec!['='; width];
        road_row[light_column] = '|';
        for car in self.cars.values() {
            road_row[to_column(car.position)] = 'C';
        }

        let light_line: String = light_row.into_iter().collect();
        let road_line: String = road_row.into_iter().collect();
        format!("{}\n{}\n{}", light_line.trim_end(), road_line, self.status_line())
    }

    /// Draw the street in the terminal
    pub fn draw_street(&self) {
        println!("{}", self.render_strip(DEFAULT_STRIP_WIDTH));
    }

    /// Print a summary of the street state
    pub fn print_summary(&self) {
        let light = self.config.light;
        let time = self.time();
        println!("=== Traffic Light Summary ===");
        println!("Time: {:.2}s (tick {})", time, self.tick);
        println!(
            "Light: {} ({:.1}s until change, cycle {:.1}s)",
            light.phase(time),
            light.time_until_change(time),
            light.cycle_length()
        );
        println!(
            "Cars on road: {}, before light: {}, stopped: {}",
            self.cars.len(),
            self.cars_before_light(),
            self.queue_length()
        );
        println!(
            "Spawned: {}, exited: {}, blocked arrivals: {}",
            self.stats.cars_spawned, self.stats.cars_exited, self.stats.arrivals_blocked
        );

        if !self.cars.is_empty() {
            println!("--- Active Cars ---");
            for car in self.cars_in_order() {
                println!(
                    "  Car {:?}: position={:.1}, waited={:.1}s, stops={}{}",
                    car.id.0 .0,
                    car.position,
                    car.wait_time,
                    car.stops,
                    if car.is_stopped { " (stopped)" } else { "" }
                );
            }
        }
    }

    /// Log the end-of-run statistics
    pub fn log_report(&self) {
        self.stats.log_report(self.time(), self.cars.len());
    }
}
