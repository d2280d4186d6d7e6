//! Running statistics for a street simulation

use log::info;

use super::car::SimCar;

/// Counters accumulated while the simulation runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimStats {
    pub cars_spawned: u32,
    pub cars_exited: u32,
    /// Arrivals dropped because the entrance was still occupied
    pub arrivals_blocked: u32,
    /// Seconds exited cars spent stationary
    pub total_wait_time: f32,
    /// Seconds exited cars spent on the street
    pub total_travel_time: f32,
    /// Halts made by exited cars
    pub total_stops: u32,
    /// Largest number of cars stationary at the same time
    pub max_queue_length: usize,
}

impl SimStats {
    pub fn record_spawn(&mut self) {
        self.cars_spawned += 1;
    }

    pub fn record_blocked_arrival(&mut self) {
        self.arrivals_blocked += 1;
    }

    pub fn record_exit(&mut self, car: &SimCar, now: f32) {
        self.cars_exited += 1;
        self.total_wait_time += car.wait_time;
        self.total_travel_time += car.travel_time(now);
        self.total_stops += car.stops;
    }

    pub fn record_queue(&mut self, queue_length: usize) {
        self.max_queue_length = self.max_queue_length.max(queue_length);
    }

    /// Mean seconds an exited car spent stationary
    pub fn average_wait(&self) -> f32 {
        if self.cars_exited == 0 {
            0.0
        } else {
            self.total_wait_time / self.cars_exited as f32
        }
    }

    /// Mean seconds an exited car spent on the street
    pub fn average_travel_time(&self) -> f32 {
        if self.cars_exited == 0 {
            0.0
        } else {
            self.total_travel_time / self.cars_exited as f32
        }
    }

    /// Cars leaving the street per simulated minute
    pub fn throughput_per_minute(&self, elapsed: f32) -> f32 {
        if elapsed <= 0.0 {
            0.0
        } else {
            self.cars_exited as f32 / elapsed * 60.0
        }
    }

    /// Share of spawned cars that made it off the street, as a percentage
    pub fn completion_rate(&self) -> f32 {
        if self.cars_spawned == 0 {
            0.0
        } else {
            self.cars_exited as f32 / self.cars_spawned as f32 * 100.0
        }
    }

    /// Log the end-of-run report
    pub fn log_report(&self, elapsed: f32, active_cars: usize) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", elapsed);
        info!("Total cars spawned: {}", self.cars_spawned);
        info!("Total cars exited: {}", self.cars_exited);
        info!("Active cars: {}", active_cars);
        info!("Blocked arrivals: {}", self.arrivals_blocked);
        info!("Average wait: {:.2}s", self.average_wait());
        info!("Average travel time: {:.2}s", self.average_travel_time());
        info!("Max queue length: {}", self.max_queue_length);
        info!("Throughput: {:.1} cars/min", self.throughput_per_minute(elapsed));
        info!("Completion rate: {:.1}%", self.completion_rate());
    }
}
