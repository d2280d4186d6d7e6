//! Occupancy index for the single lane of the street
//!
//! Standalone implementation that doesn't depend on Bevy.

use ordered_float::OrderedFloat;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

use super::types::{CarId, SimId};

/// Cars on the lane ordered by `(position, id)`, rearmost first
#[derive(Debug, Default, Clone)]
pub struct Lane {
    order: BTreeSet<(OrderedFloat<f32>, CarId)>,

    /// Last known position of every tracked car
    positions: HashMap<CarId, OrderedFloat<f32>>,
}

impl Lane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a car at a new position, replacing any previous entry
    pub fn update_car_position(&mut self, car_id: CarId, position: f32) {
        let position = OrderedFloat(position);
        if let Some(previous) = self.positions.insert(car_id, position) {
            self.order.remove(&(previous, car_id));
        }
        self.order.insert((position, car_id));
    }

    pub fn remove_car(&mut self, car_id: CarId) {
        if let Some(previous) = self.positions.remove(&car_id) {
            self.order.remove(&(previous, car_id));
        }
    }

    /// The nearest car in front of `car_id` as `(position, id)`
    pub fn car_ahead(&self, car_id: CarId) -> Option<(f32, CarId)> {
        let position = *self.positions.get(&car_id)?;
        self.order
            .range((Bound::Excluded((position, car_id)), Bound::Unbounded))
            .next()
            .map(|(distance, id)| (distance.into_inner(), *id))
    }

    /// The car closest to the entrance
    pub fn rearmost(&self) -> Option<(f32, CarId)> {
        self.order
            .iter()
            .next()
            .map(|(distance, id)| (distance.into_inner(), *id))
    }

    /// Car IDs from the front of the street to the back
    pub fn front_to_back(&self) -> Vec<CarId> {
        self.order.iter().rev().map(|(_, id)| *id).collect()
    }

    /// Number of tracked cars strictly before `position`
    pub fn cars_before(&self, position: f32) -> usize {
        self.order
            .range(..(OrderedFloat(position), CarId(SimId(0))))
            .count()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
