use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::trip::{FieldStats, NewTrip, SortField, SortOrder, Trip, TripPatch, TripStats},
};

/// In-memory trip records in insertion order.
#[derive(Debug, Default)]
pub struct TripCollection {
    trips: Vec<Trip>,
}

impl TripCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.trips.iter().map(|trip| trip.id).max().unwrap_or(0) + 1
    }

    pub fn list(&self, sort: Option<SortField>, order: SortOrder) -> Vec<Trip> {
        let mut items = self.trips.clone();
        if let Some(field) = sort {
            // sort_by is stable, so reversing the comparator keeps ties in insertion order.
            match order {
                SortOrder::Asc => items.sort_by(|a, b| field.compare(a, b)),
                SortOrder::Desc => items.sort_by(|a, b| field.compare(b, a)),
            }
        }
        items
    }

    pub fn get(&self, id: u64) -> Result<&Trip, AppError> {
        self.trips
            .iter()
            .find(|trip| trip.id == id)
            .ok_or(AppError::NotFound)
    }

    pub fn create(&mut self, input: NewTrip) -> Result<Trip, AppError> {
        let fields = input.validate()?;
        let trip = Trip::new(self.next_id(), fields);
        self.trips.push(trip.clone());
        info!(id = trip.id, destination = %trip.destination, "trip created");
        Ok(trip)
    }

    pub fn update(&mut self, id: u64, patch: TripPatch) -> Result<Trip, AppError> {
        let trip = self
            .trips
            .iter_mut()
            .find(|trip| trip.id == id)
            .ok_or(AppError::NotFound)?;
        patch.apply(trip);
        debug!(id, "trip updated");
        Ok(trip.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Trip, AppError> {
        let index = self
            .trips
            .iter()
            .position(|trip| trip.id == id)
            .ok_or(AppError::NotFound)?;
        let removed = self.trips.remove(index);
        info!(id, remaining = self.trips.len(), "trip deleted");
        Ok(removed)
    }

    pub fn stats(&self) -> Result<TripStats, AppError> {
        if self.trips.is_empty() {
            return Err(AppError::NoData);
        }

        let days: Vec<i64> = self.trips.iter().map(|trip| trip.days).collect();
        let prices: Vec<f64> = self.trips.iter().map(|trip| trip.price).collect();
        let ratings: Vec<f64> = self.trips.iter().map(|trip| trip.rating).collect();

        Ok(TripStats {
            days: FieldStats {
                min: days.iter().copied().min().unwrap_or_default(),
                max: days.iter().copied().max().unwrap_or_default(),
                avg: average(days.iter().map(|&value| value as f64)),
            },
            price: float_stats(&prices),
            rating: float_stats(&ratings),
        })
    }
}

fn float_stats(values: &[f64]) -> FieldStats<f64> {
    FieldStats {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg: average(values.iter().copied()),
    }
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    round2(values.sum::<f64>() / count as f64)
}

/// Half-way cases go to the even digit.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Shared handle to one collection. Each method holds the lock for a single operation.
#[derive(Clone, Default)]
pub struct TripStore {
    inner: Arc<RwLock<TripCollection>>,
}

impl TripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self, sort: Option<SortField>, order: SortOrder) -> Vec<Trip> {
        self.inner.read().await.list(sort, order)
    }

    pub async fn get(&self, id: u64) -> Result<Trip, AppError> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn create(&self, input: NewTrip) -> Result<Trip, AppError> {
        self.inner.write().await.create(input)
    }

    pub async fn update(&self, id: u64, patch: TripPatch) -> Result<Trip, AppError> {
        self.inner.write().await.update(id, patch)
    }

    pub async fn delete(&self, id: u64) -> Result<Trip, AppError> {
        self.inner.write().await.delete(id)
    }

    pub async fn stats(&self) -> Result<TripStats, AppError> {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
