// Sensor entry domain model
use crate::domain::address::Address;
use crate::domain::reading::{Category, SensorReading};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Panel-assigned identifier. Ids are never reused, so a stale id cannot
/// address a newer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SensorId(pub u64);

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SensorEntry {
    pub id: SensorId,
    pub address: Address,
    pub api_url: String,
    pub reading: SensorReading,
    pub fetched_at: DateTime<Utc>,
}

impl SensorEntry {
    pub fn new(id: SensorId, address: Address, api_url: String, reading: SensorReading) -> Self {
        Self {
            id,
            address,
            api_url,
            reading,
            fetched_at: Utc::now(),
        }
    }

    pub fn to_card(&self, in_route: bool) -> SensorCard {
        let category = self.reading.category();
        SensorCard {
            id: self.id,
            address: self.address.clone(),
            battery: self.reading.battery,
            mean_distance: self.reading.mean_distance,
            internal_temp: self.reading.internal_temp,
            reported_name: self.reading.address.clone(),
            category,
            background_color: category.background_color(),
            in_route,
            fetched_at: self.fetched_at,
        }
    }
}

/// What the page renders for one sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorCard {
    pub id: SensorId,
    pub address: Address,
    pub battery: f64,
    pub mean_distance: f64,
    pub internal_temp: f64,
    pub reported_name: String,
    pub category: Category,
    pub background_color: &'static str,
    pub in_route: bool,
    pub fetched_at: DateTime<Utc>,
}
