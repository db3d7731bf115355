// Sensor panel - registry of displayed sensors and the route list they feed
use crate::domain::address::Address;
use crate::domain::error::PanelError;
use crate::domain::reading::SensorReading;
use crate::domain::route::RouteList;
use crate::domain::sensor::{SensorCard, SensorEntry, SensorId};
use chrono::Utc;
use serde::Serialize;

/// Owns every displayed sensor entry together with the route built from them.
///
/// Removing an entry always takes its address off the route, so the route
/// never names a sensor that is gone.
#[derive(Debug, Default)]
pub struct SensorPanel {
    next_id: u64,
    entries: Vec<SensorEntry>,
    route: RouteList,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorRemoval {
    pub id: SensorId,
    pub address: Address,
    pub left_route: bool,
}

impl SensorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, address: Address, api_url: String, reading: SensorReading) -> SensorId {
        self.next_id += 1;
        let id = SensorId(self.next_id);
        tracing::debug!("Registering sensor {} at {}", id, address);
        self.entries.push(SensorEntry::new(id, address, api_url, reading));
        id
    }

    pub fn entry(&self, id: SensorId) -> Option<&SensorEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn add_to_route(&mut self, id: SensorId) -> Result<bool, PanelError> {
        let address = self
            .entry(id)
            .map(|e| e.address.clone())
            .ok_or(PanelError::UnknownSensor(id))?;
        Ok(self.route.add(address))
    }

    pub fn remove_from_route(&mut self, address: &Address) -> bool {
        self.route.remove(address)
    }

    pub fn remove_sensor(&mut self, id: SensorId) -> Result<SensorRemoval, PanelError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(PanelError::UnknownSensor(id))?;
        let entry = self.entries.remove(index);

        let left_route = self.route.remove(&entry.address);

        tracing::debug!(
            "Removed sensor {} at {} (left route: {})",
            id,
            entry.address,
            left_route
        );

        Ok(SensorRemoval {
            id,
            address: entry.address,
            left_route,
        })
    }

    /// Store a freshly fetched reading, unless the entry was removed while the
    /// fetch was in flight.
    pub fn apply_reading(&mut self, id: SensorId, reading: SensorReading) -> Result<(), PanelError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(PanelError::UnknownSensor(id))?;
        entry.reading = reading;
        entry.fetched_at = Utc::now();
        Ok(())
    }

    pub fn card(&self, id: SensorId) -> Option<SensorCard> {
        self.entry(id)
            .map(|e| e.to_card(self.route.contains(&e.address)))
    }

    pub fn cards(&self) -> Vec<SensorCard> {
        self.entries
            .iter()
            .map(|e| e.to_card(self.route.contains(&e.address)))
            .collect()
    }

    /// Ids and endpoint URLs of every displayed sensor.
    pub fn endpoints(&self) -> Vec<(SensorId, String)> {
        self.entries
            .iter()
            .map(|e| (e.id, e.api_url.clone()))
            .collect()
    }

    pub fn route(&self) -> &RouteList {
        &self.route
    }
}
