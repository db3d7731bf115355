// Route list domain model - ordered, duplicate-free stops
use crate::domain::address::Address;
use crate::domain::error::PanelError;
use serde::Serialize;

/// Ordered stops of a route. Insertion order is stop order and no address
/// appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteList {
    stops: Vec<Address>,
}

/// Origin, destination and intermediate stops of a route with at least two stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    pub origin: Address,
    pub destination: Address,
    pub waypoints: Vec<Address>,
}

impl RouteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `address` unless it is already a stop. Returns whether it was added.
    pub fn add(&mut self, address: Address) -> bool {
        if self.contains(&address) {
            return false;
        }
        self.stops.push(address);
        true
    }

    /// Remove `address` if present. Returns whether anything was removed.
    pub fn remove(&mut self, address: &Address) -> bool {
        match self.stops.iter().position(|stop| stop == address) {
            Some(index) => {
                self.stops.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.stops.iter().any(|stop| stop == address)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[Address] {
        &self.stops
    }

    pub fn build_navigation_request(&self) -> Result<NavigationRequest, PanelError> {
        match self.stops.as_slice() {
            [origin, middle @ .., destination] => Ok(NavigationRequest {
                origin: origin.clone(),
                destination: destination.clone(),
                waypoints: middle.to_vec(),
            }),
            _ => Err(PanelError::InsufficientStops {
                stops: self.stops.len(),
            }),
        }
    }
}
