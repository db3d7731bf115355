// Map view domain model - what the map widget must render
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            markers: Vec::new(),
        }
    }

    /// Recenter on `position` and drop a marker there.
    pub fn focus(&mut self, position: LatLng, title: String) {
        self.center = position;
        self.markers.push(Marker { position, title });
    }
}

/// A place picked in the autocomplete widget. Places the widget could not
/// resolve come without geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSelection {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
}
