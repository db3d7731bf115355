// Map service - Use case for reacting to autocomplete place selections
use crate::domain::map::{LatLng, MapView, PlaceSelection};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of a place selection: the map to render and the text that goes
/// into the address field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceOutcome {
    pub address: Option<String>,
    pub map: MapView,
}

#[derive(Clone)]
pub struct MapService {
    view: Arc<Mutex<MapView>>,
}

impl MapService {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            view: Arc::new(Mutex::new(MapView::new(center, zoom))),
        }
    }

    pub async fn view(&self) -> MapView {
        self.view.lock().await.clone()
    }

    pub async fn select_place(&self, place: PlaceSelection) -> PlaceOutcome {
        let address = place
            .formatted_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        let mut view = self.view.lock().await;
        match place.location {
            Some(position) => {
                tracing::debug!(
                    "Centering map on {:.5},{:.5}",
                    position.lat,
                    position.lng
                );
                view.focus(position, address.clone().unwrap_or_default());
            }
            None => {
                tracing::debug!("Selected place has no geometry, map unchanged");
            }
        }

        PlaceOutcome {
            address,
            map: view.clone(),
        }
    }
}
