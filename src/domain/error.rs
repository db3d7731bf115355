// Error taxonomy for user-triggered panel actions
use crate::domain::sensor::SensorId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("sensor endpoint unreachable or returned an error: {0}")]
    Network(String),

    #[error("sensor endpoint returned no readings")]
    EmptyData,

    #[error("sensor reading is missing `{path}`")]
    MalformedData { path: String },

    #[error("route needs at least two stops, has {stops}")]
    InsufficientStops { stops: usize },

    #[error("sensor {0} is no longer displayed")]
    UnknownSensor(SensorId),
}

impl PanelError {
    /// Stable machine-readable name, used as the `kind` of an alert body.
    pub fn kind(&self) -> &'static str {
        match self {
            PanelError::Validation(_) => "validation",
            PanelError::Network(_) => "network",
            PanelError::EmptyData => "empty_data",
            PanelError::MalformedData { .. } => "malformed_data",
            PanelError::InsufficientStops { .. } => "insufficient_stops",
            PanelError::UnknownSensor(_) => "unknown_sensor",
        }
    }

    /// The single message shown to the user for this failure.
    pub fn alert(&self) -> String {
        match self {
            PanelError::Validation(_) => {
                "Please enter both an address and an API URL.".to_string()
            }
            PanelError::Network(_) | PanelError::EmptyData | PanelError::MalformedData { .. } => {
                "Failed to fetch the sensor data.".to_string()
            }
            PanelError::InsufficientStops { .. } => {
                "Please add at least two addresses to the route list.".to_string()
            }
            PanelError::UnknownSensor(id) => format!("Sensor {} has been removed.", id),
        }
    }
}
