// Sensor reading domain model and distance classification
use serde::Serialize;

/// Lower bound (inclusive) of the mid band, in millimetres.
pub const MID_BAND_MIN_MM: f64 = 200.0;
/// Upper bound (inclusive) of the mid band, in millimetres.
pub const MID_BAND_MAX_MM: f64 = 400.0;

/// The most recent reading reported by a sensor endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    /// Volts
    pub battery: f64,
    /// Millimetres
    pub mean_distance: f64,
    /// Degrees Celsius
    pub internal_temp: f64,
    /// `meta.name` as reported by the endpoint
    pub address: String,
}

impl SensorReading {
    pub fn new(battery: f64, mean_distance: f64, internal_temp: f64, address: String) -> Self {
        Self {
            battery,
            mean_distance,
            internal_temp,
            address,
        }
    }

    pub fn category(&self) -> Category {
        classify(self.mean_distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Low,
    Mid,
    High,
}

impl Category {
    pub fn background_color(self) -> &'static str {
        match self {
            Category::Low => "rgb(242, 99, 99)",
            Category::Mid => "lightyellow",
            Category::High => "lightgreen",
        }
    }
}

/// Classify a mean distance into a display band.
///
/// Negative distances compare below the mid band and are `Low`. NaN never
/// comes out of a parsed reading, but is mapped to `High` explicitly so the
/// function stays total.
pub fn classify(mean_distance: f64) -> Category {
    if mean_distance.is_nan() {
        return Category::High;
    }

    if mean_distance < MID_BAND_MIN_MM {
        Category::Low
    } else if mean_distance <= MID_BAND_MAX_MM {
        Category::Mid
    } else {
        Category::High
    }
}
