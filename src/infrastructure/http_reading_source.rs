// HTTP reading source - fetches a sensor endpoint's JSON readings
use crate::application::reading_source::ReadingSource;
use crate::domain::error::PanelError;
use crate::domain::reading::SensorReading;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const BATTERY_PATH: &[&str] = &["components", "battery", "value"];
const MEAN_DISTANCE_PATH: &[&str] = &["components", "mean_distance", "value"];
const INTERNAL_TEMP_PATH: &[&str] = &["components", "internal_temp", "value"];
const NAME_PATH: &[&str] = &["meta", "name"];

#[derive(Debug, Clone)]
pub struct HttpReadingSource {
    client: reqwest::Client,
}

impl HttpReadingSource {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl ReadingSource for HttpReadingSource {
    async fn fetch_reading(&self, url: &str) -> Result<SensorReading, PanelError> {
        tracing::debug!("Fetching sensor readings from {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", url, e);
                PanelError::Network(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Sensor endpoint {} answered {}", url, status);
            return Err(PanelError::Network(format!("status {}", status)));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!("Reading body from {} failed: {}", url, e);
            PanelError::Network(e.to_string())
        })?;

        let data: Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Sensor endpoint {} returned invalid JSON: {}", url, e);
            PanelError::MalformedData {
                path: "$".to_string(),
            }
        })?;

        parse_latest_reading(&data)
    }
}

/// Extract the reading from the last element of a JSON array of readings.
pub fn parse_latest_reading(data: &Value) -> Result<SensorReading, PanelError> {
    let latest = data
        .as_array()
        .and_then(|readings| readings.last())
        .ok_or(PanelError::EmptyData)?;

    Ok(SensorReading::new(
        number_at(latest, BATTERY_PATH)?,
        number_at(latest, MEAN_DISTANCE_PATH)?,
        number_at(latest, INTERNAL_TEMP_PATH)?,
        string_at(latest, NAME_PATH)?,
    ))
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, PanelError> {
    path.iter()
        .try_fold(value, |node, key| node.get(key))
        .filter(|node| !node.is_null())
        .ok_or_else(|| malformed(path))
}

fn number_at(value: &Value, path: &[&str]) -> Result<f64, PanelError> {
    lookup(value, path)?.as_f64().ok_or_else(|| malformed(path))
}

fn string_at(value: &Value, path: &[&str]) -> Result<String, PanelError> {
    lookup(value, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| malformed(path))
}

fn malformed(path: &[&str]) -> PanelError {
    PanelError::MalformedData {
        path: path.join("."),
    }
}
