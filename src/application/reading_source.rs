// Port for fetching the latest reading of a sensor endpoint
use crate::domain::error::PanelError;
use crate::domain::reading::SensorReading;
use async_trait::async_trait;

#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch the most recent reading published at `url`.
    ///
    /// One request per call; implementations neither cache nor retry.
    async fn fetch_reading(&self, url: &str) -> Result<SensorReading, PanelError>;
}
