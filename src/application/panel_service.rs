// Panel service - Use cases behind the sensor and route controls
use crate::application::reading_source::ReadingSource;
use crate::application::route_launcher::{RouteLaunch, RouteLauncher};
use crate::application::sensor_panel::{SensorPanel, SensorRemoval};
use crate::domain::address::Address;
use crate::domain::error::PanelError;
use crate::domain::reading::SensorReading;
use crate::domain::route::RouteList;
use crate::domain::sensor::{SensorCard, SensorId};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};

/// One message of a streamed refresh of all sensors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RefreshEvent {
    Updated {
        card: SensorCard,
    },
    Failed {
        id: SensorId,
        kind: &'static str,
        alert: String,
    },
    /// The sensor was removed while its fetch was in flight.
    Discarded {
        id: SensorId,
    },
    Complete {
        updated: usize,
        failed: usize,
        discarded: usize,
        duration_ms: i64,
    },
}

#[derive(Clone)]
pub struct PanelService {
    source: Arc<dyn ReadingSource>,
    launcher: RouteLauncher,
    panel: Arc<Mutex<SensorPanel>>,
}

impl PanelService {
    pub fn new(source: Arc<dyn ReadingSource>, launcher: RouteLauncher) -> Self {
        Self {
            source,
            launcher,
            panel: Arc::new(Mutex::new(SensorPanel::new())),
        }
    }

    /// Fetch the endpoint and, only if that succeeds, display a new sensor.
    pub async fn add_sensor(&self, address: &str, api_url: &str) -> Result<SensorCard, PanelError> {
        let api_url = api_url.trim();
        if address.trim().is_empty() || api_url.is_empty() {
            return Err(PanelError::Validation(
                "address and API URL are both required".to_string(),
            ));
        }
        let address = Address::parse(address)?;

        let reading = self.source.fetch_reading(api_url).await?;

        let mut panel = self.panel.lock().await;
        let id = panel.register(address.clone(), api_url.to_string(), reading);
        tracing::info!("Added sensor {} for {}", id, address);
        panel.card(id).ok_or(PanelError::UnknownSensor(id))
    }

    /// Re-poll one sensor. A reading that arrives after the sensor was removed
    /// is dropped.
    pub async fn refresh_sensor(&self, id: SensorId) -> Result<SensorCard, PanelError> {
        let api_url = {
            let panel = self.panel.lock().await;
            panel
                .entry(id)
                .map(|e| e.api_url.clone())
                .ok_or(PanelError::UnknownSensor(id))?
        };

        let reading = self.source.fetch_reading(&api_url).await?;
        apply(&self.panel, id, reading).await
    }

    /// Refresh every displayed sensor concurrently, streaming each outcome as
    /// it resolves followed by a summary.
    pub async fn refresh_all(&self) -> mpsc::Receiver<RefreshEvent> {
        let (tx, rx) = mpsc::channel(100);
        let start_time = Instant::now();
        let endpoints = self.panel.lock().await.endpoints();

        tracing::debug!("Refreshing {} sensors", endpoints.len());

        let mut handles = Vec::with_capacity(endpoints.len());
        for (id, api_url) in endpoints {
            let tx = tx.clone();
            let source = self.source.clone();
            let panel = self.panel.clone();

            handles.push(tokio::spawn(async move {
                let event = match source.fetch_reading(&api_url).await {
                    Ok(reading) => match apply(&panel, id, reading).await {
                        Ok(card) => RefreshEvent::Updated { card },
                        Err(_) => RefreshEvent::Discarded { id },
                    },
                    Err(e) => {
                        tracing::warn!("Refresh of sensor {} failed: {}", id, e);
                        RefreshEvent::Failed {
                            id,
                            kind: e.kind(),
                            alert: e.alert(),
                        }
                    }
                };
                let _ = tx.send(event.clone()).await;
                event
            }));
        }

        tokio::spawn(async move {
            let (mut updated, mut failed, mut discarded) = (0, 0, 0);
            for handle in handles {
                match handle.await {
                    Ok(RefreshEvent::Updated { .. }) => updated += 1,
                    Ok(RefreshEvent::Discarded { .. }) => discarded += 1,
                    _ => failed += 1,
                }
            }

            let complete = RefreshEvent::Complete {
                updated,
                failed,
                discarded,
                duration_ms: start_time.elapsed().as_millis() as i64,
            };
            let _ = tx.send(complete).await;
        });

        rx
    }

    pub async fn list_sensors(&self) -> Vec<SensorCard> {
        self.panel.lock().await.cards()
    }

    pub async fn add_to_route(&self, id: SensorId) -> Result<RouteList, PanelError> {
        let mut panel = self.panel.lock().await;
        if panel.add_to_route(id)? {
            tracing::info!("Sensor {} added to route", id);
        }
        Ok(panel.route().clone())
    }

    pub async fn remove_from_route(&self, address: &str) -> Result<RouteList, PanelError> {
        let address = Address::parse(address)?;
        let mut panel = self.panel.lock().await;
        if panel.remove_from_route(&address) {
            tracing::info!("Removed {} from route", address);
        }
        Ok(panel.route().clone())
    }

    pub async fn remove_sensor(&self, id: SensorId) -> Result<SensorRemoval, PanelError> {
        let removal = self.panel.lock().await.remove_sensor(id)?;
        tracing::info!("Removed sensor {} at {}", id, removal.address);
        Ok(removal)
    }

    pub async fn route(&self) -> RouteList {
        self.panel.lock().await.route().clone()
    }

    pub async fn launch_route(&self) -> Result<RouteLaunch, PanelError> {
        let panel = self.panel.lock().await;
        self.launcher.launch(panel.route())
    }
}

async fn apply(
    panel: &Mutex<SensorPanel>,
    id: SensorId,
    reading: SensorReading,
) -> Result<SensorCard, PanelError> {
    let mut panel = panel.lock().await;
    if let Err(e) = panel.apply_reading(id, reading) {
        tracing::warn!("Dropping late reading for sensor {}: entry was removed", id);
        return Err(e);
    }
    panel.card(id).ok_or(PanelError::UnknownSensor(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::Category;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const BASE: &str = "https://www.google.com/maps/dir/";

    /// Serves canned results per URL and counts calls.
    #[derive(Default)]
    struct StubSource {
        responses: HashMap<String, Result<SensorReading, PanelError>>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn with(mut self, url: &str, response: Result<SensorReading, PanelError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }
    }

    #[async_trait]
    impl ReadingSource for StubSource {
        async fn fetch_reading(&self, url: &str) -> Result<SensorReading, PanelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(PanelError::Network(format!("no stub for {}", url))))
        }
    }

    /// Blocks every fetch until released, so tests can interleave removals.
    struct GatedSource {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ReadingSource for GatedSource {
        async fn fetch_reading(&self, _url: &str) -> Result<SensorReading, PanelError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(reading(999.0))
        }
    }

    fn reading(mean_distance: f64) -> SensorReading {
        SensorReading::new(3.7, mean_distance, 22.0, "Main St 1".to_string())
    }

    fn service(source: StubSource) -> (PanelService, Arc<StubSource>) {
        let source = Arc::new(source);
        (PanelService::new(source.clone(), RouteLauncher::new(BASE)), source)
    }

    #[tokio::test]
    async fn test_add_sensor_shows_card() {
        let (service, _) = service(StubSource::default().with("http://s/1", Ok(reading(250.0))));

        let card = service.add_sensor("Main St 1", "http://s/1").await.unwrap();

        assert_eq!(card.address.as_str(), "Main St 1");
        assert_eq!(card.category, Category::Mid);
        assert_eq!(card.battery, 3.7);
        assert_eq!(card.mean_distance, 250.0);
        assert_eq!(card.internal_temp, 22.0);
        assert!(!card.in_route);
        assert_eq!(service.list_sensors().await, vec![card]);
    }

    #[tokio::test]
    async fn test_add_sensor_requires_both_inputs() {
        let (service, source) = service(StubSource::default().with("http://s/1", Ok(reading(250.0))));

        let empty_address = service.add_sensor("  ", "http://s/1").await;
        let empty_url = service.add_sensor("Main St 1", "").await;

        assert!(matches!(empty_address, Err(PanelError::Validation(_))));
        assert!(matches!(empty_url, Err(PanelError::Validation(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(service.list_sensors().await.is_empty());
        assert!(service.route().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_creates_nothing() {
        let (service, _) = service(StubSource::default().with("http://s/1", Err(PanelError::EmptyData)));

        assert_eq!(
            service.add_sensor("Main St 1", "http://s/1").await,
            Err(PanelError::EmptyData)
        );
        assert!(service.list_sensors().await.is_empty());
    }

    #[tokio::test]
    async fn test_route_lifecycle() {
        let (service, _) = service(
            StubSource::default()
                .with("http://s/a", Ok(reading(100.0)))
                .with("http://s/b", Ok(reading(300.0)))
                .with("http://s/c", Ok(reading(500.0))),
        );
        let a = service.add_sensor("A", "http://s/a").await.unwrap().id;
        let b = service.add_sensor("B", "http://s/b").await.unwrap().id;
        let c = service.add_sensor("C", "http://s/c").await.unwrap().id;

        service.add_to_route(a).await.unwrap();
        assert_eq!(
            service.launch_route().await,
            Err(PanelError::InsufficientStops { stops: 1 })
        );

        service.add_to_route(b).await.unwrap();
        service.add_to_route(c).await.unwrap();
        let route = service.add_to_route(b).await.unwrap();
        assert_eq!(route.len(), 3);

        let launch = service.launch_route().await.unwrap();
        assert!(launch.url.contains("origin=A&destination=C&waypoints=via%3AB"));

        let removal = service.remove_sensor(b).await.unwrap();
        assert!(removal.left_route);
        let stops: Vec<String> = service
            .route()
            .await
            .stops()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(stops, vec!["A", "C"]);

        let route = service.remove_from_route("C").await.unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(service.list_sensors().await.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_sensor_updates_reading() {
        let (service, _) = service(StubSource::default().with("http://s/1", Ok(reading(250.0))));
        let id = service.add_sensor("Main St 1", "http://s/1").await.unwrap().id;

        let card = service.refresh_sensor(id).await.unwrap();
        assert_eq!(card.id, id);

        assert_eq!(
            service.refresh_sensor(SensorId(99)).await,
            Err(PanelError::UnknownSensor(SensorId(99)))
        );
    }

    #[tokio::test]
    async fn test_late_refresh_after_removal_is_dropped() {
        let gate = Arc::new(GatedSource {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let service = PanelService::new(gate.clone(), RouteLauncher::new(BASE));
        let id = {
            let mut panel = service.panel.lock().await;
            panel.register(
                Address::parse("Main St 1").unwrap(),
                "http://s/1".to_string(),
                reading(250.0),
            )
        };

        let refreshing = {
            let service = service.clone();
            tokio::spawn(async move { service.refresh_sensor(id).await })
        };

        gate.entered.notified().await;
        service.remove_sensor(id).await.unwrap();
        gate.release.notify_one();

        assert_eq!(
            refreshing.await.unwrap(),
            Err(PanelError::UnknownSensor(id))
        );
        assert!(service.list_sensors().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_all_discards_removed_sensor() {
        let gate = Arc::new(GatedSource {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let service = PanelService::new(gate.clone(), RouteLauncher::new(BASE));
        let id = {
            let mut panel = service.panel.lock().await;
            let id = panel.register(
                Address::parse("Main St 1").unwrap(),
                "http://s/1".to_string(),
                reading(250.0),
            );
            panel.add_to_route(id).unwrap();
            id
        };

        let mut rx = service.refresh_all().await;

        gate.entered.notified().await;
        service.remove_sensor(id).await.unwrap();
        gate.release.notify_one();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], RefreshEvent::Discarded { id });
        assert!(matches!(
            events[1],
            RefreshEvent::Complete {
                updated: 0,
                failed: 0,
                discarded: 1,
                ..
            }
        ));
        assert!(service.list_sensors().await.is_empty());
        assert!(service.route().await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_all_streams_outcomes() {
        let (service, _) = service(
            StubSource::default()
                .with("http://s/ok", Ok(reading(250.0)))
                .with("http://s/bad", Ok(reading(250.0))),
        );
        service.add_sensor("A", "http://s/ok").await.unwrap();
        service.add_sensor("B", "http://s/bad").await.unwrap();

        // Endpoint B breaks after registration.
        let broken = StubSource::default().with("http://s/ok", Ok(reading(420.0)));
        let service = PanelService {
            source: Arc::new(broken),
            ..service
        };

        let mut rx = service.refresh_all().await;
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 3);
        assert!(events.iter().any(|e| matches!(
            e,
            RefreshEvent::Updated { card } if card.category == Category::High
        )));
        assert!(events.iter().any(|e| matches!(e, RefreshEvent::Failed { kind: "network", .. })));
        assert!(matches!(
            events.last(),
            Some(RefreshEvent::Complete {
                updated: 1,
                failed: 1,
                discarded: 0,
                ..
            })
        ));
    }
}
