use serde::Deserialize;

const CONFIG_FILE: &str = "config/app";
const ENV_PREFIX: &str = "ROUTE_PLANNER";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub sensors: SensorSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationSettings {
    #[serde(default = "default_navigation_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SensorSettings {
    /// No timeout unless set; a hung endpoint only stalls its own request.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            base_url: default_navigation_base_url(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_navigation_base_url() -> String {
    "https://www.google.com/maps/dir/".to_string()
}

fn default_center_lat() -> f64 {
    49.4521
}

fn default_center_lng() -> f64 {
    11.0767
}

fn default_zoom() -> u8 {
    15
}

/// Load `config/app.*` (optional) overlaid with `ROUTE_PLANNER__SECTION__KEY`
/// environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_with_environment(environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_environment(environment: config::Environment) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(environment)
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.navigation.base_url, "https://www.google.com/maps/dir/");
        assert_eq!(config.map.center_lat, 49.4521);
        assert_eq!(config.map.center_lng, 11.0767);
        assert_eq!(config.map.zoom, 15);
        assert_eq!(config.sensors.request_timeout_secs, None);
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
[server]
bind = "127.0.0.1:9000"

[map]
zoom = 12

[sensors]
request_timeout_secs = 10
"#,
        );
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.map.zoom, 12);
        assert_eq!(config.map.center_lat, 49.4521);
        assert_eq!(config.sensors.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_environment_overlay() {
        let mut vars = config::Map::new();
        vars.insert("ROUTE_PLANNER__MAP__ZOOM".to_string(), "11".to_string());
        vars.insert(
            "ROUTE_PLANNER__SERVER__BIND".to_string(),
            "127.0.0.1:9100".to_string(),
        );
        vars.insert(
            "ROUTE_PLANNER__SENSORS__REQUEST_TIMEOUT_SECS".to_string(),
            "5".to_string(),
        );
        vars.insert("UNRELATED__MAP__ZOOM".to_string(), "3".to_string());

        let config = load_with_environment(environment().source(Some(vars))).unwrap();

        assert_eq!(config.map.zoom, 11);
        assert_eq!(config.server.bind, "127.0.0.1:9100");
        assert_eq!(config.sensors.request_timeout_secs, Some(5));
        assert_eq!(config.navigation.base_url, "https://www.google.com/maps/dir/");
    }
}
