// Route launcher - turns the route list into an external navigation URL
use crate::domain::error::PanelError;
use crate::domain::route::{NavigationRequest, RouteList};
use serde::Serialize;

const WAYPOINT_MARKER: &str = "via:";
const WAYPOINT_SEPARATOR: &str = "|";

/// A navigation URL the client opens in a new browsing context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLaunch {
    pub url: String,
    pub target: &'static str,
}

#[derive(Debug, Clone)]
pub struct RouteLauncher {
    base_url: String,
}

impl RouteLauncher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Each component is percent-encoded on its own; waypoints carry the `via:`
    /// marker and are joined by a literal `|`.
    pub fn navigation_url(&self, request: &NavigationRequest) -> String {
        let origin = urlencoding::encode(request.origin.as_str());
        let destination = urlencoding::encode(request.destination.as_str());
        let waypoints = request
            .waypoints
            .iter()
            .map(|w| urlencoding::encode(&format!("{}{}", WAYPOINT_MARKER, w)).into_owned())
            .collect::<Vec<_>>()
            .join(WAYPOINT_SEPARATOR);

        format!(
            "{}?api=1&origin={}&destination={}&waypoints={}",
            self.base_url, origin, destination, waypoints
        )
    }

    pub fn launch(&self, route: &RouteList) -> Result<RouteLaunch, PanelError> {
        let request = route.build_navigation_request()?;
        let url = self.navigation_url(&request);
        tracing::info!(
            "Launching route with {} stops ({} waypoints)",
            route.len(),
            request.waypoints.len()
        );
        Ok(RouteLaunch {
            url,
            target: "_blank",
        })
    }
}
