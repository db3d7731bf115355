// Application state for HTTP handlers
use crate::application::map_service::MapService;
use crate::application::panel_service::PanelService;

#[derive(Clone)]
pub struct AppState {
    pub panel_service: PanelService,
    pub map_service: MapService,
}
