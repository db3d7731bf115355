// Application layer - Use cases and ports
pub mod map_service;
pub mod panel_service;
pub mod reading_source;
pub mod route_launcher;
pub mod sensor_panel;
