// Router - wires handlers to paths
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_sensor, add_to_route, get_map, get_route, health_check, launch_route, list_sensors,
    refresh_all, refresh_sensor, remove_from_route, remove_sensor, select_place,
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/map", get(get_map))
        .route("/map/place", post(select_place))
        .route("/sensors", get(list_sensors).post(add_sensor))
        .route("/sensors/refresh", post(refresh_all))
        .route("/sensors/:id", delete(remove_sensor))
        .route("/sensors/:id/refresh", post(refresh_sensor))
        .route("/sensors/:id/route", post(add_to_route))
        .route("/route", get(get_route))
        .route("/route/stops/:address", delete(remove_from_route))
        .route("/route/launch", post(launch_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
