// HTTP request handlers
use crate::domain::error::PanelError;
use crate::domain::map::PlaceSelection;
use crate::domain::route::RouteList;
use crate::domain::sensor::SensorId;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::ndjson_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AddSensorRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub api_url: String,
}

#[derive(Debug, Serialize)]
struct RouteBody<'a> {
    stops: &'a RouteList,
}

async fn respond<T: Serialize>(headers: &HeaderMap, status: StatusCode, data: &T) -> Response {
    match json_response(status, data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Turn a body the extractor could not read into a validation alert.
fn invalid_body(rejection: JsonRejection) -> Response {
    PanelError::Validation(rejection.body_text()).into_response()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_map(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.map_service.view().await;
    respond(&headers, StatusCode::OK, &view).await
}

/// Autocomplete place selection
pub async fn select_place(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Result<Json<PlaceSelection>, JsonRejection>,
) -> Response {
    let Json(place) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    let outcome = state.map_service.select_place(place).await;
    respond(&headers, StatusCode::OK, &outcome).await
}

pub async fn list_sensors(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let cards = state.panel_service.list_sensors().await;
    respond(&headers, StatusCode::OK, &cards).await
}

/// Add-sensor control: fetch the endpoint and show a card on success
pub async fn add_sensor(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddSensorRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };
    match state
        .panel_service
        .add_sensor(&request.address, &request.api_url)
        .await
    {
        Ok(card) => respond(&headers, StatusCode::CREATED, &card).await,
        Err(e) => e.into_response(),
    }
}

pub async fn remove_sensor(
    Path(id): Path<u64>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.panel_service.remove_sensor(SensorId(id)).await {
        Ok(removal) => respond(&headers, StatusCode::OK, &removal).await,
        Err(e) => e.into_response(),
    }
}

pub async fn refresh_sensor(
    Path(id): Path<u64>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.panel_service.refresh_sensor(SensorId(id)).await {
        Ok(card) => respond(&headers, StatusCode::OK, &card).await,
        Err(e) => e.into_response(),
    }
}

/// Stream a refresh of every sensor (progressive loading)
pub async fn refresh_all(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.panel_service.refresh_all().await;
    stream_from_receiver(rx)
}

pub async fn add_to_route(
    Path(id): Path<u64>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.panel_service.add_to_route(SensorId(id)).await {
        Ok(route) => respond(&headers, StatusCode::OK, &RouteBody { stops: &route }).await,
        Err(e) => e.into_response(),
    }
}

pub async fn get_route(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let route = state.panel_service.route().await;
    respond(&headers, StatusCode::OK, &RouteBody { stops: &route }).await
}

pub async fn remove_from_route(
    Path(address): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.panel_service.remove_from_route(&address).await {
        Ok(route) => respond(&headers, StatusCode::OK, &RouteBody { stops: &route }).await,
        Err(e) => e.into_response(),
    }
}

/// Create-route control
pub async fn launch_route(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.panel_service.launch_route().await {
        Ok(launch) => respond(&headers, StatusCode::OK, &launch).await,
        Err(e) => e.into_response(),
    }
}
