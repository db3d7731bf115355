// Conversion of panel failures into alert responses
use crate::domain::error::PanelError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AlertBody {
    pub kind: &'static str,
    pub alert: String,
}

pub fn status_for(error: &PanelError) -> StatusCode {
    match error {
        PanelError::Validation(_) | PanelError::InsufficientStops { .. } => StatusCode::BAD_REQUEST,
        PanelError::Network(_) | PanelError::EmptyData | PanelError::MalformedData { .. } => {
            StatusCode::BAD_GATEWAY
        }
        PanelError::UnknownSensor(_) => StatusCode::NOT_FOUND,
    }
}

impl From<&PanelError> for AlertBody {
    fn from(error: &PanelError) -> Self {
        Self {
            kind: error.kind(),
            alert: error.alert(),
        }
    }
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        tracing::warn!("Request failed: {}", self);
        (status_for(&self), Json(AlertBody::from(&self))).into_response()
    }
}
