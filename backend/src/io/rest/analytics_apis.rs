//! # Analytics Dashboard
//!
//! Class-wide averages, performance buckets and top/weak student lists.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::info;

use crate::io::rest::mappers::student_mapper::StudentMapper;
use crate::io::rest::student_apis::internal_error;
use crate::AppState;

pub async fn get_analytics(State(state): State<AppState>) -> Response {
    info!("GET /analytics");

    match state.analytics_service.summary().await {
        Ok(summary) => (StatusCode::OK, Json(StudentMapper::to_analytics_dto(summary))).into_response(),
        Err(e) => internal_error("Error computing analytics", e),
    }
}
