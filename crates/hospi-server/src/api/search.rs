use axum::{extract::State, Extension, Json};
use hospi_core::{Coordinates, CATEGORIES};
use hospi_search::{SearchSnapshot, ViewState};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryRequest {
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    pub name: &'static str,
}

type SnapshotResult = Result<Json<ApiResponse<SearchSnapshot>>, ApiError>;

pub(super) async fn list_categories(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CategoryItem>>> {
    let data = CATEGORIES.iter().map(|&name| CategoryItem { name }).collect();
    Json(ApiResponse::new(req_id.0, data))
}

pub(super) async fn get_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SearchSnapshot>> {
    Json(ApiResponse::new(req_id.0, state.controller.snapshot()))
}

pub(super) async fn submit_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchRequest>,
) -> SnapshotResult {
    state.controller.search(&body.query, &body.location).await;
    respond(req_id, state.controller.snapshot())
}

pub(super) async fn search_category(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CategoryRequest>,
) -> SnapshotResult {
    let Some(category) = CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(body.category.trim()))
    else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!(
                "unknown category '{}'; expected one of {}",
                body.category,
                CATEGORIES.join(", ")
            ),
        ));
    };

    state.controller.search_category(category).await;
    respond(req_id, state.controller.snapshot())
}

pub(super) async fn retry_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> SnapshotResult {
    state.controller.retry().await;
    respond(req_id, state.controller.snapshot())
}

/// Records a browser-reported position for subsequent searches.
pub(super) async fn set_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<LocationRequest>,
) -> SnapshotResult {
    if !(-90.0..=90.0).contains(&body.latitude) || !(-180.0..=180.0).contains(&body.longitude) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "latitude must be within -90..=90 and longitude within -180..=180",
        ));
    }

    state.controller.set_coordinates(Some(Coordinates {
        latitude: body.latitude,
        longitude: body.longitude,
    }));
    Ok(Json(ApiResponse::new(req_id.0, state.controller.snapshot())))
}

pub(super) async fn clear_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SearchSnapshot>> {
    state.controller.set_coordinates(None);
    Json(ApiResponse::new(req_id.0, state.controller.snapshot()))
}

/// An error view is reported as `502 upstream_unavailable` carrying the
/// user-facing message; every other state is returned as data.
fn respond(req_id: RequestId, snapshot: SearchSnapshot) -> SnapshotResult {
    if let ViewState::Error { message } = &snapshot.state {
        return Err(ApiError::new(
            req_id.0,
            "upstream_unavailable",
            message.clone(),
        ));
    }
    Ok(Json(ApiResponse::new(req_id.0, snapshot)))
}
