use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use saferun_core::{RandomOrder, Route, round_hundredths};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::{artifact, state::AppState};

/// Raw request body; every field is checked by [`RecommendRequest::validate`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendRequest {
    /// `[lat, lon]`
    pub start_point: Option<Vec<f64>>,
    pub distance_km: Option<f64>,
    pub pace_min_per_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ValidRequest {
    pub(super) lat: f64,
    pub(super) lon: f64,
    pub(super) distance_km: f64,
    pub(super) pace_min_per_km: f64,
}

impl RecommendRequest {
    pub(super) fn validate(&self) -> Result<ValidRequest, ApiError> {
        let (Some(start_point), Some(distance_km), Some(pace_min_per_km)) =
            (&self.start_point, self.distance_km, self.pace_min_per_km)
        else {
            return Err(ApiError::Validation(
                "Missing required parameters".to_string(),
            ));
        };

        let &[lat, lon] = start_point.as_slice() else {
            return Err(ApiError::Validation(
                "start_point must be [latitude, longitude]".to_string(),
            ));
        };
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ApiError::Validation(
                "start_point coordinates must be finite numbers".to_string(),
            ));
        }
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(ApiError::Validation(
                "distance_km must be a positive number".to_string(),
            ));
        }
        if !pace_min_per_km.is_finite() || pace_min_per_km <= 0.0 {
            return Err(ApiError::Validation(
                "pace_min_per_km must be a positive number".to_string(),
            ));
        }

        Ok(ValidRequest {
            lat,
            lon,
            distance_km,
            pace_min_per_km,
        })
    }
}

/// Route record enriched with timing for the requested pace
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    #[serde(flatten)]
    pub route: Route,
    pub estimated_time_min: f64,
    pub pace_min_per_km: f64,
}

impl RouteResponse {
    pub fn new(route: Route, pace_min_per_km: f64) -> Self {
        Self {
            estimated_time_min: round_hundredths(route.distance_km * pace_min_per_km),
            pace_min_per_km,
            route,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub routes: Vec<RouteResponse>,
}

pub(super) async fn recommend_routes(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::Validation(format!(
            "Request body must be a valid JSON object: {}",
            rejection.body_text()
        ))
    })?;
    let request = request.validate()?;

    let response = tokio::task::spawn_blocking(move || search_routes(&state, request))
        .await
        .map_err(|e| ApiError::Internal(format!("route search task failed: {e}")))??;

    Ok(Json(response))
}

fn search_routes(state: &AppState, request: ValidRequest) -> Result<RecommendResponse, ApiError> {
    let mut order = RandomOrder::from_entropy();
    let routes = state.model.recommend(
        request.lat,
        request.lon,
        request.distance_km,
        &mut order,
        &state.search,
    )?;
    tracing::info!(
        "Found {} routes for {} km from ({}, {})",
        routes.len(),
        request.distance_km,
        request.lat,
        request.lon
    );

    let response = RecommendResponse {
        routes: routes
            .into_iter()
            .map(|route| RouteResponse::new(route, request.pace_min_per_km))
            .collect(),
    };

    if let Some(path) = &state.geojson_output
        && !response.routes.is_empty()
        && let Err(e) = artifact::write_geojson(path, &response)
    {
        tracing::warn!("Failed to write GeoJSON to {}: {e}", path.display());
    }

    Ok(response)
}
