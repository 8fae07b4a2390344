//! Map artifact of the latest recommendation

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use thiserror::Error;

use crate::api::RecommendResponse;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Core(#[from] saferun_core::Error),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes all routes of a response as a GeoJSON `FeatureCollection`,
/// replacing the previous file.
pub fn write_geojson(path: &Path, response: &RecommendResponse) -> Result<(), ArtifactError> {
    let mut collection =
        saferun_core::routes_to_geojson(response.routes.iter().map(|r| &r.route))?;

    for (feature, route) in collection.features.iter_mut().zip(&response.routes) {
        feature.set_property("estimated_time_min", route.estimated_time_min);
        feature.set_property("pace_min_per_km", route.pace_min_per_km);
    }

    let staging = staging_path(path);
    std::fs::write(&staging, serde_json::to_string(&collection)?)?;
    if let Err(err) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(err.into());
    }
    tracing::debug!("Wrote {} routes to {}", response.routes.len(), path.display());
    Ok(())
}

/// Unique sibling of `path`; the rename into place stays on one filesystem.
fn staging_path(path: &Path) -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);

    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    ));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use saferun_core::{Objective, Route, Waypoint};
    use serde_json::Value;

    use super::*;
    use crate::api::RouteResponse;

    #[test]
    fn writes_timing_into_route_features() {
        let point = Waypoint {
            lat: Some(35.85),
            lon: Some(128.53),
        };
        let route = Route {
            objective: Objective::Balanced,
            distance_km: 2.0,
            safety_score: 71.25,
            waypoints: vec![point, point],
            nodes: vec![1, 1],
            length_m: 2000.0,
        };
        let response = RecommendResponse {
            routes: vec![RouteResponse::new(route, 6.0)],
        };
        let path = std::env::temp_dir().join(format!("saferun-artifact-{}.geojson", std::process::id()));

        write_geojson(&path, &response).unwrap();
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(written["type"], "FeatureCollection");
        assert_eq!(written["features"][0]["properties"]["type"], "balanced");
        assert_eq!(written["features"][0]["properties"]["estimated_time_min"], 12.0);
        assert_eq!(written["features"][1]["properties"]["marker"], "start");
    }

    #[test]
    fn concurrent_writes_leave_a_complete_file() {
        let point = Waypoint {
            lat: Some(35.85),
            lon: Some(128.53),
        };
        let response = |distance_km: f64| RecommendResponse {
            routes: vec![RouteResponse::new(
                Route {
                    objective: Objective::Safe,
                    distance_km,
                    safety_score: 50.0,
                    waypoints: vec![point; 200],
                    nodes: vec![1; 200],
                    length_m: distance_km * 1000.0,
                },
                6.0,
            )],
        };
        let dir = std::env::temp_dir().join(format!("saferun-artifact-race-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("latest.geojson");

        std::thread::scope(|scope| {
            for i in 0..8 {
                let path = &path;
                let response = response(1.0 + f64::from(i));
                scope.spawn(move || {
                    for _ in 0..10 {
                        write_geojson(path, &response).unwrap();
                    }
                });
            }
        });

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let leftovers = std::fs::read_dir(&dir).unwrap().count();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(written["type"], "FeatureCollection");
        assert_eq!(written["features"].as_array().unwrap().len(), 2);
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn staging_file_sits_next_to_target() {
        let target = Path::new("/srv/saferun/latest.geojson");
        let first = staging_path(target);
        let second = staging_path(target);

        assert_eq!(first.parent(), target.parent());
        assert_ne!(first, second);
        assert!(first.to_string_lossy().ends_with(".tmp"));
    }
}
