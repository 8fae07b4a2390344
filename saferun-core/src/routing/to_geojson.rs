use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::Route;
use crate::Error;

impl Route {
    /// Converts the route to a `LineString` feature.
    ///
    /// Waypoints without coordinates are left out of the geometry.
    pub fn to_feature(&self) -> Result<Feature, Error> {
        let coords: Vec<Coord<f64>> = self
            .waypoints
            .iter()
            .filter_map(|w| match (w.lat, w.lon) {
                (Some(lat), Some(lon)) => Some(Coord { x: lon, y: lat }),
                _ => None,
            })
            .collect();
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "type": self.objective,
                "distance_km": self.distance_km,
                "safety_score": self.safety_score,
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

/// Builds a map layer of all routes, followed by a start marker taken from
/// the first located waypoint of the first route.
///
/// # Errors
///
/// [`Error::GeoJsonError`] if a feature cannot be assembled.
pub fn routes_to_geojson<'a, I>(routes: I) -> Result<FeatureCollection, Error>
where
    I: IntoIterator<Item = &'a Route>,
{
    let routes: Vec<&Route> = routes.into_iter().collect();
    let mut features = routes
        .iter()
        .map(|route| route.to_feature())
        .collect::<Result<Vec<_>, _>>()?;

    let start = routes
        .first()
        .and_then(|r| r.waypoints.first())
        .and_then(|w| Some(Point::new(w.lon?, w.lat?)));
    if let Some(start) = start {
        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(&start)),
            "properties": { "marker": "start" }
        });
        features.push(
            serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))?,
        );
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}
