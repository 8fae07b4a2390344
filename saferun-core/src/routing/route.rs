use petgraph::graph::NodeIndex;
use serde::{Serialize, Serializer};

use crate::{Error, Meters, NodeId, Objective, model::StreetGraph};

/// One `[lat, lon]` point of a route, `[null, null]` for unlocated nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Serialize for Waypoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.lat, self.lon).serialize(serializer)
    }
}

/// Accepted circular route in response form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    #[serde(rename = "type")]
    pub objective: Objective,
    pub distance_km: f64,
    pub safety_score: f64,
    pub waypoints: Vec<Waypoint>,
    /// External ids of the closed walk, start node first and last
    #[serde(skip)]
    pub nodes: Vec<NodeId>,
    #[serde(skip)]
    pub length_m: Meters,
}

/// Rounds half away from zero to two decimals
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts an accepted walk into its response record.
///
/// Every node occurrence counts: repeated nodes contribute one waypoint and
/// one safety sample per visit.
///
/// # Errors
///
/// [`Error::InvalidNodeIndex`] for nodes outside the graph and
/// [`Error::NoPathFound`] if consecutive nodes are not connected.
pub fn format_route(
    graph: &StreetGraph,
    objective: Objective,
    walk: &[NodeIndex],
) -> Result<Route, Error> {
    let nodes = walk
        .iter()
        .map(|&idx| graph.node(idx).ok_or(Error::InvalidNodeIndex))
        .collect::<Result<Vec<_>, _>>()?;

    let length_m = graph.path_length(walk)?;

    #[allow(clippy::cast_precision_loss)]
    let mean_safety = if nodes.is_empty() {
        0.0
    } else {
        nodes.iter().map(|n| n.safety_score).sum::<f64>() / nodes.len() as f64
    };

    Ok(Route {
        objective,
        distance_km: round_hundredths(length_m / 1000.0),
        safety_score: round_hundredths(mean_safety),
        waypoints: nodes
            .iter()
            .map(|n| Waypoint {
                lat: n.lat(),
                lon: n.lon(),
            })
            .collect(),
        nodes: nodes.iter().map(|n| n.id).collect(),
        length_m,
    })
}
