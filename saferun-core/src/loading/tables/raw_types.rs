use serde::Deserialize;

use crate::{Meters, NodeId};

/// Row of the node attribute table
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub osmid: NodeId,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub safety_score: Option<f64>,
    /// Longitude
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    /// Latitude
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
}

impl NodeRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &["osmid"];

    /// `(lat, lon)` when both coordinates are present and finite
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.y, self.x) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }

    pub fn raw_safety(&self) -> Option<f64> {
        self.safety_score.filter(|s| s.is_finite())
    }
}

/// Row of the directed edge list
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub u: NodeId,
    pub v: NodeId,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub length: Option<Meters>,
    #[serde(default)]
    pub oneway: Option<String>,
}

impl EdgeRecord {
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &["u", "v"];

    /// Rows are one-way unless explicitly marked otherwise
    pub fn is_oneway(&self) -> bool {
        self.oneway
            .as_deref()
            .and_then(super::parse_flag)
            .unwrap_or(true)
    }
}
