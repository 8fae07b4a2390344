use std::fmt;

use petgraph::graph::NodeIndex;

use super::StreetGraph;
use crate::{
    Error,
    routing::{CandidateOrder, LoopSearchConfig, Route, find_circular_routes},
};

/// Routing model shared by all requests
#[derive(Debug, Clone)]
pub struct RouteModel {
    pub street_graph: StreetGraph,
}

impl RouteModel {
    pub fn new(street_graph: StreetGraph) -> Self {
        Self { street_graph }
    }

    pub fn node_count(&self) -> usize {
        self.street_graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.street_graph.edge_count()
    }

    /// Resolves a coordinate to the closest located node
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoStartNode`] if no node carries coordinates.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Result<NodeIndex, Error> {
        self.street_graph
            .nearest_node(lat, lon)
            .ok_or(Error::NoStartNode)
    }

    /// Snaps the start coordinate and searches loops for every objective
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoStartNode`] when the start cannot be snapped.
    /// Objectives without an acceptable loop are omitted, not reported.
    pub fn recommend<O: CandidateOrder + ?Sized>(
        &self,
        lat: f64,
        lon: f64,
        distance_km: f64,
        order: &mut O,
        config: &LoopSearchConfig,
    ) -> Result<Vec<Route>, Error> {
        let start = self.nearest_node(lat, lon)?;
        log::debug!("Snapped ({lat}, {lon}) to node {start:?}");
        find_circular_routes(self, start, distance_km, order, config)
    }
}

impl fmt::Display for RouteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RouteModel with {} nodes and {} edges",
            self.node_count(),
            self.edge_count()
        )
    }
}
