//! Circular route recommendation over a safety-scored street network.
//!
//! The crate builds a [`RouteModel`] once from a node attribute table and an
//! edge list, then synthesizes closed walks of a requested length for the
//! three [`Objective`]s.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{RouteModelConfig, StreetGraphBuilder, create_route_model};
pub use model::{Objective, RouteModel, StreetEdge, StreetGraph, StreetNode};
pub use routing::{
    CandidateOrder, LoopSearchConfig, RandomOrder, Route, ShortestPathTree, Waypoint,
    find_circular_routes, format_route, round_hundredths, routes_to_geojson, shortest_path,
    shortest_path_tree,
};

/// External node identifier (OSM id)
pub type NodeId = i64;

/// Physical edge length in meters
pub type Meters = f64;

/// Number of shuffled candidate rounds per objective
pub const MAX_ATTEMPTS: usize = 10;

/// Accepted relative deviation from the requested loop length
pub const DISTANCE_TOLERANCE: f64 = 0.15;

/// Floor added to safety scores before inversion
pub const SAFETY_EPSILON: f64 = 1e-6;
