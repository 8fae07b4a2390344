pub use crate::{DISTANCE_TOLERANCE, MAX_ATTEMPTS, SAFETY_EPSILON};

// Re-export key components
pub use crate::loading::{RouteModelConfig, StreetGraphBuilder, create_route_model};
pub use crate::model::{Objective, RouteModel, StreetEdge, StreetGraph, StreetNode};
pub use crate::routing::{
    CandidateOrder, LoopSearchConfig, RandomOrder, Route, ShortestPathTree, Waypoint,
    find_circular_routes, format_route, round_hundredths, routes_to_geojson, shortest_path,
    shortest_path_tree,
};

// Core types for the street network
pub use crate::Error;
pub use crate::Meters;
pub use crate::NodeId;
