//! Path search and circular route synthesis

mod candidates;
pub mod dijkstra;
mod loops;
mod route;
mod to_geojson;

pub use candidates::{CandidateOrder, RandomOrder};
pub use dijkstra::{ShortestPathTree, shortest_path, shortest_path_tree};
pub use loops::{LoopSearchConfig, find_circular_routes};
pub use route::{Route, Waypoint, format_route, round_hundredths};
pub use to_geojson::routes_to_geojson;
