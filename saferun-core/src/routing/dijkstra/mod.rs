mod regular_dijkstra;
mod state;
mod traced_dijkstra;

pub use regular_dijkstra::shortest_path;
pub use traced_dijkstra::{ShortestPathTree, shortest_path_tree};
