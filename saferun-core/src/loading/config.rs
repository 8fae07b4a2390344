use std::path::PathBuf;

use serde::Deserialize;

/// Input files of a route model
#[derive(Debug, Clone, Deserialize)]
pub struct RouteModelConfig {
    /// Node attribute table: `osmid,safety_score,x,y`
    pub nodes_path: PathBuf,
    /// Directed edge list: `u,v,length[,oneway]`
    pub edges_path: PathBuf,
}
