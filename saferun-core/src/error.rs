use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load routing data: {0}")]
    DataLoad(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Could not find a starting node close to the provided coordinates")]
    NoStartNode,
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("No path could be found with the given criteria")]
    NoPathFound,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
