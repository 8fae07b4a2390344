//! This module is responsible for loading the node attribute table and the
//! edge list and building a safety-weighted routing model.

mod builder;
mod config;
pub mod tables;
mod weights;

pub use builder::{StreetGraphBuilder, create_route_model};
pub use config::RouteModelConfig;
