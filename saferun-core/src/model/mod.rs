//! Data model for circular route recommendation
//!
//! Contains the safety-scored street network and the routing objectives
//! that select an edge cost from it.

pub mod objective;
pub mod route_model;
pub mod streets;

pub use objective::Objective;
pub use route_model::RouteModel;
pub use streets::{IndexedPoint, StreetEdge, StreetGraph, StreetNode};
