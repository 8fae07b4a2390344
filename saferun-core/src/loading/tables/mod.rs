//! Raw CSV tables the routing model is built from

mod parser;
mod raw_types;

pub use parser::{deserialize_table, parse_flag};
pub use raw_types::{EdgeRecord, NodeRecord};
