use hashbrown::HashMap;
use log::info;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use super::config::RouteModelConfig;
use super::tables::{EdgeRecord, NodeRecord, deserialize_table};
use super::weights::assign_weights;
use crate::model::{StreetEdge, StreetGraph, StreetNode};
use crate::{Error, Meters, NodeId, RouteModel};

/// Creates a route model based on the provided configuration
///
/// # Errors
///
/// Returns [`Error::DataLoad`] if an input file is missing or holds no
/// usable edges, [`Error::IoError`] if it cannot be read and
/// [`Error::InvalidData`] if a table lacks its key columns.
pub fn create_route_model(config: &RouteModelConfig) -> Result<RouteModel, Error> {
    validate_config(config)?;

    info!(
        "Loading edge list {} and node table {}",
        config.edges_path.display(),
        config.nodes_path.display()
    );

    let (edges, nodes) = rayon::join(
        || deserialize_table::<EdgeRecord>(&config.edges_path, EdgeRecord::REQUIRED_COLUMNS),
        || deserialize_table::<NodeRecord>(&config.nodes_path, NodeRecord::REQUIRED_COLUMNS),
    );
    let (edges, nodes) = (edges?, nodes?);

    if edges.is_empty() {
        return Err(Error::DataLoad(format!(
            "No usable edges in {}",
            config.edges_path.display()
        )));
    }

    let mut builder = StreetGraphBuilder::new();
    for edge in &edges {
        builder.add_edge(edge.u, edge.v, edge.length);
        if !edge.is_oneway() {
            builder.add_edge(edge.v, edge.u, edge.length);
        }
    }

    let mut unmatched = 0usize;
    for node in &nodes {
        if builder.contains(node.osmid) {
            builder.add_node(node.osmid, node.location(), node.raw_safety());
        } else {
            unmatched += 1;
        }
    }
    if unmatched > 0 {
        log::warn!("{unmatched} node table rows do not belong to the edge list and were ignored");
    }

    let model = RouteModel::new(builder.build());
    info!("{model} created successfully");
    Ok(model)
}

fn validate_config(config: &RouteModelConfig) -> Result<(), Error> {
    for path in [&config.edges_path, &config.nodes_path] {
        if !path.exists() {
            return Err(Error::DataLoad(format!(
                "File not found: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Incremental construction of a [`StreetGraph`].
///
/// Nodes referenced by edges are created on demand with a zero safety score
/// and no coordinates. Parallel edges collapse into the shortest one. Costs
/// are derived once, in [`StreetGraphBuilder::build`].
#[derive(Debug, Default)]
pub struct StreetGraphBuilder {
    graph: DiGraph<StreetNode, StreetEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl StreetGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Inserts a node or replaces the attributes of an existing one.
    ///
    /// `location` is `(lat, lon)`; a missing `raw_safety` counts as 0.
    pub fn add_node(
        &mut self,
        id: NodeId,
        location: Option<(f64, f64)>,
        raw_safety: Option<f64>,
    ) -> NodeIndex {
        let idx = self.node_or_insert(id);
        let node = &mut self.graph[idx];
        node.geometry = location.map(|(lat, lon)| geo::Point::new(lon, lat));
        node.raw_safety = raw_safety.unwrap_or(0.0);
        idx
    }

    /// Adds a directed edge; a missing length counts as 1 meter.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length: Option<Meters>) -> EdgeIndex {
        let source = self.node_or_insert(from);
        let target = self.node_or_insert(to);
        let edge = StreetEdge::with_length(length);

        match self.graph.find_edge(source, target) {
            Some(existing) => {
                if edge.length < self.graph[existing].length {
                    self.graph[existing] = edge;
                }
                existing
            }
            None => self.graph.add_edge(source, target, edge),
        }
    }

    /// Assigns normalized scores and edge costs and freezes the graph
    pub fn build(mut self) -> StreetGraph {
        let max_raw = assign_weights(&mut self.graph);
        log::debug!(
            "Assigned weights to {} edges (raw safety maximum {max_raw})",
            self.graph.edge_count()
        );
        StreetGraph::new(self.graph)
    }

    fn node_or_insert(&mut self, id: NodeId) -> NodeIndex {
        *self
            .index
            .entry(id)
            .or_insert_with(|| self.graph.add_node(StreetNode::new(id)))
    }
}
