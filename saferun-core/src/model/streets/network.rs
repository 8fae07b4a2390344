//! Street graph with node lookup structures

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};

use super::{StreetEdge, StreetNode};
use crate::{Error, Meters, NodeId};

/// `[lat, lon]` of a node paired with its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Directed street network with costs already assigned.
///
/// Built once by [`crate::StreetGraphBuilder`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
    id_index: HashMap<NodeId, NodeIndex>,
}

impl StreetGraph {
    pub(crate) fn new(graph: DiGraph<StreetNode, StreetEdge>) -> Self {
        let rtree = build_rtree(&graph);
        let id_index = graph
            .node_indices()
            .map(|idx| (graph[idx].id, idx))
            .collect();

        Self {
            graph,
            rtree,
            id_index,
        }
    }

    pub fn graph(&self) -> &DiGraph<StreetNode, StreetEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(idx)
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        idx.index() < self.graph.node_count()
    }

    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&StreetEdge> {
        self.find_edge(from, to).map(|e| &self.graph[e])
    }

    pub(crate) fn find_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(from, to)
    }

    /// Nearest node to a coordinate by planar distance in degree space.
    ///
    /// This is not a geodesic distance: east-west offsets are overweighted
    /// away from the equator. Nodes without coordinates are never returned.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Option<NodeIndex> {
        self.rtree.nearest_neighbor(&[lat, lon]).map(|p| p.data)
    }

    /// Sum of raw edge lengths along a node sequence
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPathFound`] if two consecutive nodes are not
    /// connected by an edge.
    pub fn path_length(&self, path: &[NodeIndex]) -> Result<Meters, Error> {
        path.iter()
            .tuple_windows()
            .map(|(&from, &to)| {
                self.edge(from, to)
                    .map(StreetEdge::length)
                    .ok_or(Error::NoPathFound)
            })
            .sum()
    }
}

fn build_rtree(graph: &DiGraph<StreetNode, StreetEdge>) -> RTree<IndexedPoint> {
    let points = graph
        .node_indices()
        .filter_map(|idx| {
            let node = &graph[idx];
            match (node.lat(), node.lon()) {
                (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                    Some(IndexedPoint::new([lat, lon], idx))
                }
                _ => None,
            }
        })
        .collect::<Vec<_>>();

    log::debug!("Indexed {} of {} nodes by location", points.len(), graph.node_count());
    RTree::bulk_load(points)
}
