use petgraph::{Direction, graph::NodeIndex};

use super::state::search;
use crate::{
    Error,
    model::{StreetEdge, StreetGraph},
};

/// Dijkstra's algorithm between two nodes under an arbitrary edge cost.
///
/// A zero heuristic keeps the search optimal for every [`crate::Objective`],
/// including the safety cost which does not track physical distance.
/// Returns the node sequence from `source` to `target`, both inclusive;
/// `source == target` yields a single-node path.
///
/// # Errors
///
/// [`Error::InvalidNodeIndex`] if either node is not in the graph,
/// [`Error::NoPathFound`] if `target` is unreachable.
pub fn shortest_path<F>(
    graph: &StreetGraph,
    source: NodeIndex,
    target: NodeIndex,
    cost: F,
) -> Result<Vec<NodeIndex>, Error>
where
    F: Fn(&StreetEdge) -> f64,
{
    if !graph.contains(source) || !graph.contains(target) {
        return Err(Error::InvalidNodeIndex);
    }

    let state = search(graph, source, Some(target), Direction::Outgoing, cost);
    let mut path = state
        .chain_to_root(source, target)
        .ok_or(Error::NoPathFound)?;
    path.reverse();
    Ok(path)
}
