use petgraph::{Direction, graph::NodeIndex};

use super::state::{SearchState, search};
use crate::{
    Error,
    model::{StreetEdge, StreetGraph},
};

/// Optimal paths between one root node and every node reachable from
/// (or, for [`Direction::Incoming`], reaching) it.
pub struct ShortestPathTree {
    root: NodeIndex,
    direction: Direction,
    state: SearchState,
}

/// Runs a full Dijkstra search from `root`.
///
/// The tree answers the same paths as repeated [`super::shortest_path`]
/// calls sharing `root` as source (`Outgoing`) or target (`Incoming`).
///
/// # Errors
///
/// [`Error::InvalidNodeIndex`] if `root` is not in the graph.
pub fn shortest_path_tree<F>(
    graph: &StreetGraph,
    root: NodeIndex,
    direction: Direction,
    cost: F,
) -> Result<ShortestPathTree, Error>
where
    F: Fn(&StreetEdge) -> f64,
{
    if !graph.contains(root) {
        return Err(Error::InvalidNodeIndex);
    }

    Ok(ShortestPathTree {
        root,
        direction,
        state: search(graph, root, None, direction, cost),
    })
}

impl ShortestPathTree {
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn reached(&self) -> usize {
        self.state.costs.len()
    }

    pub fn cost_to(&self, node: NodeIndex) -> Option<f64> {
        self.state.costs.get(&node).copied()
    }

    /// Path in travel order: root to `node` for an outgoing tree,
    /// `node` to root for an incoming one.
    pub fn path(&self, node: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut chain = self.state.chain_to_root(self.root, node)?;
        if self.direction == Direction::Outgoing {
            chain.reverse();
        }
        Some(chain)
    }
}
