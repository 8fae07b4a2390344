use std::cmp::Ordering;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::{Direction, graph::NodeIndex, visit::EdgeRef};

use crate::model::{StreetEdge, StreetGraph};

#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    pub(super) cost: f64,
    pub(super) node: NodeIndex,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Settled costs and predecessor links of one search
pub(super) struct SearchState {
    pub(super) costs: HashMap<NodeIndex, f64>,
    /// Next node towards the search root
    pub(super) predecessors: HashMap<NodeIndex, NodeIndex>,
}

/// Dijkstra search from `root` along `direction`.
///
/// With [`Direction::Incoming`] edges are walked backwards, so the result
/// describes paths from every reached node *to* `root`. Edges whose cost is
/// negative or not finite are not traversed. Stops early once `target` is
/// settled.
pub(super) fn search<F>(
    graph: &StreetGraph,
    root: NodeIndex,
    target: Option<NodeIndex>,
    direction: Direction,
    cost: F,
) -> SearchState
where
    F: Fn(&StreetEdge) -> f64,
{
    let node_count = graph.node_count();
    let estimated_nodes = node_count.min(1000);
    let mut costs: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = std::collections::BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: root,
    });
    costs.insert(root, 0.0);

    while let Some(State { cost: current, node }) = heap.pop() {
        if settled.put(node.index()) {
            continue;
        }

        if target == Some(node) {
            break;
        }

        for edge in graph.graph.edges_directed(node, direction) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            if settled.contains(next.index()) {
                continue;
            }

            let edge_cost = cost(edge.weight());
            if !edge_cost.is_finite() || edge_cost < 0.0 {
                continue;
            }
            let next_cost = current + edge_cost;

            match costs.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, node);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    SearchState {
        costs,
        predecessors,
    }
}

impl SearchState {
    /// Nodes from `node` back to the search root, inclusive
    pub(super) fn chain_to_root(&self, root: NodeIndex, node: NodeIndex) -> Option<Vec<NodeIndex>> {
        if !self.costs.contains_key(&node) {
            return None;
        }

        let mut chain = vec![node];
        let mut current = node;
        while current != root {
            current = *self.predecessors.get(&current)?;
            chain.push(current);
        }
        Some(chain)
    }
}
