//! Randomized synthesis of closed walks with a target length
//!
//! For each objective the search shuffles every node except the start,
//! joins the optimal path to each candidate with the optimal path back, and
//! accepts the first walk whose physical length is close enough to the
//! requested distance and which no earlier objective already returned.

use std::time::{Duration, Instant};

use hashbrown::HashSet;
use log::{debug, trace};
use petgraph::{Direction, graph::NodeIndex};

use super::{
    CandidateOrder, Route,
    dijkstra::{ShortestPathTree, shortest_path_tree},
    format_route,
};
use crate::{DISTANCE_TOLERANCE, Error, MAX_ATTEMPTS, Meters, Objective, RouteModel, StreetGraph};

/// Bounds of a loop search
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSearchConfig {
    /// Shuffled rounds per objective before it is abandoned
    pub max_attempts: usize,
    /// Accepted relative deviation from the requested length
    pub tolerance: f64,
    /// Wall-clock budget of the whole search, all objectives included
    pub deadline: Option<Duration>,
}

impl Default for LoopSearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            tolerance: DISTANCE_TOLERANCE,
            deadline: None,
        }
    }
}

/// Searches one circular route per objective, starting and ending at
/// `start`.
///
/// Returns between zero and three routes in objective order; an objective
/// without an acceptable loop is simply missing.
///
/// # Errors
///
/// [`Error::InvalidNodeIndex`] if `start` is not a graph node.
pub fn find_circular_routes<O: CandidateOrder + ?Sized>(
    model: &RouteModel,
    start: NodeIndex,
    desired_distance_km: f64,
    order: &mut O,
    config: &LoopSearchConfig,
) -> Result<Vec<Route>, Error> {
    let graph = &model.street_graph;
    if !graph.contains(start) {
        return Err(Error::InvalidNodeIndex);
    }

    let desired_m = desired_distance_km * 1000.0;
    let window = LengthWindow::new(desired_m, config.tolerance);
    let deadline = config.deadline.map(|budget| Instant::now() + budget);
    let candidates: Vec<NodeIndex> = graph
        .graph()
        .node_indices()
        .filter(|&node| node != start)
        .collect();

    let mut accepted: HashSet<Vec<NodeIndex>> = HashSet::with_capacity(Objective::ALL.len());
    let mut routes = Vec::with_capacity(Objective::ALL.len());

    for objective in Objective::ALL {
        if is_expired(deadline) {
            debug!("Search deadline passed before the {objective} objective");
            break;
        }

        let trees = LoopTrees::build(graph, start, objective)?;
        let search = ObjectiveSearch {
            graph,
            trees: &trees,
            window,
            accepted: &accepted,
            deadline,
        };

        match search.run(&candidates, order, config.max_attempts)? {
            Some(walk) => {
                let route = format_route(graph, objective, &walk)?;
                debug!(
                    "Accepted {objective} loop of {:.0} m through {} nodes",
                    route.length_m,
                    walk.len()
                );
                accepted.insert(walk);
                routes.push(route);
            }
            None => debug!("No acceptable {objective} loop for {desired_m:.0} m"),
        }
    }

    Ok(routes)
}

/// Inclusive range of accepted loop lengths in meters
#[derive(Debug, Clone, Copy)]
struct LengthWindow {
    min: Meters,
    max: Meters,
}

impl LengthWindow {
    fn new(desired: Meters, tolerance: f64) -> Self {
        Self {
            min: desired * (1.0 - tolerance),
            max: desired * (1.0 + tolerance),
        }
    }

    fn contains(self, length: Meters) -> bool {
        self.min <= length && length <= self.max
    }
}

/// Optimal paths from the start and back to it under one objective.
///
/// Equivalent to running one point-to-point search per candidate in each
/// direction.
struct LoopTrees {
    outbound: ShortestPathTree,
    inbound: ShortestPathTree,
}

impl LoopTrees {
    fn build(graph: &StreetGraph, start: NodeIndex, objective: Objective) -> Result<Self, Error> {
        let cost = move |edge: &crate::StreetEdge| objective.cost(edge);
        let (outbound, inbound) = rayon::join(
            || shortest_path_tree(graph, start, Direction::Outgoing, cost),
            || shortest_path_tree(graph, start, Direction::Incoming, cost),
        );

        Ok(Self {
            outbound: outbound?,
            inbound: inbound?,
        })
    }

    /// Start -> candidate -> start, the candidate appearing once
    fn closed_walk(&self, candidate: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut walk = self.outbound.path(candidate)?;
        let back = self.inbound.path(candidate)?;
        walk.extend_from_slice(&back[1..]);
        Some(walk)
    }
}

struct ObjectiveSearch<'a> {
    graph: &'a StreetGraph,
    trees: &'a LoopTrees,
    window: LengthWindow,
    accepted: &'a HashSet<Vec<NodeIndex>>,
    deadline: Option<Instant>,
}

impl ObjectiveSearch<'_> {
    fn run<O: CandidateOrder + ?Sized>(
        &self,
        candidates: &[NodeIndex],
        order: &mut O,
        max_attempts: usize,
    ) -> Result<Option<Vec<NodeIndex>>, Error> {
        let mut round = candidates.to_vec();

        for attempt in 1..=max_attempts {
            round.copy_from_slice(candidates);
            order.arrange(&mut round);

            for &candidate in &round {
                if is_expired(self.deadline) {
                    debug!("Search deadline passed in round {attempt}");
                    return Ok(None);
                }

                let Some(walk) = self.trees.closed_walk(candidate) else {
                    continue;
                };
                if self.accepted.contains(&walk) {
                    continue;
                }

                let length = self.graph.path_length(&walk)?;
                if self.window.contains(length) {
                    trace!("Round {attempt}: accepted candidate {candidate:?} ({length:.0} m)");
                    return Ok(Some(walk));
                }
            }

            trace!("Round {attempt} of {max_attempts} found no loop");
        }

        Ok(None)
    }
}

fn is_expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}
