//! Safety normalization and edge cost derivation

use petgraph::graph::DiGraph;

use crate::model::{StreetEdge, StreetNode};

/// Scales raw safety scores to `0..=100` and derives every edge cost.
///
/// Negative raw scores count as 0. Runs once while the graph is still mutable; returns the raw maximum.
pub(crate) fn assign_weights(graph: &mut DiGraph<StreetNode, StreetEdge>) -> f64 {
    let max_raw = normalize_safety_scores(graph);
    assign_edge_costs(graph);
    max_raw
}

fn normalize_safety_scores(graph: &mut DiGraph<StreetNode, StreetEdge>) -> f64 {
    let max_raw = graph
        .node_weights()
        .map(|node| node.raw_safety)
        .fold(f64::NEG_INFINITY, f64::max);

    for node in graph.node_weights_mut() {
        node.safety_score = if max_raw > 0.0 {
            (node.raw_safety.max(0.0) / max_raw) * 100.0
        } else {
            0.0
        };
    }

    max_raw
}

fn assign_edge_costs(graph: &mut DiGraph<StreetNode, StreetEdge>) {
    for edge in graph.edge_indices() {
        let Some((_, target)) = graph.edge_endpoints(edge) else {
            continue;
        };
        let destination_score = graph[target].safety_score;
        graph[edge].assign_costs(destination_score);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Objective, StreetGraphBuilder, shortest_path};

    #[test]
    fn scores_are_scaled_to_raw_maximum() {
        let mut builder = StreetGraphBuilder::new();
        builder.add_edge(1, 2, Some(10.0));
        builder.add_edge(2, 3, Some(10.0));
        builder.add_node(1, None, Some(2.0));
        builder.add_node(2, None, Some(8.0));
        builder.add_node(3, None, Some(4.0));
        let graph = builder.build();

        let score = |id| graph.node(graph.node_index(id).unwrap()).unwrap().safety_score;
        assert_eq!(score(1), 25.0);
        assert_eq!(score(2), 100.0);
        assert_eq!(score(3), 50.0);
    }

    #[test]
    fn nonpositive_maximum_zeroes_all_scores() {
        let mut builder = StreetGraphBuilder::new();
        builder.add_edge(1, 2, Some(10.0));
        builder.add_node(1, None, Some(-4.0));
        let graph = builder.build();

        assert!(graph.graph().node_weights().all(|n| n.safety_score == 0.0));
        assert!(graph.graph().edge_weights().all(|e| e.safety_cost() > 0.0));
    }

    #[test]
    fn negative_raw_scores_are_floored_at_zero() {
        let mut builder = StreetGraphBuilder::new();
        builder.add_edge(1, 2, Some(10.0));
        builder.add_edge(2, 3, Some(10.0));
        builder.add_node(1, None, Some(8.0));
        builder.add_node(2, None, Some(-2.0));
        builder.add_node(3, None, Some(4.0));
        let graph = builder.build();

        let score = |id| graph.node(graph.node_index(id).unwrap()).unwrap().safety_score;
        assert_eq!(score(1), 100.0);
        assert_eq!(score(2), 0.0);
        assert_eq!(score(3), 50.0);
        assert!(
            graph
                .graph()
                .node_weights()
                .all(|n| (0.0..=100.0).contains(&n.safety_score))
        );
        assert!(graph.graph().edge_weights().all(|e| e.safety_cost() > 0.0));

        let path = shortest_path(
            &graph,
            graph.node_index(1).unwrap(),
            graph.node_index(3).unwrap(),
            |edge| Objective::Safe.cost(edge),
        )
        .unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn every_edge_satisfies_cost_invariants() {
        let mut builder = StreetGraphBuilder::new();
        for (u, v, len) in [(1, 2, Some(5.0)), (2, 3, None), (3, 1, Some(0.0)), (3, 4, Some(7.5))] {
            builder.add_edge(u, v, len);
        }
        builder.add_node(2, None, Some(3.0));
        builder.add_node(4, None, Some(9.0));
        let graph = builder.build();

        for edge in graph.graph().edge_weights() {
            assert!(edge.safety_cost() > 0.0);
            assert_eq!(edge.shortest_cost(), edge.length());
            assert_eq!(
                edge.hybrid_cost(),
                0.1 * edge.safety_cost() + 0.9 * edge.shortest_cost()
            );
        }
    }

    #[test]
    fn safety_cost_follows_destination_node() {
        let mut builder = StreetGraphBuilder::new();
        builder.add_edge(1, 2, Some(10.0));
        builder.add_edge(2, 1, Some(10.0));
        builder.add_node(1, None, Some(0.0));
        builder.add_node(2, None, Some(10.0));
        let graph = builder.build();

        let a = graph.node_index(1).unwrap();
        let b = graph.node_index(2).unwrap();
        let into_safe = graph.edge(a, b).unwrap().safety_cost();
        let into_unsafe = graph.edge(b, a).unwrap().safety_cost();

        assert!(into_safe < into_unsafe);
    }
}
