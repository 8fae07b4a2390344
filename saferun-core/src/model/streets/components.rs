//! Street network components - nodes and edges

use geo::Point;

use crate::{Meters, NodeId, SAFETY_EPSILON};

/// Length assigned to edges whose source data has none
pub const DEFAULT_EDGE_LENGTH: Meters = 1.0;

/// Share of the safety cost in the balanced cost
pub const HYBRID_SAFETY_WEIGHT: f64 = 0.1;
/// Share of the physical length in the balanced cost
pub const HYBRID_LENGTH_WEIGHT: f64 = 0.9;

/// Street graph node
#[derive(Debug, Clone, PartialEq)]
pub struct StreetNode {
    /// External (OSM) id of the node
    pub id: NodeId,
    /// Node coordinates, `x` is longitude and `y` is latitude
    pub geometry: Option<Point<f64>>,
    /// Safety score as found in the attribute table
    pub raw_safety: f64,
    /// Safety score scaled to `0..=100`
    pub safety_score: f64,
}

impl StreetNode {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            geometry: None,
            raw_safety: 0.0,
            safety_score: 0.0,
        }
    }

    pub fn lat(&self) -> Option<f64> {
        self.geometry.map(|p| p.y())
    }

    pub fn lon(&self) -> Option<f64> {
        self.geometry.map(|p| p.x())
    }
}

/// Directed street segment with its derived traversal costs
#[derive(Debug, Clone, PartialEq)]
pub struct StreetEdge {
    pub(crate) length: Meters,
    pub(crate) safety_cost: f64,
    pub(crate) shortest_cost: f64,
    pub(crate) hybrid_cost: f64,
}

impl StreetEdge {
    /// Creates an edge whose costs are filled in later by weight assignment
    pub(crate) fn with_length(length: Option<Meters>) -> Self {
        let length = length
            .filter(|l| l.is_finite() && *l >= 0.0)
            .unwrap_or(DEFAULT_EDGE_LENGTH);

        Self {
            length,
            safety_cost: 0.0,
            shortest_cost: 0.0,
            hybrid_cost: 0.0,
        }
    }

    /// Derives the three costs from the safety score of the node this
    /// edge leads into.
    pub(crate) fn assign_costs(&mut self, destination_score: f64) {
        self.safety_cost = 1.0 / (destination_score + SAFETY_EPSILON);
        self.shortest_cost = self.length;
        self.hybrid_cost =
            HYBRID_SAFETY_WEIGHT * self.safety_cost + HYBRID_LENGTH_WEIGHT * self.shortest_cost;
    }

    /// Physical length in meters
    pub fn length(&self) -> Meters {
        self.length
    }

    pub fn safety_cost(&self) -> f64 {
        self.safety_cost
    }

    pub fn shortest_cost(&self) -> f64 {
        self.shortest_cost
    }

    pub fn hybrid_cost(&self) -> f64 {
        self.hybrid_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_invalid_length_defaults_to_one() {
        assert_eq!(StreetEdge::with_length(None).length(), DEFAULT_EDGE_LENGTH);
        assert_eq!(StreetEdge::with_length(Some(f64::NAN)).length(), DEFAULT_EDGE_LENGTH);
        assert_eq!(StreetEdge::with_length(Some(-3.0)).length(), DEFAULT_EDGE_LENGTH);
        assert_eq!(StreetEdge::with_length(Some(0.0)).length(), 0.0);
    }

    #[test]
    fn zero_score_destination_gets_huge_but_finite_cost() {
        let mut edge = StreetEdge::with_length(Some(10.0));
        edge.assign_costs(0.0);

        assert!(edge.safety_cost().is_finite());
        assert!((edge.safety_cost() - 1e6).abs() < 1e-3);
        assert_eq!(edge.shortest_cost(), 10.0);
        assert_eq!(
            edge.hybrid_cost(),
            0.1 * edge.safety_cost() + 0.9 * edge.shortest_cost()
        );
    }

    #[test]
    fn fully_safe_destination_has_small_cost() {
        let mut edge = StreetEdge::with_length(Some(10.0));
        edge.assign_costs(100.0);

        assert!(edge.safety_cost() > 0.0);
        assert!(edge.safety_cost() < 0.011);
    }
}
