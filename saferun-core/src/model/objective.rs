use std::fmt;

use serde::{Deserialize, Serialize};

use super::StreetEdge;

/// Route optimization objective, each selecting its own edge cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Prefer edges leading into high-safety nodes
    Safe,
    /// Prefer physically short edges
    Shortest,
    /// 1:9 blend of safety cost and length
    Balanced,
}

impl Objective {
    /// Objectives in the order routes are searched for
    pub const ALL: [Objective; 3] = [Objective::Safe, Objective::Shortest, Objective::Balanced];

    /// Edge cost used by path search under this objective
    pub fn cost(self, edge: &StreetEdge) -> f64 {
        match self {
            Objective::Safe => edge.safety_cost(),
            Objective::Shortest => edge.shortest_cost(),
            Objective::Balanced => edge.hybrid_cost(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Objective::Safe => "safe",
            Objective::Shortest => "shortest",
            Objective::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
