use petgraph::graph::NodeIndex;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Source of the order in which intermediate nodes are tried.
///
/// Called once per search round with all candidates, to be rearranged in
/// place.
pub trait CandidateOrder {
    fn arrange(&mut self, candidates: &mut [NodeIndex]);
}

/// Uniformly random candidate order
#[derive(Debug, Clone)]
pub struct RandomOrder<R> {
    rng: R,
}

impl<R: Rng> RandomOrder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOrder<StdRng> {
    /// Independent, OS-seeded order for one request
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CandidateOrder for RandomOrder<R> {
    fn arrange(&mut self, candidates: &mut [NodeIndex]) {
        candidates.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_a_permutation() {
        let original: Vec<NodeIndex> = (0..50).map(NodeIndex::new).collect();
        let mut shuffled = original.clone();
        RandomOrder::seeded(7).arrange(&mut shuffled);

        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn equal_seeds_give_equal_orders() {
        let mut a: Vec<NodeIndex> = (0..20).map(NodeIndex::new).collect();
        let mut b = a.clone();
        RandomOrder::seeded(42).arrange(&mut a);
        RandomOrder::seeded(42).arrange(&mut b);

        assert_eq!(a, b);
    }
}
