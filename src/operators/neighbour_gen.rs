use rand::prelude::*;

use crate::operators::solution::Solution;
use crate::utilities::random::distinct_pair;

pub trait NeighbourGenerator {
    fn apply<R: Rng + ?Sized>(&self, solution: &Solution, rng: &mut R) -> Solution;
}

/// Swaps the cities at two distinct random positions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwapNeighbour;

impl NeighbourGenerator for SwapNeighbour {
    fn apply<R: Rng + ?Sized>(&self, solution: &Solution, rng: &mut R) -> Solution {
        let mut solution = solution.clone();

        if solution.len() >= 2 {
            let (a, b) = distinct_pair(solution.len(), rng);
            solution.swap(a, b);
        }

        solution
    }
}
