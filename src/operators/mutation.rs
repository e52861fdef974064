use rand::prelude::*;

use crate::operators::solution::Solution;
use crate::utilities::random::distinct_pair;

pub trait Mutation {
    fn apply<R: Rng + ?Sized>(&self, solution: Solution, rng: &mut R) -> Solution;
}

/// With probability `pm`, swaps two distinct positions.
#[derive(Clone, Copy, Debug)]
pub struct SwapMutation {
    pm: f64,
}

impl SwapMutation {
    pub fn new(pm: f64) -> SwapMutation {
        if !(0.0..=1.0).contains(&pm) {
            panic!("Mutation probability must be between 0 and 1");
        }

        SwapMutation { pm }
    }
}

impl Mutation for SwapMutation {
    fn apply<R: Rng + ?Sized>(&self, mut solution: Solution, rng: &mut R) -> Solution {
        if solution.len() < 2 || rng.gen::<f64>() >= self.pm {
            return solution;
        }

        let (a, b) = distinct_pair(solution.len(), rng);
        solution.swap(a, b);

        solution
    }
}
