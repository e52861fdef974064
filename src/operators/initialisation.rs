use rand::prelude::*;

use crate::operators::solution::Solution;
use crate::utilities::random::shuffled;

pub trait InitPop {
    fn apply<R: Rng + ?Sized>(&self, pop_size: usize, rng: &mut R) -> Vec<Solution>;
}

pub struct RandomPermutation {
    num_cities: usize,
}

impl RandomPermutation {
    pub fn new(num_cities: usize) -> RandomPermutation {
        RandomPermutation { num_cities }
    }
}

impl InitPop for RandomPermutation {
    fn apply<R: Rng + ?Sized>(&self, pop_size: usize, rng: &mut R) -> Vec<Solution> {
        (0..pop_size)
            .map(|_| Solution::new(shuffled(self.num_cities, rng)))
            .collect()
    }
}
