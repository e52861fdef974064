use log::{debug, warn};

use crate::algorithms::{AlgorithmResult, Progress};
use crate::operators::{evaluation::Evaluation, solution::Solution};
use crate::utilities::stopwatch::Budget;

// How often the budget is consulted
const BUDGET_CHECK_INTERVAL: usize = 1024;

/**
 * Tries every ordering of the cities and keeps the cheapest.
 *
 * Permutations are generated one at a time in lexicographic order, so ties go to the
 * lexicographically smallest tour.
 */
pub fn run<Eval: Evaluation>(
    evaluate: &Eval,
    num_cities: usize,
    budget: &mut Budget,
    mut iteration_observer: impl FnMut(&Progress),
) -> AlgorithmResult {
    let mut best = Solution::identity(num_cities);
    let mut best_cost = std::f64::INFINITY;

    for (i, permutation) in Permutations::new(num_cities).enumerate() {
        let cost = evaluate.tour_cost(&permutation);

        if cost < best_cost {
            best_cost = cost;
            best = Solution::new(permutation);
        }

        if (i + 1) % BUDGET_CHECK_INTERVAL == 0 {
            iteration_observer(&Progress {
                iteration: i + 1,
                best_cost,
                temperature: None,
            });

            if budget.is_exhausted() {
                warn!("Brute force ran out of time after {} permutations", i + 1);
                break;
            }
        }
    }

    debug!("Brute force best tour {} with cost {}", best, best_cost);

    AlgorithmResult::from_tour(evaluate, &best)
}

/// Lazily yields every permutation of `0..n` in lexicographic order.
pub struct Permutations {
    next: Option<Vec<usize>>,
}

impl Permutations {
    pub fn new(n: usize) -> Permutations {
        Permutations {
            next: Some((0..n).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        let mut following = current.clone();
        if next_permutation(&mut following) {
            self.next = Some(following);
        }

        Some(current)
    }
}

/// Rearranges `items` into the next lexicographic permutation, false once it wraps.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix
    let mut pivot = items.len() - 1;
    while pivot > 0 && items[pivot - 1] >= items[pivot] {
        pivot = pivot - 1;
    }

    if pivot == 0 {
        return false;
    }

    let mut successor = items.len() - 1;
    while items[successor] <= items[pivot - 1] {
        successor = successor - 1;
    }

    items.swap(pivot - 1, successor);
    items[pivot..].reverse();

    true
}
