use rand::prelude::*;
use std::cmp::Ordering;

use crate::operators::solution::Solution;

/// Keeps the `keep` cheapest evaluated solutions, cheapest first.
pub fn truncation(mut population: Vec<Solution>, keep: usize) -> Vec<Solution> {
    population.sort_by(|x, y| {
        x.cost()
            .partial_cmp(&y.cost())
            .unwrap_or(Ordering::Equal)
    });
    population.truncate(keep);

    population
}

/// Draws two parents independently, so the same survivor may be picked twice.
pub fn random_parents<'a, R: Rng + ?Sized>(
    survivors: &'a [Solution],
    rng: &mut R,
) -> (&'a Solution, &'a Solution) {
    if survivors.is_empty() {
        panic!("Cannot draw parents from an empty population");
    }

    let a = rng.gen_range(0, survivors.len());
    let b = rng.gen_range(0, survivors.len());

    (&survivors[a], &survivors[b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::random::make_rng;

    fn with_cost(point: Vec<usize>, cost: f64) -> Solution {
        let mut solution = Solution::new(point);
        solution.cost = Some(cost);
        solution
    }

    #[test]
    fn test_truncation() {
        let population = vec![
            with_cost(vec![0, 1, 2], 5.0),
            with_cost(vec![1, 0, 2], 1.0),
            with_cost(vec![2, 1, 0], 3.0),
            with_cost(vec![0, 2, 1], 4.0),
        ];

        let survivors = truncation(population, 2);

        assert_eq!(survivors.len(), 2);
        assert_eq!(survivors[0].cost(), 1.0);
        assert_eq!(survivors[1].cost(), 3.0);
    }

    #[test]
    fn test_random_parents_with_replacement() {
        let survivors = vec![with_cost(vec![0, 1], 1.0)];
        let mut rng = make_rng(Some(4));

        let (a, b) = random_parents(&survivors, &mut rng);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_parents_cover_population() {
        let survivors: Vec<Solution> = (0..5).map(|i| with_cost(vec![i], i as f64)).collect();
        let mut rng = make_rng(Some(8));
        let mut seen = vec![false; 5];

        for _ in 0..200 {
            let (a, b) = random_parents(&survivors, &mut rng);
            seen[a[0]] = true;
            seen[b[0]] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    #[should_panic(expected = "Cannot draw parents from an empty population")]
    fn test_random_parents_empty() {
        random_parents(&[], &mut make_rng(Some(1)));
    }
}
