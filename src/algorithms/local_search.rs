use log::{debug, warn};

use crate::algorithms::{AlgorithmResult, Progress};
use crate::operators::{evaluation::Evaluation, solution::Solution};
use crate::utilities::stopwatch::Budget;

/**
 * First-improvement pairwise swap search.
 *
 * Position 0 stays fixed as the anchor. Any swap of positions `i < j` that strictly
 * lowers the tour cost is kept straight away and the scan carries on from there. The
 * search ends after a full pass without an accepted swap, or after `max_passes`.
 */
pub fn run<Eval: Evaluation>(
    evaluate: &Eval,
    initial: Solution,
    max_passes: usize,
    budget: &mut Budget,
    mut iteration_observer: impl FnMut(&Progress),
) -> AlgorithmResult {
    let mut route = initial;
    let mut best_cost = evaluate.tour_cost(&route.point);

    let n = route.len();
    let mut improved = true;
    let mut passes = 0;

    while improved && passes < max_passes {
        improved = false;

        for i in 1..n {
            for j in (i + 1)..n {
                route.swap(i, j);
                let cost = evaluate.tour_cost(&route.point);

                if cost < best_cost {
                    best_cost = cost;
                    improved = true;
                } else {
                    route.swap(i, j);
                }
            }
        }

        passes = passes + 1;
        iteration_observer(&Progress {
            iteration: passes,
            best_cost,
            temperature: None,
        });

        if improved && budget.is_exhausted() {
            warn!("Local search ran out of time after {} passes", passes);
            break;
        }
    }

    route.cost = Some(best_cost);
    debug!("Local search finished after {} passes with cost {}", passes, best_cost);

    AlgorithmResult::from_tour(evaluate, &route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::brute_force::Permutations;
    use crate::algorithms::test_utils::{euclidean, scrambled_circle};
    use crate::operators::evaluation::MatrixEval;
    use crate::operators::solution::check_closed_route;

    const UNLIMITED_PASSES: usize = 10_000;

    #[test]
    fn test_unit_square_every_ordering() {
        let dm = euclidean(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let eval = MatrixEval::new(&dm);

        for ordering in Permutations::new(4) {
            let initial = Solution::new(ordering.clone());
            let result = run(&eval, initial, UNLIMITED_PASSES, &mut Budget::unlimited(), |_| {});

            assert_eq!(result.distance, 4.0, "starting from {:?}", ordering);
            assert_eq!(result.route[0], ordering[0]);
            assert!(check_closed_route(&result.route, 4).is_ok());
        }
    }

    #[test]
    fn test_never_worse_than_input() {
        let points = scrambled_circle(6);
        let dm = euclidean(&points);
        let eval = MatrixEval::new(&dm);

        for ordering in Permutations::new(6) {
            let input_cost = eval.tour_cost(&ordering);

            let result = run(
                &eval,
                Solution::new(ordering),
                UNLIMITED_PASSES,
                &mut Budget::unlimited(),
                |_| {},
            );

            assert!(result.distance <= input_cost);
            assert!(check_closed_route(&result.route, 6).is_ok());
        }
    }

    #[test]
    fn test_deterministic() {
        let dm = euclidean(&scrambled_circle(6));
        let eval = MatrixEval::new(&dm);

        let a = run(&eval, Solution::identity(6), UNLIMITED_PASSES, &mut Budget::unlimited(), |_| {});
        let b = run(&eval, Solution::identity(6), UNLIMITED_PASSES, &mut Budget::unlimited(), |_| {});

        assert_eq!(a, b);
    }

    #[test]
    fn test_cost_non_increasing_per_pass() {
        let dm = euclidean(&scrambled_circle(9));
        let eval = MatrixEval::new(&dm);

        let mut history = Vec::new();
        run(&eval, Solution::identity(9), UNLIMITED_PASSES, &mut Budget::unlimited(), |p| {
            history.push(p.best_cost)
        });

        assert!(!history.is_empty());
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_pass_ceiling() {
        let dm = euclidean(&scrambled_circle(9));
        let eval = MatrixEval::new(&dm);

        let mut passes = 0;
        let result = run(&eval, Solution::identity(9), 1, &mut Budget::unlimited(), |_| {
            passes += 1
        });

        assert_eq!(passes, 1);
        assert!(check_closed_route(&result.route, 9).is_ok());
    }

    #[test]
    fn test_two_cities() {
        let dm = euclidean(&[(0.0, 0.0), (0.0, 5.0)]);
        let eval = MatrixEval::new(&dm);

        let result = run(&eval, Solution::identity(2), UNLIMITED_PASSES, &mut Budget::unlimited(), |_| {});
        assert_eq!(result.route, vec![0, 1, 0]);
        assert_eq!(result.distance, 10.0);
    }
}
