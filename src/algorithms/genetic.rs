use log::{debug, warn};
use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::{AlgorithmResult, Progress};
use crate::error::Result;
use crate::operators::{
    crossover::Crossover, crossover::OrderCrossover, evaluation::Evaluation,
    initialisation::InitPop, initialisation::RandomPermutation, mutation::Mutation,
    mutation::SwapMutation, selection::random_parents, selection::truncation,
    solution::Solution,
};
use crate::utilities::stopwatch::Budget;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct GeneticParams {
    pub pop_size: usize,
    pub generations: usize,
    pub mutation_probability: f64,
}

impl GeneticParams {
    /// Bigger instances get a bigger population and more generations.
    pub fn for_cities(num_cities: usize) -> GeneticParams {
        if num_cities <= 10 {
            GeneticParams {
                pop_size: 100,
                generations: 200,
                mutation_probability: 0.1,
            }
        } else {
            GeneticParams {
                pop_size: 150,
                generations: 300,
                mutation_probability: 0.1,
            }
        }
    }
}

/**
 * Generational GA over permutations.
 *
 * Each generation the cheaper half survives (truncation), parents are drawn from the
 * survivors with replacement and recombined with order crossover, then every child may
 * be swap-mutated. The population is not elitist, so the best tour ever evaluated is
 * tracked on the side and that's what gets returned.
 */
pub fn run<Eval: Evaluation + Sync, R: Rng + ?Sized>(
    evaluate: &Eval,
    num_cities: usize,
    params: &GeneticParams,
    rng: &mut R,
    budget: &mut Budget,
    mut iteration_observer: impl FnMut(&Progress),
) -> Result<AlgorithmResult> {
    let pop_size = params.pop_size.max(2);
    let num_survivors = pop_size / 2;

    let init_pop = RandomPermutation::new(num_cities);
    let crossover = OrderCrossover::new();
    let mutation = SwapMutation::new(params.mutation_probability);

    let mut population = init_pop.apply(pop_size, rng);
    let mut best: Option<Solution> = None;

    for generation in 0..params.generations {
        evaluate_population(evaluate, &mut population);
        update_best(&population, &mut best);

        if let Some(best) = &best {
            iteration_observer(&Progress {
                iteration: generation,
                best_cost: best.cost(),
                temperature: None,
            });
        }

        if budget.is_exhausted() {
            warn!("Genetic algorithm ran out of time after {} generations", generation);
            break;
        }

        let survivors = truncation(population, num_survivors);

        let mut children = Vec::with_capacity(pop_size + 1);
        while children.len() < pop_size {
            let (parent_one, parent_two) = random_parents(&survivors, rng);
            children.extend(crossover.apply(parent_one, parent_two, rng)?);
        }
        children.truncate(pop_size);

        population = children
            .into_iter()
            .map(|child| mutation.apply(child, rng))
            .collect();
    }

    // The last brood hasn't been looked at yet
    evaluate_population(evaluate, &mut population);
    update_best(&population, &mut best);

    let best = match best {
        Some(best) => best,
        None => Solution::identity(num_cities),
    };

    debug!("Genetic algorithm best tour {} with cost {:?}", best, best.cost);

    Ok(AlgorithmResult::from_tour(evaluate, &best))
}

fn evaluate_population<Eval: Evaluation + Sync>(evaluate: &Eval, population: &mut Vec<Solution>) {
    population
        .par_iter_mut()
        .filter(|ind| ind.cost.is_none())
        .for_each(|ind| {
            evaluate.evaluate_ind(ind);
        });
}

fn update_best(population: &[Solution], best: &mut Option<Solution>) {
    for ind in population {
        let improves = match best {
            Some(best) => ind.cost() < best.cost(),
            None => true,
        };

        if improves {
            *best = Some(ind.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::brute_force;
    use crate::algorithms::test_utils::{euclidean, scrambled_circle};
    use crate::operators::evaluation::MatrixEval;
    use crate::operators::solution::check_closed_route;
    use crate::utilities::random::make_rng;

    fn small_params() -> GeneticParams {
        GeneticParams {
            pop_size: 30,
            generations: 40,
            mutation_probability: 0.1,
        }
    }

    #[test]
    fn test_params_scale_with_cities() {
        let small = GeneticParams::for_cities(8);
        let large = GeneticParams::for_cities(11);

        assert_eq!(small.pop_size, 100);
        assert_eq!(small.generations, 200);
        assert!(large.pop_size > small.pop_size);
        assert!(large.generations > small.generations);
    }

    #[test]
    fn test_returns_closed_permutation() {
        for seed in 0..10 {
            for &n in &[2, 3, 5, 8, 10] {
                let dm = euclidean(&scrambled_circle(n));
                let eval = MatrixEval::new(&dm);
                let mut rng = make_rng(Some(seed));

                let result =
                    run(&eval, n, &small_params(), &mut rng, &mut Budget::unlimited(), |_| {})
                        .unwrap();

                assert_eq!(result.route.len(), n + 1);
                assert!(check_closed_route(&result.route, n).is_ok());
                assert_eq!(result.distance, eval.path_cost(&result.route));
            }
        }
    }

    #[test]
    fn test_close_to_optimum_on_small_instance() {
        let dm = euclidean(&scrambled_circle(8));
        let eval = MatrixEval::new(&dm);

        let optimum = brute_force::run(&eval, 8, &mut Budget::unlimited(), |_| {});

        let mut rng = make_rng(Some(99));
        let params = GeneticParams::for_cities(8);
        let result = run(&eval, 8, &params, &mut rng, &mut Budget::unlimited(), |_| {}).unwrap();

        assert!(result.distance >= optimum.distance - 1e-9);
        assert!(result.distance <= optimum.distance * 1.1);
    }

    #[test]
    fn test_best_is_tracked_across_generations() {
        let dm = euclidean(&scrambled_circle(10));
        let eval = MatrixEval::new(&dm);
        let mut rng = make_rng(Some(5));

        let mut history = Vec::new();
        let result = run(&eval, 10, &small_params(), &mut rng, &mut Budget::unlimited(), |p| {
            history.push(p.best_cost)
        })
        .unwrap();

        assert_eq!(history.len(), small_params().generations);
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.distance <= history[history.len() - 1]);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let dm = euclidean(&scrambled_circle(9));
        let eval = MatrixEval::new(&dm);

        let a = run(&eval, 9, &small_params(), &mut make_rng(Some(3)), &mut Budget::unlimited(), |_| {})
            .unwrap();
        let b = run(&eval, 9, &small_params(), &mut make_rng(Some(3)), &mut Budget::unlimited(), |_| {})
            .unwrap();

        assert_eq!(a, b);
    }
}
