use log::{debug, warn};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::{AlgorithmResult, Progress};
use crate::error::{EngineError, Result};
use crate::operators::{
    evaluation::Evaluation, neighbour_gen::NeighbourGenerator, neighbour_gen::SwapNeighbour,
    solution::Solution,
};
use crate::utilities::random::shuffled;
use crate::utilities::stopwatch::Budget;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AnnealingParams {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub final_temperature: f64,
}

impl AnnealingParams {
    /// Larger instances start hotter and cool more slowly.
    pub fn for_cities(num_cities: usize) -> AnnealingParams {
        if num_cities <= 10 {
            AnnealingParams {
                initial_temperature: 5000.0,
                cooling_rate: 0.995,
                final_temperature: 1.0,
            }
        } else {
            AnnealingParams {
                initial_temperature: 10000.0,
                cooling_rate: 0.997,
                final_temperature: 1.0,
            }
        }
    }

    /// The schedule must actually cool down towards a positive floor.
    pub fn validate(&self) -> Result<()> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(invalid(format!(
                "cooling rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }

        if !(self.final_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err(invalid(format!(
                "temperatures must be positive and finite, got {} -> {}",
                self.initial_temperature, self.final_temperature
            )));
        }

        Ok(())
    }

    pub fn num_steps(&self) -> usize {
        if self.initial_temperature <= self.final_temperature {
            return 0;
        }

        let steps = (self.final_temperature / self.initial_temperature).ln() / self.cooling_rate.ln();
        steps.ceil() as usize
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidParams(message)
}

/**
 * Simulated annealing with pairwise swap moves and geometric cooling.
 *
 * Downhill moves are always taken, uphill ones with probability exp(-delta / T). The
 * current tour may get worse, the best tour seen never does.
 */
pub fn run<Eval: Evaluation, R: Rng + ?Sized>(
    evaluate: &Eval,
    num_cities: usize,
    params: &AnnealingParams,
    rng: &mut R,
    budget: &mut Budget,
    mut iteration_observer: impl FnMut(&Progress),
) -> Result<AlgorithmResult> {
    params.validate()?;

    let neighbour_gen = SwapNeighbour;

    let mut current = Solution::new(shuffled(num_cities, rng));
    evaluate.evaluate_ind(&mut current);

    let mut best = current.clone();

    let mut temperature = params.initial_temperature;
    let mut step = 0;
    let mut accepted_uphill = 0;

    while temperature > params.final_temperature {
        let mut candidate = neighbour_gen.apply(&current, rng);
        evaluate.evaluate_ind(&mut candidate);

        let delta = candidate.cost() - current.cost();
        let sample: f64 = rng.gen();

        if candidate.cost() < best.cost() {
            best = candidate.clone();
        }

        if delta < 0.0 {
            current = candidate;
        } else if sample < (-delta / temperature).exp() {
            current = candidate;
            accepted_uphill = accepted_uphill + 1;
        }

        temperature = temperature * params.cooling_rate;
        step = step + 1;

        iteration_observer(&Progress {
            iteration: step,
            best_cost: best.cost(),
            temperature: Some(temperature),
        });

        if budget.is_exhausted() {
            warn!("Simulated annealing ran out of time at temperature {:.3}", temperature);
            break;
        }
    }

    debug!(
        "Simulated annealing took {} of {} planned steps ({} uphill moves), best cost {}",
        step,
        params.num_steps(),
        accepted_uphill,
        best.cost()
    );

    Ok(AlgorithmResult::from_tour(evaluate, &best))
}
