pub mod annealing;
pub mod brute_force;
pub mod genetic;
pub mod local_search;

#[cfg(test)]
pub mod test_utils;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::city::CityId;
use crate::operators::evaluation::Evaluation;
use crate::operators::solution::Solution;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BruteForce,
    LocalSearch,
    Genetic,
    SimulatedAnnealing,
}

impl Algorithm {
    /// Exact search while n! stays small, then progressively cheaper heuristics.
    pub fn select(num_cities: usize) -> Algorithm {
        match num_cities {
            0..=4 => Algorithm::BruteForce,
            5..=7 => Algorithm::LocalSearch,
            8..=10 => Algorithm::Genetic,
            _ => Algorithm::SimulatedAnnealing,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BruteForce => "Brute Force",
            Algorithm::LocalSearch => "Local Search",
            Algorithm::Genetic => "Genetic Algorithm",
            Algorithm::SimulatedAnnealing => "Simulated Annealing",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "brute_force" => Ok(Algorithm::BruteForce),
            "local_search" => Ok(Algorithm::LocalSearch),
            "genetic" => Ok(Algorithm::Genetic),
            "simulated_annealing" | "annealing" => Ok(Algorithm::SimulatedAnnealing),
            other => Err(format!("unknown algorithm '{}'", other)),
        }
    }
}

/// A closed tour (first city repeated at the end) and its total cost.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmResult {
    pub route: Vec<CityId>,
    pub distance: f64,
}

impl AlgorithmResult {
    pub fn from_tour(evaluate: &impl Evaluation, tour: &Solution) -> AlgorithmResult {
        AlgorithmResult {
            route: tour.closed(),
            distance: evaluate.tour_cost(&tour.point),
        }
    }
}

/// Reported to iteration observers after every pass, generation or temperature step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub iteration: usize,
    pub best_cost: f64,
    pub temperature: Option<f64>,
}
