use std::fmt::Display;
use std::time::Duration;

use log::{info, trace};
use rand::Rng;

use crate::algorithms::{
    annealing, brute_force, genetic, local_search, Algorithm, AlgorithmResult, Progress,
};
use crate::error::{EngineError, Result};
use crate::models::city::{CityId, Coordinate};
use crate::models::selection::Selection;
use crate::operators::distance_matrix::DistanceMatrix;
use crate::operators::evaluation::MatrixEval;
use crate::operators::solution::{check_closed_route, Solution};
use crate::settings::Settings;
use crate::utilities::math::round_to;
use crate::utilities::random::make_rng;
use crate::utilities::stopwatch::Budget;

/// What gets handed back to the display side after an optimisation.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteReport {
    pub algorithm: Algorithm,
    /// Closed tour, first city repeated at the end
    pub route: Vec<CityId>,
    pub stops: Vec<Coordinate>,
    /// Kilometres
    pub distance: f64,
    /// Seconds, only when every leg has timing data
    pub duration: Option<f64>,
    pub elapsed: Duration,
}

impl Display for RouteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let route: Vec<String> = self
            .route
            .iter()
            .map(|id| format!("City {}", id + 1))
            .collect();

        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Route: {}", route.join(" → "))?;
        write!(f, "Total distance: {:.2} km", round_to(self.distance, 2))?;

        if let Some(duration) = self.duration {
            write!(f, "\nEstimated time: {:.2} minutes", round_to(duration / 60.0, 2))?;
        }

        Ok(())
    }
}

/**
 * Computes a tour over every selected city.
 *
 * The matrix must have been built for the selection as it is now. Nothing is computed
 * for fewer than two cities or for a stale matrix.
 */
pub fn optimize(selection: &Selection, dm: &DistanceMatrix, settings: &Settings) -> Result<RouteReport> {
    let num_cities = selection.len();
    if num_cities < 2 {
        return Err(EngineError::NotEnoughCities { found: num_cities });
    }

    settings.validate()?;
    dm.ensure_current(selection)?;

    let algorithm = match settings.forced_algorithm()? {
        Some(algorithm) => algorithm,
        None => Algorithm::select(num_cities),
    };

    if algorithm == Algorithm::BruteForce && num_cities > settings.brute_force_limit {
        return Err(EngineError::TooManyCities {
            algorithm: algorithm.to_string(),
            found: num_cities,
            limit: settings.brute_force_limit,
        });
    }

    info!("Optimising {} cities with {}", num_cities, algorithm);

    let mut rng = make_rng(settings.seed);
    let mut budget = Budget::new(settings.time_limit()?);

    let result = solve(algorithm, dm, settings, &mut rng, &mut budget)?;
    check_closed_route(&result.route, num_cities)?;

    let evaluate = MatrixEval::new(dm);
    let stops = result
        .route
        .iter()
        .map(|&id| match selection.get(id) {
            Some(city) => Ok(city.position),
            None => Err(EngineError::InvariantViolation(format!("unknown city {}", id))),
        })
        .collect::<Result<Vec<Coordinate>>>()?;

    let report = RouteReport {
        algorithm,
        duration: evaluate.path_duration(&result.route),
        distance: result.distance,
        route: result.route,
        stops,
        elapsed: budget.elapsed(),
    };

    info!(
        "{} found a tour of {:.2} km in {:?}",
        algorithm, report.distance, report.elapsed
    );

    Ok(report)
}

/// Runs one algorithm over every city in the matrix, starting from index order.
pub fn solve<R: Rng + ?Sized>(
    algorithm: Algorithm,
    dm: &DistanceMatrix,
    settings: &Settings,
    rng: &mut R,
    budget: &mut Budget,
) -> Result<AlgorithmResult> {
    let num_cities = dm.len();
    let evaluate = MatrixEval::new(dm);

    let observer = |progress: &Progress| {
        trace!(
            "{} iteration {}: best {:.3} (T = {:?})",
            algorithm,
            progress.iteration,
            progress.best_cost,
            progress.temperature
        )
    };

    match algorithm {
        Algorithm::BruteForce => Ok(brute_force::run(&evaluate, num_cities, budget, observer)),
        Algorithm::LocalSearch => Ok(local_search::run(
            &evaluate,
            Solution::identity(num_cities),
            settings.max_passes,
            budget,
            observer,
        )),
        Algorithm::Genetic => genetic::run(
            &evaluate,
            num_cities,
            &settings.genetic_params(num_cities),
            rng,
            budget,
            observer,
        ),
        Algorithm::SimulatedAnnealing => annealing::run(
            &evaluate,
            num_cities,
            &settings.annealing_params(num_cities),
            rng,
            budget,
            observer,
        ),
    }
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::models::city::City;
    use crate::operators::distance_matrix::{DistanceSource, GreatCircle, Leg};

    struct Euclidean;

    impl DistanceSource for Euclidean {
        fn measure(&self, from: &City, to: &City) -> Result<Leg> {
            let dx = from.position.lat - to.position.lat;
            let dy = from.position.lng - to.position.lng;

            Ok(Leg {
                distance: (dx * dx + dy * dy).sqrt(),
                duration: Some(30.0),
            })
        }
    }

    fn seeded() -> Settings {
        let mut settings = Settings::default();
        settings.seed = Some(1);
        settings
    }

    fn selection_of(num_cities: usize) -> Selection {
        let coordinates = (0..num_cities).map(|i| {
            let angle = 2.0 * std::f64::consts::PI * ((i * 7) % num_cities) as f64 / num_cities as f64;
            Coordinate::new(angle.cos(), angle.sin())
        });

        Selection::from_coordinates(coordinates, None).unwrap()
    }

    #[test]
    fn test_unit_square() {
        let selection = Selection::from_coordinates(
            vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(0.0, 1.0),
                Coordinate::new(1.0, 1.0),
                Coordinate::new(1.0, 0.0),
            ],
            None,
        )
        .unwrap();
        let dm = DistanceMatrix::build(&selection, &Euclidean).unwrap();

        let report = optimize(&selection, &dm, &seeded()).unwrap();

        assert_eq!(report.algorithm, Algorithm::BruteForce);
        assert_eq!(report.distance, 4.0);
        assert_eq!(report.route, vec![0, 1, 2, 3, 0]);
        assert_eq!(report.stops[2], Coordinate::new(1.0, 1.0));
        assert_eq!(report.duration, Some(120.0));
    }

    #[test]
    fn test_selector_drives_algorithm() {
        for &(n, expected) in &[
            (2, Algorithm::BruteForce),
            (5, Algorithm::LocalSearch),
            (8, Algorithm::Genetic),
            (11, Algorithm::SimulatedAnnealing),
        ] {
            let selection = selection_of(n);
            let dm = DistanceMatrix::build(&selection, &GreatCircle).unwrap();

            let report = optimize(&selection, &dm, &seeded()).unwrap();

            assert_eq!(report.algorithm, expected);
            assert!(check_closed_route(&report.route, n).is_ok());
            assert_eq!(report.stops.len(), n + 1);
            assert_eq!(report.duration, None);
        }
    }

    #[test]
    fn test_not_enough_cities() {
        for n in 0..2 {
            let selection = selection_of(n);
            let dm = DistanceMatrix::build(&selection, &Euclidean).unwrap();

            match optimize(&selection, &dm, &seeded()) {
                Err(EngineError::NotEnoughCities { found }) => assert_eq!(found, n),
                other => panic!("Expected NotEnoughCities, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_stale_matrix() {
        let mut selection = selection_of(4);
        let dm = DistanceMatrix::build(&selection, &Euclidean).unwrap();

        selection.push(Coordinate::new(5.0, 5.0)).unwrap();

        match optimize(&selection, &dm, &seeded()) {
            Err(EngineError::MatrixUnavailable(_)) => {}
            other => panic!("Expected MatrixUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_forced_algorithm() {
        let selection = selection_of(6);
        let dm = DistanceMatrix::build(&selection, &Euclidean).unwrap();

        let mut settings = seeded();
        settings.algorithm = "brute_force".to_string();

        let exact = optimize(&selection, &dm, &settings).unwrap();
        assert_eq!(exact.algorithm, Algorithm::BruteForce);

        settings.algorithm = "simulated_annealing".to_string();
        let annealed = optimize(&selection, &dm, &settings).unwrap();
        assert_eq!(annealed.algorithm, Algorithm::SimulatedAnnealing);
        assert!(annealed.distance >= exact.distance - 1e-9);
    }

    #[test]
    fn test_brute_force_limit() {
        let selection = selection_of(6);
        let dm = DistanceMatrix::build(&selection, &Euclidean).unwrap();

        let mut settings = seeded();
        settings.algorithm = "brute_force".to_string();
        settings.brute_force_limit = 5;

        match optimize(&selection, &dm, &settings) {
            Err(EngineError::TooManyCities { found, limit, .. }) => {
                assert_eq!(found, 6);
                assert_eq!(limit, 5);
            }
            other => panic!("Expected TooManyCities, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let selection = selection_of(8);
        let dm = DistanceMatrix::build(&selection, &GreatCircle).unwrap();

        let mut settings = seeded();
        settings.mutation_probability = Some(1.5);

        match optimize(&selection, &dm, &settings) {
            Err(EngineError::Config(_)) => {}
            other => panic!("Expected a config error, got {:?}", other),
        }

        let mut settings = seeded();
        settings.time_limit_secs = Some(1e30);
        assert!(optimize(&selection, &dm, &settings).is_err());

        let mut settings = seeded();
        settings.cooling_rate = Some(1.0);
        settings.algorithm = "simulated_annealing".to_string();

        match optimize(&selection, &dm, &settings) {
            Err(EngineError::InvalidParams(_)) => {}
            other => panic!("Expected InvalidParams, got {:?}", other),
        }
    }

    #[test]
    fn test_seeded_reports_repeat() {
        let selection = selection_of(9);
        let dm = DistanceMatrix::build(&selection, &Euclidean).unwrap();

        let a = optimize(&selection, &dm, &seeded()).unwrap();
        let b = optimize(&selection, &dm, &seeded()).unwrap();

        assert_eq!(a.route, b.route);
        assert_eq!(a.distance, b.distance);
    }

    #[test]
    fn test_display() {
        let report = RouteReport {
            algorithm: Algorithm::LocalSearch,
            route: vec![0, 2, 1, 0],
            stops: vec![],
            distance: 12.3456,
            duration: Some(930.0),
            elapsed: Duration::from_millis(3),
        };

        assert_eq!(
            report.to_string(),
            "Algorithm: Local Search\nRoute: City 1 → City 3 → City 2 → City 1\nTotal distance: 12.35 km\nEstimated time: 15.50 minutes"
        );
    }
}
