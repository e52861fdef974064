use std::time::Duration;

use config::ConfigError;
use serde::{Deserialize, Serialize};

use crate::algorithms::{annealing::AnnealingParams, genetic::GeneticParams, Algorithm};
use crate::error::{EngineError, Result};
use crate::models::selection::DEFAULT_MAX_CITIES;

/**
 * Runtime settings, read from an optional `Config` file and then `APP_*` environment
 * variables (e.g. `APP_SEED=42`, `APP_ALGORITHM=genetic`).
 *
 * The genetic and annealing overrides replace the size-scaled defaults when present.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub seed: Option<u64>,
    pub algorithm: String,
    /// 0 disables the bound
    pub max_cities: usize,
    pub brute_force_limit: usize,
    pub time_limit_secs: Option<f64>,
    pub max_passes: usize,

    pub pop_size: Option<usize>,
    pub generations: Option<usize>,
    pub mutation_probability: Option<f64>,

    pub initial_temperature: Option<f64>,
    pub cooling_rate: Option<f64>,
    pub final_temperature: Option<f64>,

    pub threads: usize,
    pub instance: Option<String>,
    pub routing_table: Option<String>,
    pub results_folder: Option<String>,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            seed: None,
            algorithm: "auto".to_string(),
            max_cities: DEFAULT_MAX_CITIES,
            brute_force_limit: 10,
            time_limit_secs: None,
            max_passes: 10_000,
            pop_size: None,
            generations: None,
            mutation_probability: None,
            initial_temperature: None,
            cooling_rate: None,
            final_temperature: None,
            threads: num_cpus::get(),
            instance: None,
            routing_table: None,
            results_folder: None,
        }
    }
}

impl Settings {
    pub fn load(config_name: &str) -> Result<Settings> {
        let mut settings = config::Config::default();
        settings
            .merge(config::File::with_name(config_name).required(false))?
            .merge(config::Environment::with_prefix("APP"))?;

        let settings: Settings = settings.try_into()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.forced_algorithm()?;

        if let Some(pm) = self.mutation_probability {
            if !(0.0..=1.0).contains(&pm) {
                return Err(message(format!(
                    "mutation_probability must be between 0 and 1, got {}",
                    pm
                )));
            }
        }

        if let Some(limit) = self.time_limit_secs {
            if !limit.is_finite() || limit < 0.0 {
                return Err(message(format!("time_limit_secs must be positive, got {}", limit)));
            }
            self.time_limit()?;
        }

        if self.threads == 0 {
            return Err(message("threads must be at least 1".to_string()));
        }

        if self.max_passes == 0 {
            return Err(message("max_passes must be at least 1".to_string()));
        }

        // Only the overrides can make the schedule invalid, so any city count will do
        self.annealing_params(1).validate()
    }

    /// `None` when the algorithm should be picked from the number of cities.
    pub fn forced_algorithm(&self) -> Result<Option<Algorithm>> {
        if self.algorithm.trim().eq_ignore_ascii_case("auto") {
            return Ok(None);
        }

        self.algorithm.parse::<Algorithm>().map(Some).map_err(message)
    }

    pub fn max_cities(&self) -> Option<usize> {
        match self.max_cities {
            0 => None,
            max => Some(max),
        }
    }

    pub fn time_limit(&self) -> Result<Option<Duration>> {
        match self.time_limit_secs {
            Some(limit) => Duration::try_from_secs_f64(limit).map(Some).map_err(|_| {
                message(format!("time_limit_secs is out of range, got {}", limit))
            }),
            None => Ok(None),
        }
    }

    pub fn genetic_params(&self, num_cities: usize) -> GeneticParams {
        let mut params = GeneticParams::for_cities(num_cities);

        if let Some(pop_size) = self.pop_size {
            params.pop_size = pop_size;
        }
        if let Some(generations) = self.generations {
            params.generations = generations;
        }
        if let Some(pm) = self.mutation_probability {
            params.mutation_probability = pm;
        }

        params
    }

    pub fn annealing_params(&self, num_cities: usize) -> AnnealingParams {
        let mut params = AnnealingParams::for_cities(num_cities);

        if let Some(t0) = self.initial_temperature {
            params.initial_temperature = t0;
        }
        if let Some(rate) = self.cooling_rate {
            params.cooling_rate = rate;
        }
        if let Some(floor) = self.final_temperature {
            params.final_temperature = floor;
        }

        params
    }
}

fn message(reason: String) -> EngineError {
    EngineError::Config(ConfigError::Message(reason))
}
