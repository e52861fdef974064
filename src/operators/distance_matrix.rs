use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::ops::Index;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::city::{City, CityId};
use crate::models::selection::Selection;

/// Cost of travelling between two cities. Distance in km, duration in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub distance: f64,
    pub duration: Option<f64>,
}

pub trait DistanceSource {
    fn measure(&self, from: &City, to: &City) -> Result<Leg>;
}

/*** Great circle ***/
#[derive(Clone, Copy, Debug, Default)]
pub struct GreatCircle;

impl DistanceSource for GreatCircle {
    fn measure(&self, from: &City, to: &City) -> Result<Leg> {
        Ok(Leg {
            distance: from.position.haversine_km(&to.position),
            duration: None,
        })
    }
}

/*** Routing table ***/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LegRecord {
    pub from: CityId,
    pub to: CityId,
    pub distance: f64,
    pub duration: Option<f64>,
}

/**
 * Road legs fetched ahead of time from a routing service.
 *
 * Only one direction of each pair needs to be present, lookups fall back to the
 * reverse direction. A pair missing in both directions makes the matrix unavailable,
 * no default distance is ever substituted.
 */
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    legs: HashMap<(CityId, CityId), Leg>,
}

impl RoutingTable {
    pub fn new(records: impl IntoIterator<Item = LegRecord>) -> RoutingTable {
        let legs = records
            .into_iter()
            .map(|r| {
                (
                    (r.from, r.to),
                    Leg {
                        distance: r.distance,
                        duration: r.duration,
                    },
                )
            })
            .collect();

        RoutingTable { legs }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<RoutingTable> {
        let reader = BufReader::new(File::open(path)?);
        let records: Vec<LegRecord> = bincode::deserialize_from(reader)?;

        info!("Loaded {} legs from routing table", records.len());

        Ok(RoutingTable::new(records))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut records: Vec<LegRecord> = self
            .legs
            .iter()
            .map(|(&(from, to), leg)| LegRecord {
                from,
                to,
                distance: leg.distance,
                duration: leg.duration,
            })
            .collect();
        records.sort_by_key(|r| (r.from, r.to));

        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, &records)?;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }
}

impl DistanceSource for RoutingTable {
    fn measure(&self, from: &City, to: &City) -> Result<Leg> {
        self.legs
            .get(&(from.id, to.id))
            .or_else(|| self.legs.get(&(to.id, from.id)))
            .copied()
            .ok_or_else(|| EngineError::missing_leg(from.id, to.id))
    }
}

/*** Distance matrix ***/
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    distances: Vec<Vec<f64>>,
    durations: Option<Vec<Vec<f64>>>,
    revision: Option<u64>,
}

impl DistanceMatrix {
    /// Measures every unordered pair once and mirrors it.
    pub fn build(selection: &Selection, source: &impl DistanceSource) -> Result<DistanceMatrix> {
        let cities = selection.cities();
        let n = cities.len();

        let mut distances = vec![vec![0.0; n]; n];
        let mut durations = vec![vec![0.0; n]; n];
        let mut timed = true;

        for i in 0..n {
            for j in (i + 1)..n {
                let leg = source.measure(&cities[i], &cities[j])?;
                check_cost(leg.distance, i, j)?;

                distances[i][j] = leg.distance;
                distances[j][i] = leg.distance;

                match leg.duration {
                    Some(duration) => {
                        check_cost(duration, i, j)?;
                        durations[i][j] = duration;
                        durations[j][i] = duration;
                    }
                    None => timed = false,
                }
            }
        }

        debug!("Built {}x{} distance matrix", n, n);

        Ok(DistanceMatrix {
            distances,
            durations: if timed { Some(durations) } else { None },
            revision: Some(selection.revision()),
        })
    }

    /// A matrix that isn't tied to a selection, checked for symmetry and a zero diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<DistanceMatrix> {
        let n = rows.len();

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(EngineError::InvalidMatrix(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            if row[i] != 0.0 {
                return Err(EngineError::InvalidMatrix(format!(
                    "diagonal entry {} is {}",
                    i, row[i]
                )));
            }

            for j in 0..n {
                check_cost(row[j], i, j)?;

                if row[j] != rows[j][i] {
                    return Err(EngineError::InvalidMatrix(format!(
                        "d({}, {}) = {} but d({}, {}) = {}",
                        i, j, row[j], j, i, rows[j][i]
                    )));
                }
            }
        }

        Ok(DistanceMatrix {
            distances: rows,
            durations: None,
            revision: None,
        })
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn distance(&self, from: CityId, to: CityId) -> f64 {
        self.distances[from][to]
    }

    pub fn duration(&self, from: CityId, to: CityId) -> Option<f64> {
        self.durations.as_ref().map(|d| d[from][to])
    }

    pub fn has_durations(&self) -> bool {
        self.durations.is_some()
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Checks the matrix covers exactly the current state of the selection.
    pub fn ensure_current(&self, selection: &Selection) -> Result<()> {
        if self.len() != selection.len() {
            return Err(EngineError::MatrixUnavailable(format!(
                "matrix covers {} cities but {} are selected",
                self.len(),
                selection.len()
            )));
        }

        match self.revision {
            Some(revision) if revision != selection.revision() => {
                Err(EngineError::MatrixUnavailable(
                    "the selection changed after the matrix was built".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl Index<(CityId, CityId)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (from, to): (CityId, CityId)) -> &Self::Output {
        &self.distances[from][to]
    }
}

fn check_cost(cost: f64, i: usize, j: usize) -> Result<()> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(EngineError::InvalidMatrix(format!(
            "cost between {} and {} is {}",
            i, j, cost
        )));
    }

    Ok(())
}
