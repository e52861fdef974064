use std::path::Path;

use log::debug;

use crate::error::{EngineError, Result};
use crate::models::city::{City, CityId, Coordinate};

pub const DEFAULT_MAX_CITIES: usize = 10;

/**
 * Append-only set of selected cities.
 *
 * Cities are stored in insertion order and referenced by their position, so duplicate
 * coordinates never collide. Every mutation bumps the revision, which invalidates any
 * distance matrix built for an earlier revision.
 */
#[derive(Debug, Clone)]
pub struct Selection {
    cities: Vec<City>,
    max_cities: Option<usize>,
    revision: u64,
}

impl Selection {
    pub fn new(max_cities: Option<usize>) -> Selection {
        Selection {
            cities: Vec::new(),
            max_cities,
            revision: 0,
        }
    }

    pub fn from_coordinates(
        coordinates: impl IntoIterator<Item = Coordinate>,
        max_cities: Option<usize>,
    ) -> Result<Selection> {
        let mut selection = Selection::new(max_cities);
        for position in coordinates {
            selection.push(position)?;
        }

        Ok(selection)
    }

    /// Reads one `lat,lng` pair per line. Blank lines and `#` comments are skipped.
    pub fn load(path: impl AsRef<Path>, max_cities: Option<usize>) -> Result<Selection> {
        let contents = std::fs::read_to_string(path)?;
        Selection::from_coordinates(parse_instance(&contents)?, max_cities)
    }

    pub fn push(&mut self, position: Coordinate) -> Result<CityId> {
        if let Some(max) = self.max_cities {
            if self.cities.len() >= max {
                return Err(EngineError::SelectionFull { max });
            }
        }

        let id = self.cities.len();
        self.cities.push(City { id, position });
        self.revision = self.revision + 1;

        debug!("Added city {} at {}", id + 1, position);

        Ok(id)
    }

    pub fn clear(&mut self) {
        self.cities.clear();
        self.revision = self.revision + 1;
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn get(&self, id: CityId) -> Option<&City> {
        self.cities.get(id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

pub fn parse_instance(contents: &str) -> Result<Vec<Coordinate>> {
    let mut coordinates = Vec::new();

    for (i, line) in contents.lines().enumerate() {
        let line = match line.split('#').next() {
            Some(l) => l.trim(),
            None => continue,
        };

        if line.is_empty() {
            continue;
        }

        let invalid = |reason: &str| EngineError::InvalidInstance {
            line: i + 1,
            reason: reason.to_string(),
        };

        let mut parts = line.split(',').map(str::trim);
        let lat = parts.next().ok_or_else(|| invalid("missing latitude"))?;
        let lng = parts.next().ok_or_else(|| invalid("missing longitude"))?;
        if parts.next().is_some() {
            return Err(invalid("expected exactly two fields"));
        }

        let lat: f64 = lat.parse().map_err(|_| invalid("latitude is not a number"))?;
        let lng: f64 = lng.parse().map_err(|_| invalid("longitude is not a number"))?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid("coordinate out of range"));
        }

        coordinates.push(Coordinate::new(lat, lng));
    }

    Ok(coordinates)
}
