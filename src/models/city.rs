use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub type CityId = usize;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    /// Great-circle distance in kilometres.
    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let s1 = (dlat / 2.0).sin();
        let s2 = (dlng / 2.0).sin();
        let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;

        // Rounding can push h slightly past 1 for antipodal points
        2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// A selected point. Two cities may share a position, the id is what tells them apart.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct City {
    pub id: CityId,
    pub position: Coordinate,
}
