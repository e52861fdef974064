use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use crate::error::{EngineError, Result};
use crate::models::city::CityId;

/// An open tour over city ids, plus its cost once evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub point: Vec<CityId>,
    pub cost: Option<f64>,
}

impl Solution {
    pub fn new(point: Vec<CityId>) -> Solution {
        Solution { point, cost: None }
    }

    pub fn identity(num_cities: usize) -> Solution {
        Solution::new((0..num_cities).collect())
    }

    pub fn len(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.point.swap(a, b);
        self.cost = None;
    }

    /// Panics if the solution hasn't been evaluated.
    pub fn cost(&self) -> f64 {
        match self.cost {
            Some(cost) => cost,
            None => panic!("Attempted to read the cost of an unevaluated solution."),
        }
    }

    pub fn is_permutation(&self, num_cities: usize) -> bool {
        is_permutation(&self.point, num_cities)
    }

    /// The tour as a cycle: first city repeated at the end.
    pub fn closed(&self) -> Vec<CityId> {
        let mut route = self.point.clone();
        if let Some(&first) = self.point.first() {
            route.push(first);
        }

        route
    }
}

impl Index<usize> for Solution {
    type Output = CityId;

    fn index(&self, i: usize) -> &Self::Output {
        &self.point[i]
    }
}

impl IndexMut<usize> for Solution {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.cost = None;
        &mut self.point[index]
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, city) in self.point.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", city)?;
        }

        Ok(())
    }
}

pub fn is_permutation(point: &[CityId], num_cities: usize) -> bool {
    if point.len() != num_cities {
        return false;
    }

    let mut seen = vec![false; num_cities];
    for &city in point {
        if city >= num_cities || seen[city] {
            return false;
        }
        seen[city] = true;
    }

    true
}

/// Checks `route` visits every city exactly once and returns to where it started.
pub fn check_closed_route(route: &[CityId], num_cities: usize) -> Result<()> {
    let valid = match (route.first(), route.last()) {
        (Some(first), Some(last)) => {
            first == last && is_permutation(&route[..route.len() - 1], num_cities)
        }
        _ => false,
    };

    if !valid {
        return Err(EngineError::InvariantViolation(format!(
            "route {:?} is not a closed tour over {} cities",
            route, num_cities
        )));
    }

    Ok(())
}
