use rand::prelude::*;

use crate::error::{EngineError, Result};
use crate::operators::solution::{is_permutation, Solution};

pub trait Crossover {
    fn apply<R: Rng + ?Sized>(
        &self,
        parent_one: &Solution,
        parent_two: &Solution,
        rng: &mut R,
    ) -> Result<Vec<Solution>>;
}

/**
 * Order crossover (OX)
 *
 * Each child keeps a contiguous segment of one parent in place. The remaining slots are
 * filled, left to right, with the other parent's cities in the order they appear there,
 * skipping any city the segment already holds.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderCrossover;

impl OrderCrossover {
    pub fn new() -> OrderCrossover {
        OrderCrossover
    }
}

impl Crossover for OrderCrossover {
    fn apply<R: Rng + ?Sized>(
        &self,
        parent_one: &Solution,
        parent_two: &Solution,
        rng: &mut R,
    ) -> Result<Vec<Solution>> {
        let length = parent_one.len();

        if parent_two.len() != length {
            return Err(EngineError::InvariantViolation(format!(
                "crossover parents differ in length: {} and {}",
                length,
                parent_two.len()
            )));
        }

        if length == 0 {
            return Ok(vec![parent_one.clone(), parent_two.clone()]);
        }

        let start = rng.gen_range(0, length);
        let end = rng.gen_range(0, length);
        let (min, max) = (start.min(end), start.max(end));

        let child_a = order_fill(parent_one, parent_two, min, max)?;
        let child_b = order_fill(parent_two, parent_one, min, max)?;

        Ok(vec![child_a, child_b])
    }
}

fn order_fill(segment_from: &Solution, fill_from: &Solution, min: usize, max: usize) -> Result<Solution> {
    let length = segment_from.len();

    let mut child: Vec<Option<usize>> = vec![None; length];
    let mut placed = vec![false; length];

    for i in min..=max {
        let city = segment_from[i];
        if city >= length || placed[city] {
            return Err(malformed(&segment_from.point));
        }

        child[i] = Some(city);
        placed[city] = true;
    }

    let mut slots = (0..length).filter(|&i| i < min || i > max);

    for &city in &fill_from.point {
        if city >= length || placed[city] {
            continue;
        }

        match slots.next() {
            Some(slot) => {
                child[slot] = Some(city);
                placed[city] = true;
            }
            None => return Err(malformed(&fill_from.point)),
        }
    }

    let point: Option<Vec<usize>> = child.into_iter().collect();
    match point {
        Some(point) if is_permutation(&point, length) => Ok(Solution::new(point)),
        _ => Err(malformed(&fill_from.point)),
    }
}

fn malformed(parent: &[usize]) -> EngineError {
    EngineError::InvariantViolation(format!(
        "order crossover produced an incomplete tour from parent {:?}",
        parent
    ))
}
