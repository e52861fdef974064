use crate::models::city::CityId;
use crate::operators::distance_matrix::DistanceMatrix;
use crate::operators::solution::Solution;

pub trait Evaluation {
    /// Cost of visiting `tour` in order and returning to its first city.
    fn tour_cost(&self, tour: &[CityId]) -> f64;

    fn evaluate_ind(&self, solution: &mut Solution) -> f64 {
        let cost = self.tour_cost(&solution.point);
        solution.cost = Some(cost);
        cost
    }
}

#[derive(Clone, Copy)]
pub struct MatrixEval<'a> {
    distance_matrix: &'a DistanceMatrix,
}

impl<'a> MatrixEval<'a> {
    pub fn new(distance_matrix: &'a DistanceMatrix) -> MatrixEval<'a> {
        MatrixEval { distance_matrix }
    }

    /// Sums consecutive legs without closing the loop.
    pub fn path_cost(&self, route: &[CityId]) -> f64 {
        route
            .windows(2)
            .map(|leg| self.distance_matrix[(leg[0], leg[1])])
            .sum()
    }

    /// Total travel time of consecutive legs, if the matrix has timing data.
    pub fn path_duration(&self, route: &[CityId]) -> Option<f64> {
        route
            .windows(2)
            .map(|leg| self.distance_matrix.duration(leg[0], leg[1]))
            .sum()
    }
}

impl Evaluation for MatrixEval<'_> {
    fn tour_cost(&self, tour: &[CityId]) -> f64 {
        let (first, last) = match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return 0.0,
        };

        self.path_cost(tour) + self.distance_matrix[(last, first)]
    }
}
