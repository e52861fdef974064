use crate::operators::distance_matrix::DistanceMatrix;

/// Straight-line distances between planar points.
pub fn euclidean(points: &[(f64, f64)]) -> DistanceMatrix {
    let rows = points
        .iter()
        .map(|a| {
            points
                .iter()
                .map(|b| {
                    let dx = a.0 - b.0;
                    let dy = a.1 - b.1;
                    (dx * dx + dy * dy).sqrt()
                })
                .collect()
        })
        .collect();

    match DistanceMatrix::from_rows(rows) {
        Ok(dm) => dm,
        Err(e) => panic!("Invalid test matrix: {}", e),
    }
}

/// Points on a rough circle, scrambled so the identity order is a poor tour.
pub fn scrambled_circle(num_cities: usize) -> Vec<(f64, f64)> {
    (0..num_cities)
        .map(|i| {
            let k = (i * 7) % num_cities;
            let angle = 2.0 * std::f64::consts::PI * k as f64 / num_cities as f64;
            (10.0 * angle.cos(), 10.0 * angle.sin())
        })
        .collect()
}
