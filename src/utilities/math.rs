pub fn round_to(num: f64, num_dp: usize) -> f64 {
    let mult = 10.0_f64.powi(num_dp as i32);
    (num * mult).round() / mult
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_round_to() {
        let km = 271.838_49;

        assert_eq!(round_to(km, 0), 272.0);
        assert_eq!(round_to(km, 1), 271.8);
        assert_eq!(round_to(km, 2), 271.84);
        assert_eq!(round_to(km, 3), 271.838);
        assert_eq!(round_to(0.004, 2), 0.0);
    }
}
