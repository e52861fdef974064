use rand::prelude::*;

/// Seeded when a seed is given so runs can be replayed, otherwise drawn from the OS.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn shuffled<R: Rng + ?Sized>(num_items: usize, rng: &mut R) -> Vec<usize> {
    let mut items: Vec<usize> = (0..num_items).collect();
    items.shuffle(rng);
    items
}

/**
 * Two different indices in `0..len`.
 *
 * The second draw comes from one fewer slot and skips over the first, so there is no
 * rejection loop.
 */
pub fn distinct_pair<R: Rng + ?Sized>(len: usize, rng: &mut R) -> (usize, usize) {
    if len < 2 {
        panic!("Need at least two items to draw a distinct pair");
    }

    let a = rng.gen_range(0, len);
    let mut b = rng.gen_range(0, len - 1);
    if b >= a {
        b = b + 1;
    }

    (a, b)
}
