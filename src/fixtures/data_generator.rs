use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::types::{Coordinate, Location};

/// Generates `count` reproducible locations scattered within `spread` degrees of `center`.
pub fn generate_random_locations(
    count: usize,
    center: Coordinate,
    spread: f64,
    seed: u64,
) -> Vec<Location> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|ind| Location {
            name: format!("Area {}", ind),
            coordinate: Coordinate::new(
                center.lat + rng.gen_range(-spread..spread),
                center.lon + rng.gen_range(-spread..spread),
            ),
        })
        .collect()
}

/// Coordinates only, in the same order.
pub fn generate_random_coords(count: usize, center: Coordinate, spread: f64, seed: u64) -> Vec<Coordinate> {
    generate_random_locations(count, center, spread, seed)
        .into_iter()
        .map(|loc| loc.coordinate)
        .collect()
}
