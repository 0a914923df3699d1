use tracing::{debug, info, trace};

use super::haversine::arc_cost_meters;
use crate::domain::types::{Coordinate, DistanceMatrix};

/// Create the pairwise distance matrix (meters) for the given coordinates.
///
/// Diagonal entries are fixed at zero rather than computed, and only the upper
/// triangle is evaluated so the result is symmetric by construction.
pub fn build_distance_matrix(coords: &[Coordinate]) -> DistanceMatrix {
    let n = coords.len();
    info!("Creating haversine distance matrix for {} locations", n);

    let mut rows = vec![vec![0u64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let cost = arc_cost_meters(coords[i], coords[j]);
            trace!("arc {} <-> {} = {} m", i, j, cost);
            rows[i][j] = cost;
            rows[j][i] = cost;
        }
    }

    let dm = DistanceMatrix::from_trusted_rows(rows);
    print_dist_matrix(&dm);
    dm
}

// Print distance matrix for debugging
pub fn print_dist_matrix(dm: &DistanceMatrix) {
    debug!("Distance matrix:");
    for row in dm.rows() {
        debug!("{:?}", row);
    }
}
