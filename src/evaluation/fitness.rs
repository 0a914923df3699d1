use itertools::Itertools;

use crate::domain::types::DistanceMatrix;

/// Closed-tour cost of a depot-first order: every consecutive arc plus the return to the depot.
pub fn route_distance(order: &[usize], dm: &DistanceMatrix) -> u64 {
    let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
        return 0;
    };

    let path: u64 = order
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| dist_between(from, to, dm))
        .sum();

    path + dist_between(last, first, dm)
}

#[inline]
pub fn dist_between(from_loc: usize, to_loc: usize, dm: &DistanceMatrix) -> u64 {
    dm.get(from_loc, to_loc)
}
