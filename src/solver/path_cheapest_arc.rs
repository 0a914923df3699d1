use tracing::{debug, trace};

use crate::domain::types::DistanceMatrix;
use crate::evaluation::fitness::dist_between;

/// Greedy first solution: starting at the depot, repeatedly extend the path along the
/// cheapest arc to an unvisited location. Ties go to the lowest location index.
///
/// Returns the depot-first visiting order, or `None` if the depot is not in the matrix.
pub fn construct(dm: &DistanceMatrix, depot: usize) -> Option<Vec<usize>> {
    let n = dm.len();
    if depot >= n {
        return None;
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[depot] = true;
    order.push(depot);

    let mut current = depot;
    while order.len() < n {
        let (next, cost) = cheapest_arc_from(current, &visited, dm)?;
        trace!("extend {} -> {} (cost {})", current, next, cost);

        visited[next] = true;
        order.push(next);
        current = next;
    }

    debug!("Path cheapest arc order: {:?}", order);
    Some(order)
}

fn cheapest_arc_from(from: usize, visited: &[bool], dm: &DistanceMatrix) -> Option<(usize, u64)> {
    // `min_by_key` keeps the first minimum, which is the lowest index on ties.
    (0..dm.len())
        .filter(|&to| !visited[to])
        .map(|to| (to, dist_between(from, to, dm)))
        .min_by_key(|&(_, cost)| cost)
}
