use tracing::{debug, info};

use crate::domain::types::DistanceMatrix;
use crate::evaluation::fitness::dist_between;

/// Best-improvement 2-opt over the closed tour. Position 0 (the depot) never moves.
///
/// Applies the most improving segment reversal until none is left and returns the
/// number of moves made. Among equally good moves the lowest `(i, j)` wins.
pub fn improve(order: &mut [usize], dm: &DistanceMatrix) -> usize {
    let mut moves = 0;

    while let Some((delta, (i, j))) = find_best_move(order, dm) {
        debug!("2-opt move ({}, {}) saves {}", i, j, -delta);
        order[i..=j].reverse();
        moves += 1;
    }

    info!("2-opt finished after {} moves", moves);
    moves
}

/// Most improving reversal of `order[i..=j]`, if any reduces the tour cost.
fn find_best_move(order: &[usize], dm: &DistanceMatrix) -> Option<(i64, (usize, usize))> {
    let n = order.len();
    let mut best: Option<(i64, (usize, usize))> = None;

    for i in 1..n.saturating_sub(1) {
        for j in (i + 1)..n {
            let delta = reversal_delta(order, i, j, dm);
            if delta < 0 && best.map_or(true, |(best_delta, _)| delta < best_delta) {
                best = Some((delta, (i, j)));
            }
        }
    }

    best
}

fn reversal_delta(order: &[usize], i: usize, j: usize, dm: &DistanceMatrix) -> i64 {
    let before = order[i - 1];
    let first = order[i];
    let last = order[j];
    let after = order[(j + 1) % order.len()];

    let added = dist_between(before, last, dm) + dist_between(first, after, dm);
    let removed = dist_between(before, first, dm) + dist_between(last, after, dm);

    added as i64 - removed as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::fitness::route_distance;

    fn crossing() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0, 12, 2, 4, 2],
            vec![12, 0, 10, 8, 14],
            vec![2, 10, 0, 2, 4],
            vec![4, 8, 2, 0, 6],
            vec![2, 14, 4, 6, 0],
        ])
        .unwrap()
    }

    #[test]
    fn uncrosses_greedy_tour() {
        let dm = crossing();
        let mut order = vec![0, 2, 3, 4, 1];
        assert_eq!(route_distance(&order, &dm), 36);

        assert!(improve(&mut order, &dm) > 0);
        assert_eq!(order, vec![0, 2, 3, 1, 4]);
        assert_eq!(route_distance(&order, &dm), 28);
    }

    #[test]
    fn leaves_optimal_tour_alone() {
        let dm = crossing();
        let mut order = vec![0, 2, 3, 1, 4];
        assert_eq!(improve(&mut order, &dm), 0);
        assert_eq!(order, vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn short_tours_have_no_moves() {
        let dm = DistanceMatrix::from_rows(vec![vec![0, 3], vec![3, 0]]).unwrap();
        let mut order = vec![0, 1];
        assert_eq!(improve(&mut order, &dm), 0);
    }
}
