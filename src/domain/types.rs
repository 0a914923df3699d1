use serde::Deserialize;

use crate::config::constant::{DEPOT, NUM_VEHICLES};
use crate::domain::error::RouteError;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// A named collection point. The first location of a run is the depot.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Square, symmetric matrix of integer arc costs (meters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<u64>>,
}

impl DistanceMatrix {
    /// Wraps rows produced by the haversine builder, which are square and symmetric by construction.
    pub(crate) fn from_trusted_rows(rows: Vec<Vec<u64>>) -> Self {
        Self { rows }
    }

    /// Validates and wraps externally supplied rows.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, RouteError> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(RouteError::InvalidMatrix(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row[i] != 0 {
                return Err(RouteError::InvalidMatrix(format!(
                    "diagonal entry ({}, {}) is {}",
                    i, i, row[i]
                )));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if rows[i][j] != rows[j][i] {
                    return Err(RouteError::InvalidMatrix(format!(
                        "entries ({}, {}) and ({}, {}) differ",
                        i, j, j, i
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.rows[from][to]
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }
}

/// Single vehicle, single depot problem over a distance matrix.
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    pub matrix: DistanceMatrix,
    pub depot: usize,
    pub num_vehicles: usize,
}

impl RoutingProblem {
    pub fn new(matrix: DistanceMatrix) -> Self {
        Self {
            matrix,
            depot: DEPOT,
            num_vehicles: NUM_VEHICLES,
        }
    }

    pub fn num_locations(&self) -> usize {
        self.matrix.len()
    }
}

/// Successor links produced by the solver.
///
/// Indices `0..n` are locations, index `n` is the vehicle end marker which stands
/// for the return to the depot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    depot: usize,
    next: Vec<usize>,
}

impl Assignment {
    /// Links a visiting order (depot first, no trailing depot) into successor form.
    pub fn from_order(order: &[usize], num_locations: usize, depot: usize) -> Self {
        let end = num_locations;
        let mut next = vec![end; num_locations + 1];
        for pair in order.windows(2) {
            next[pair[0]] = pair[1];
        }
        if let Some(&last) = order.last() {
            next[last] = end;
        }
        Self { depot, next }
    }

    pub fn start(&self) -> usize {
        self.depot
    }

    pub fn end(&self) -> usize {
        self.next.len() - 1
    }

    pub fn is_end(&self, index: usize) -> bool {
        index == self.end()
    }

    pub fn next(&self, index: usize) -> usize {
        self.next[index]
    }

    pub fn index_to_node(&self, index: usize) -> usize {
        if self.is_end(index) {
            self.depot
        } else {
            index
        }
    }
}

/// Depot-first visiting order, each location exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub order: Vec<usize>,
    /// Closed tour cost, including the return arc to the depot.
    pub distance: u64,
}

/// One entry of the ordered stop list handed to a presenter.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub position: usize,
    pub name: String,
    pub coordinate: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_bad_shapes() {
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0, 1], vec![1]]),
            Err(RouteError::InvalidMatrix(_))
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![3, 1], vec![1, 0]]),
            Err(RouteError::InvalidMatrix(_))
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0, 1], vec![2, 0]]),
            Err(RouteError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn assignment_links_order_to_end_marker() {
        let assignment = Assignment::from_order(&[0, 2, 1], 3, 0);
        assert_eq!(assignment.start(), 0);
        assert_eq!(assignment.next(0), 2);
        assert_eq!(assignment.next(2), 1);
        assert!(assignment.is_end(assignment.next(1)));
        assert_eq!(assignment.index_to_node(assignment.end()), 0);
    }
}
