use tracing::debug;

use crate::domain::types::{Assignment, DistanceMatrix, Route};
use crate::evaluation::fitness::route_distance;

/// Walk the solver's successor links from the start to the end marker and return the
/// open, depot-first visiting order.
pub fn extract_route(assignment: &Assignment, dm: &DistanceMatrix) -> Route {
    let mut index = assignment.start();
    let mut order = Vec::new();

    while !assignment.is_end(index) {
        order.push(assignment.index_to_node(index));
        index = assignment.next(index);
    }
    // The end marker maps back to the depot, closing the cycle.
    order.push(assignment.index_to_node(index));
    debug!("Closed tour: {:?}", order);

    if order.len() > 1 && order.first() == order.last() {
        order.pop();
    }

    let distance = route_distance(&order, dm);
    Route { order, distance }
}
