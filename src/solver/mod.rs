pub mod extract;
pub mod path_cheapest_arc;
pub mod two_opt;

use tracing::{error, info, span, warn, Level};

use crate::domain::error::RouteError;
use crate::domain::types::{Assignment, RoutingProblem};
use crate::evaluation::fitness::route_distance;

pub use extract::extract_route;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstSolutionStrategy {
    #[default]
    PathCheapestArc,
}

/// Optional phase run after the first solution is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Improvement {
    #[default]
    None,
    TwoOpt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchParameters {
    pub first_solution_strategy: FirstSolutionStrategy,
    pub improvement: Improvement,
}

/// Solve a single vehicle routing problem.
///
/// Problems with fewer than two locations, a depot outside the matrix or a vehicle
/// count other than one have no solution.
pub fn solve(problem: &RoutingProblem, params: &SearchParameters) -> Result<Assignment, RouteError> {
    let solve_span = span!(Level::INFO, "solve", locations = problem.num_locations());
    let _guard = solve_span.enter();

    let n = problem.num_locations();
    if problem.num_vehicles != 1 {
        error!("Unsupported vehicle count: {}", problem.num_vehicles);
        return Err(RouteError::NoSolutionFound);
    }
    if n < 2 {
        warn!("Degenerate problem with {} locations, nothing to route", n);
        return Err(RouteError::NoSolutionFound);
    }

    let mut order = match params.first_solution_strategy {
        FirstSolutionStrategy::PathCheapestArc => {
            path_cheapest_arc::construct(&problem.matrix, problem.depot)
        }
    }
    .ok_or_else(|| {
        error!("Depot {} is outside the {}x{} matrix", problem.depot, n, n);
        RouteError::NoSolutionFound
    })?;

    info!(
        "First solution distance: {}",
        route_distance(&order, &problem.matrix)
    );

    if params.improvement == Improvement::TwoOpt {
        two_opt::improve(&mut order, &problem.matrix);
        info!(
            "Improved solution distance: {}",
            route_distance(&order, &problem.matrix)
        );
    }

    Ok(Assignment::from_order(&order, n, problem.depot))
}
