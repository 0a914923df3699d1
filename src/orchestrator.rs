use std::error::Error;
use std::io::{self, BufRead, Write};

use tracing::{debug, error, info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::MIN_LOCATIONS;
use crate::config::Settings;
use crate::distance::build_distance_matrix;
use crate::domain::error::RouteError;
use crate::domain::types::{Coordinate, Location, Route, RoutingProblem, Stop};
use crate::geocoder::{parse_location_names, resolve_locations, Gazetteer, Geocoder};
use crate::presenter::{ConsolePresenter, CsvFilePresenter, Presenter, Schedule};
use crate::solver::{extract_route, solve, SearchParameters};

/// Outcome of one planning run.
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    pub route: Route,
    pub stops: Vec<Stop>,
}

/// Initialize tracing and environment
fn init_tracing_and_env() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE),
        )
        .init();
}

/// Distances, solve, extract. Stops are returned in visiting order, depot first.
pub fn plan_route(
    locations: &[Location],
    params: &SearchParameters,
) -> Result<PlannedRoute, RouteError> {
    if locations.len() < MIN_LOCATIONS {
        return Err(RouteError::InsufficientLocations {
            found: locations.len(),
            required: MIN_LOCATIONS,
        });
    }

    let coords: Vec<Coordinate> = locations.iter().map(|loc| loc.coordinate).collect();
    let matrix = {
        let span = span!(Level::INFO, "distance_matrix");
        let _g = span.enter();
        build_distance_matrix(&coords)
    };

    let problem = RoutingProblem::new(matrix);
    let assignment = solve(&problem, params)?;
    let route = extract_route(&assignment, &problem.matrix);
    debug!("Route order: {:?}", route.order);

    let stops = route
        .order
        .iter()
        .enumerate()
        .map(|(position, &ind)| Stop {
            position,
            name: locations[ind].name.clone(),
            coordinate: locations[ind].coordinate,
        })
        .collect();

    info!(
        "Planned route over {} locations, total distance {} m",
        locations.len(),
        route.distance
    );
    Ok(PlannedRoute { route, stops })
}

/// Parse, geocode, plan and hand the stops to every presenter.
///
/// Presenters are only invoked once a route exists.
pub fn run_with(
    input: &str,
    geocoder: &impl Geocoder,
    presenters: &mut [&mut dyn Presenter],
    params: &SearchParameters,
) -> Result<PlannedRoute, RouteError> {
    let names = parse_location_names(input);
    let locations = resolve_locations(&names, geocoder)?;

    let planned = match plan_route(&locations, params) {
        Ok(planned) => planned,
        Err(e) => {
            error!("Route planning failed: {}", e);
            return Err(e);
        }
    };

    for presenter in presenters.iter_mut() {
        presenter.present(&planned.stops)?;
    }
    Ok(planned)
}

/// Ask until at least `MIN_LOCATIONS` distinct names are given.
fn prompt_for_locations(input: impl BufRead, out: &mut impl Write) -> Result<String, RouteError> {
    let mut lines = input.lines();
    let mut found = 0;

    loop {
        write!(out, "Enter at least {} waste collection areas (comma-separated): ", MIN_LOCATIONS)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Err(RouteError::InsufficientLocations {
                found,
                required: MIN_LOCATIONS,
            });
        };
        let line = line?;

        found = parse_location_names(&line).len();
        if found >= MIN_LOCATIONS {
            return Ok(line);
        }
        warn!("Only {} distinct locations entered", found);
        writeln!(out, "Please enter at least {} locations!", MIN_LOCATIONS)?;
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();
    let settings = Settings::from_env()?;

    let gazetteer = match &settings.gazetteer_path {
        Some(path) => Gazetteer::from_json_file(path)?,
        None => Gazetteer::default(),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = if args.is_empty() {
        prompt_for_locations(io::stdin().lock(), &mut io::stdout())?
    } else {
        args.join(",")
    };

    let schedule = Schedule::from_settings(&settings);
    let mut console = ConsolePresenter::new(schedule);
    let mut csv = settings
        .csv_path
        .as_ref()
        .map(|path| CsvFilePresenter::new(path, schedule));

    let mut presenters: Vec<&mut dyn Presenter> = Vec::new();
    presenters.push(&mut console);
    if let Some(csv) = csv.as_mut() {
        presenters.push(csv);
    }

    let run_span = span!(Level::INFO, "route_run");
    let _guard = run_span.enter();

    let planned = run_with(&input, &gazetteer, &mut presenters, &settings.search)?;
    println!("Total distance: {:.2} km", planned.route.distance as f64 / 1000.0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str, lat: f64, lon: f64) -> Location {
        Location {
            name: name.to_string(),
            coordinate: Coordinate::new(lat, lon),
        }
    }

    struct Recorder {
        seen: Vec<Vec<String>>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, stops: &[Stop]) -> Result<(), RouteError> {
            self.seen.push(stops.iter().map(|s| s.name.clone()).collect());
            Ok(())
        }
    }

    #[test]
    fn plans_three_area_route() {
        let locations = vec![
            location("Amberpet", 17.3665, 78.5626),
            location("LB Nagar", 17.3683, 78.5243),
            location("Anmagal Hayathnagar", 17.3753, 78.5481),
        ];
        let planned = plan_route(&locations, &SearchParameters::default()).unwrap();

        assert_eq!(planned.route.order, vec![0, 2, 1]);
        assert_eq!(planned.route.distance, 1823 + 2642 + 4069);
        assert_eq!(planned.stops[0].name, "Amberpet");
        assert_eq!(planned.stops[1].name, "Anmagal Hayathnagar");
        assert_eq!(planned.stops[2].position, 2);
    }

    #[test]
    fn rejects_fewer_than_three_locations() {
        let locations = vec![location("A", 0.0, 0.0), location("B", 0.0, 1.0)];
        assert!(matches!(
            plan_route(&locations, &SearchParameters::default()),
            Err(RouteError::InsufficientLocations { found: 2, .. })
        ));
    }

    #[test]
    fn presenter_receives_route_order() {
        let mut recorder = Recorder { seen: vec![] };
        let mut presenters: [&mut dyn Presenter; 1] = [&mut recorder];
        let planned = run_with(
            "Amberpet, LB Nagar, Anmagal Hayathnagar",
            &Gazetteer::default(),
            &mut presenters,
            &SearchParameters::default(),
        )
        .unwrap();

        assert_eq!(planned.stops.len(), 3);
        assert_eq!(
            recorder.seen,
            vec![vec!["Amberpet", "Anmagal Hayathnagar", "LB Nagar"]]
        );
    }

    #[test]
    fn presenter_untouched_on_failure() {
        let mut recorder = Recorder { seen: vec![] };
        let mut presenters: [&mut dyn Presenter; 1] = [&mut recorder];
        let result = run_with(
            "Amberpet, LB Nagar",
            &Gazetteer::default(),
            &mut presenters,
            &SearchParameters::default(),
        );

        assert!(result.is_err());
        assert!(recorder.seen.is_empty());
    }

    #[test]
    fn prompt_asks_again_until_enough_names() {
        let input = io::Cursor::new("Amberpet\nAmberpet, LB Nagar, Madhapur\n");
        let mut out = Vec::new();

        let line = prompt_for_locations(input, &mut out).unwrap();
        assert_eq!(line, "Amberpet, LB Nagar, Madhapur");
        let shown = String::from_utf8(out).unwrap();
        assert_eq!(shown.matches("Enter at least 3").count(), 2);
        assert!(shown.contains("Please enter at least 3 locations!"));
    }

    #[test]
    fn prompt_reports_last_count_at_end_of_input() {
        let input = io::Cursor::new("Amberpet, LB Nagar\n");
        let err = prompt_for_locations(input, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(
            err,
            RouteError::InsufficientLocations {
                found: 2,
                required: 3
            }
        ));

        let err = prompt_for_locations(io::Cursor::new(""), &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, RouteError::InsufficientLocations { found: 0, .. }));
    }

    #[test]
    fn failed_run_keeps_existing_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.csv");
        std::fs::write(&path, "previous route\n").unwrap();

        let mut console = ConsolePresenter::new(Schedule::default());
        let mut csv = CsvFilePresenter::new(&path, Schedule::default());
        let mut presenters: [&mut dyn Presenter; 2] = [&mut console, &mut csv];
        let result = run_with(
            "Amberpet, LB Nagar",
            &Gazetteer::default(),
            &mut presenters,
            &SearchParameters::default(),
        );

        assert!(matches!(
            result,
            Err(RouteError::InsufficientLocations { found: 2, .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous route\n");
    }

    #[test]
    fn successful_run_replaces_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.csv");
        std::fs::write(&path, "previous route\n").unwrap();

        let mut csv = CsvFilePresenter::new(&path, Schedule::default());
        let mut presenters: [&mut dyn Presenter; 1] = [&mut csv];
        run_with(
            "Amberpet, LB Nagar, Anmagal Hayathnagar",
            &Gazetteer::default(),
            &mut presenters,
            &SearchParameters::default(),
        )
        .unwrap();

        let output = std::fs::read_to_string(&path).unwrap();
        let names: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(names, vec!["Amberpet", "Anmagal Hayathnagar", "LB Nagar"]);
    }
}
