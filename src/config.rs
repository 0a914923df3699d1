use std::env;

use chrono::NaiveTime;
use dotenv::dotenv;
use tracing::{debug, info};

use crate::domain::error::RouteError;
use crate::solver::{Improvement, SearchParameters};

pub mod constant {
    pub(crate) const EARTH_RADIUS_KM: f64 = 6371.0;
    pub(crate) const DEPOT: usize = 0;
    pub(crate) const NUM_VEHICLES: usize = 1;
    pub const MIN_LOCATIONS: usize = 3;
    // Central Hyderabad, used for names the gazetteer does not know.
    pub(crate) const FALLBACK_COORDINATE: (f64, f64) = (17.3700, 78.5400);
    pub(crate) const START_TIME: (u32, u32) = (1, 0);
    pub(crate) const STOP_INTERVAL_MINUTES: i64 = 30;
    pub(crate) const MINUTES_PER_DAY: i64 = 24 * 60;
}

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub search: SearchParameters,
    pub gazetteer_path: Option<String>,
    pub csv_path: Option<String>,
    pub start_time: NaiveTime,
    pub stop_interval_minutes: i64,
}

impl Default for Settings {
    fn default() -> Self {
        let (hour, minute) = constant::START_TIME;
        Self {
            search: SearchParameters::default(),
            gazetteer_path: None,
            csv_path: None,
            start_time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default(),
            stop_interval_minutes: constant::STOP_INTERVAL_MINUTES,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, RouteError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RouteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(value) = lookup("ROUTE_IMPROVEMENT") {
            settings.search.improvement = parse_improvement(&value)?;
        }

        settings.gazetteer_path = lookup("ROUTE_GAZETTEER_PATH").filter(|p| !p.trim().is_empty());
        settings.csv_path = lookup("ROUTE_CSV_PATH").filter(|p| !p.trim().is_empty());

        if let Some(value) = lookup("ROUTE_START_TIME") {
            settings.start_time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
                .map_err(|e| RouteError::Config(format!("ROUTE_START_TIME '{}': {}", value, e)))?;
        }

        if let Some(value) = lookup("ROUTE_STOP_INTERVAL_MINUTES") {
            settings.stop_interval_minutes = value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|minutes| (1..=constant::MINUTES_PER_DAY).contains(minutes))
                .ok_or_else(|| {
                    RouteError::Config(format!(
                        "ROUTE_STOP_INTERVAL_MINUTES must be between 1 and {}, got '{}'",
                        constant::MINUTES_PER_DAY,
                        value
                    ))
                })?;
        }

        debug!("Loaded settings: {:?}", settings);
        info!(
            "Improvement phase: {:?}, start time {}",
            settings.search.improvement,
            settings.start_time.format("%H:%M")
        );
        Ok(settings)
    }
}

fn parse_improvement(value: &str) -> Result<Improvement, RouteError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "none" => Ok(Improvement::None),
        "two_opt" | "2opt" | "2-opt" => Ok(Improvement::TwoOpt),
        other => Err(RouteError::Config(format!(
            "Unknown ROUTE_IMPROVEMENT '{}', expected 'none' or 'two_opt'",
            other
        ))),
    }
}
