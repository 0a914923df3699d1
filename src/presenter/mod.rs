use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveTime};
use colored::*;
use csv::Writer;
use tracing::info;

use crate::config::constant::MINUTES_PER_DAY;
use crate::config::Settings;
use crate::domain::error::RouteError;
use crate::domain::types::Stop;

/// Consumes the final ordered stop list, depot first.
pub trait Presenter {
    fn present(&mut self, stops: &[Stop]) -> Result<(), RouteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRole {
    Start,
    Intermediate,
    Finish,
}

impl StopRole {
    pub fn of(position: usize, total: usize) -> Self {
        if position == 0 {
            StopRole::Start
        } else if position + 1 == total {
            StopRole::Finish
        } else {
            StopRole::Intermediate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StopRole::Start => "start",
            StopRole::Intermediate => "intermediate",
            StopRole::Finish => "finish",
        }
    }
}

/// Start time and spacing of the collection-time labels.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub start: NaiveTime,
    pub interval_minutes: i64,
}

impl Schedule {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            start: settings.start_time,
            interval_minutes: settings.stop_interval_minutes,
        }
    }

    /// Label for the stop at `position`, formatted `H:MM`. Wraps past midnight.
    pub fn collection_time(&self, position: usize) -> String {
        // Both factors are reduced below a day first, so the product cannot overflow.
        let interval = self.interval_minutes.rem_euclid(MINUTES_PER_DAY);
        let steps = (position as u64 % MINUTES_PER_DAY as u64) as i64;
        let offset = Duration::minutes((interval * steps) % MINUTES_PER_DAY);
        (self.start + offset).format("%-H:%M").to_string()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Prints the route to stdout, first stop green, last red, the rest blue.
pub struct ConsolePresenter {
    schedule: Schedule,
}

impl ConsolePresenter {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule }
    }
}

impl Presenter for ConsolePresenter {
    fn present(&mut self, stops: &[Stop]) -> Result<(), RouteError> {
        let names: Vec<&str> = stops.iter().map(|s| s.name.as_str()).collect();
        println!("Optimal route order: {:?}", names);

        for stop in stops {
            let line = format!(
                "{:>2}. {} ({:.4}, {:.4}) collection time {}",
                stop.position + 1,
                stop.name,
                stop.coordinate.lat,
                stop.coordinate.lon,
                self.schedule.collection_time(stop.position)
            );
            match StopRole::of(stop.position, stops.len()) {
                StopRole::Start => println!("{}", line.green()),
                StopRole::Finish => println!("{}", line.red()),
                StopRole::Intermediate => println!("{}", line.blue()),
            }
        }
        Ok(())
    }
}

/// Writes one CSV row per stop.
pub struct CsvPresenter<W: Write> {
    wtr: Writer<W>,
    schedule: Schedule,
}

impl CsvPresenter<File> {
    pub fn from_path(path: impl AsRef<Path>, schedule: Schedule) -> Result<Self, RouteError> {
        Ok(Self {
            wtr: Writer::from_path(path)?,
            schedule,
        })
    }
}

/// Writes the CSV to a file, which is only created or truncated once a route is presented.
pub struct CsvFilePresenter {
    path: PathBuf,
    schedule: Schedule,
}

impl CsvFilePresenter {
    pub fn new(path: impl Into<PathBuf>, schedule: Schedule) -> Self {
        Self {
            path: path.into(),
            schedule,
        }
    }
}

impl Presenter for CsvFilePresenter {
    fn present(&mut self, stops: &[Stop]) -> Result<(), RouteError> {
        let mut csv = CsvPresenter::from_path(&self.path, self.schedule)?;
        csv.present(stops)?;
        info!("Route saved as {}", self.path.display());
        Ok(())
    }
}

impl<W: Write> CsvPresenter<W> {
    pub fn from_writer(writer: W, schedule: Schedule) -> Self {
        Self {
            wtr: Writer::from_writer(writer),
            schedule,
        }
    }

    pub fn into_inner(self) -> Result<W, RouteError> {
        self.wtr
            .into_inner()
            .map_err(|e| RouteError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

impl<W: Write> Presenter for CsvPresenter<W> {
    fn present(&mut self, stops: &[Stop]) -> Result<(), RouteError> {
        self.wtr
            .write_record(["position", "name", "lat", "lon", "collection_time", "role"])?;

        for stop in stops {
            self.wtr.write_record([
                stop.position.to_string(),
                stop.name.clone(),
                stop.coordinate.lat.to_string(),
                stop.coordinate.lon.to_string(),
                self.schedule.collection_time(stop.position),
                StopRole::of(stop.position, stops.len()).as_str().to_string(),
            ])?;
        }

        self.wtr.flush()?;
        info!("Wrote {} stops as CSV", stops.len());
        Ok(())
    }
}
