use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::constant::{FALLBACK_COORDINATE, MIN_LOCATIONS};
use crate::domain::error::RouteError;
use crate::domain::types::{Coordinate, Location};

/// Resolves a location name to a coordinate.
pub trait Geocoder {
    fn locate(&self, name: &str) -> Coordinate;
}

/// Struct to match the gazetteer JSON structure
#[derive(Debug, Deserialize)]
struct GazetteerEntry {
    name: String,
    #[serde(flatten)]
    coordinate: Coordinate,
}

/// Fixed name to coordinate table. Unknown names resolve to a fallback coordinate.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: HashMap<String, Coordinate>,
    fallback: Coordinate,
}

impl Default for Gazetteer {
    fn default() -> Self {
        let entries = [
            ("Amberpet", (17.3665, 78.5626)),
            ("LB Nagar", (17.3683, 78.5243)),
            ("Anmagal Hayathnagar", (17.3753, 78.5481)),
            ("Madhapur", (17.4504, 78.3886)),
            ("Kukatpally", (17.4849, 78.4138)),
            ("Secunderabad", (17.4399, 78.4983)),
            ("Dilsukh Nagar", (17.3699, 78.5314)),
        ]
        .into_iter()
        .map(|(name, coord)| (name.to_string(), Coordinate::from(coord)))
        .collect();

        Self {
            entries,
            fallback: Coordinate::from(FALLBACK_COORDINATE),
        }
    }
}

impl Gazetteer {
    pub fn new(entries: HashMap<String, Coordinate>, fallback: Coordinate) -> Self {
        Self { entries, fallback }
    }

    /// Parses `[{"name": .., "lat": .., "lon": ..}, ..]`.
    pub fn from_json_str(content: &str) -> Result<Self, RouteError> {
        let raw: Vec<GazetteerEntry> = serde_json::from_str(content)?;
        let entries = raw
            .into_iter()
            .map(|e| (e.name.trim().to_string(), e.coordinate))
            .collect();

        Ok(Self::new(entries, Coordinate::from(FALLBACK_COORDINATE)))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let gazetteer = Self::from_json_str(&content)?;
        info!(
            "Loaded {} gazetteer entries from {}",
            gazetteer.entries.len(),
            path.display()
        );
        Ok(gazetteer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Geocoder for Gazetteer {
    fn locate(&self, name: &str) -> Coordinate {
        match self.entries.get(name) {
            Some(coord) => *coord,
            None => {
                warn!("Unknown location '{}', using fallback coordinate", name);
                self.fallback
            }
        }
    }
}

/// Split comma separated input into trimmed, non-empty names, keeping the first
/// occurrence of any repeated name.
pub fn parse_location_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in input.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Geocode the names in order. The first name becomes the depot.
pub fn resolve_locations(
    names: &[String],
    geocoder: &impl Geocoder,
) -> Result<Vec<Location>, RouteError> {
    if names.len() < MIN_LOCATIONS {
        return Err(RouteError::InsufficientLocations {
            found: names.len(),
            required: MIN_LOCATIONS,
        });
    }

    let locations: Vec<Location> = names
        .iter()
        .map(|name| Location {
            name: name.clone(),
            coordinate: geocoder.locate(name),
        })
        .collect();

    debug!("Resolved locations: {:?}", locations);
    Ok(locations)
}
