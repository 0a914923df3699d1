use crate::config::constant::EARTH_RADIUS_KM;
use crate::domain::types::Coordinate;

/// Great-circle distance in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let dlat = (to.lat - from.lat).to_radians();
    let dlon = (to.lon - from.lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Arc cost between two points: haversine distance in meters, truncated toward zero.
pub fn arc_cost_meters(from: Coordinate, to: Coordinate) -> u64 {
    (haversine_km(from, to) * 1000.0) as u64
}
