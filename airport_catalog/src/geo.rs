use serde::Serialize;
use wind_components::Heading;

use crate::error::{CatalogError, CatalogResult};

/// Mean Earth radius of the spherical model (6371.0 km).
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// A validated position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> CatalogResult<Self> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || latitude.abs() > 90.0
            || longitude.abs() > 180.0
        {
            return Err(CatalogError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(self) -> f64 {
        self.latitude
    }

    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

/// Great-circle distance in nautical miles, haversine over the spherical
/// Earth model.
pub fn haversine_nm(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_NM * 2.0 * h.sqrt().asin()
}

/// Initial great-circle bearing from `from` towards `to`.
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> Heading {
    let lat_a = from.latitude.to_radians();
    let lat_b = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let x = delta_lon.sin() * lat_b.cos();
    let y = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * delta_lon.cos();
    Heading::new(x.atan2(y).to_degrees())
}

/// Signed cross-track distance in nautical miles from `point` to the great
/// circle through `leg_start` and `leg_end`. Negative is left of track.
pub fn cross_track_nm(point: Coordinate, leg_start: Coordinate, leg_end: Coordinate) -> f64 {
    let dist_13 = haversine_nm(leg_start, point) / EARTH_RADIUS_NM;
    let bearing_13 = initial_bearing(leg_start, point).degrees().to_radians();
    let bearing_12 = initial_bearing(leg_start, leg_end).degrees().to_radians();
    (dist_13.sin() * (bearing_13 - bearing_12).sin()).asin() * EARTH_RADIUS_NM
}

/// Signed along-track distance in nautical miles: how far along the leg the
/// perpendicular foot of `point` lies from `leg_start`. Negative means the
/// foot falls behind the start of the leg.
pub fn along_track_nm(point: Coordinate, leg_start: Coordinate, leg_end: Coordinate) -> f64 {
    let dist_13 = haversine_nm(leg_start, point) / EARTH_RADIUS_NM;
    let cross_track = cross_track_nm(point, leg_start, leg_end) / EARTH_RADIUS_NM;
    let along = (dist_13.cos() / cross_track.cos()).clamp(-1.0, 1.0).acos() * EARTH_RADIUS_NM;

    let bearing_13 = initial_bearing(leg_start, point).degrees().to_radians();
    let bearing_12 = initial_bearing(leg_start, leg_end).degrees().to_radians();
    if (bearing_13 - bearing_12).cos() < 0.0 {
        -along
    } else {
        along
    }
}

/// Great-circle midpoint between two positions.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let bx = lat_b.cos() * delta_lon.cos();
    let by = lat_b.cos() * delta_lon.sin();
    let lat = (lat_a.sin() + lat_b.sin())
        .atan2(((lat_a.cos() + bx).powi(2) + by.powi(2)).sqrt())
        .to_degrees();
    let lon = a.longitude + by.atan2(lat_a.cos() + bx).to_degrees();

    Coordinate {
        latitude: lat,
        longitude: (lon + 180.0).rem_euclid(360.0) - 180.0,
    }
}
