use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::{
    airport::Airport,
    error::{CatalogError, CatalogResult},
    geo::{self, Coordinate},
    geo_index::GeoIndex,
};

/// An airport found inside the route corridor, with the index of the first
/// leg it matched against.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub airport: Arc<Airport>,
    pub leg: usize,
}

/// A candidate border-crossing stop along a route. Computed per query and
/// discarded, never persisted.
#[derive(Debug, Clone)]
pub struct BorderCrossingPoint {
    pub airport: Arc<Airport>,
    pub position: Coordinate,
    pub leg: usize,
}

/// All indexed airports within `corridor_nm` lateral distance of any route
/// leg, deduplicated across legs and ordered by ICAO. Airports without
/// coordinates are never indexed, so they are silently absent here.
pub fn airports_along_route(
    index: &GeoIndex,
    points: &[Coordinate],
    corridor_nm: f64,
) -> CatalogResult<Vec<Arc<Airport>>> {
    Ok(route_matches(index, points, corridor_nm)?
        .into_iter()
        .map(|route_match| route_match.airport)
        .collect())
}

/// Corridor membership is evaluated leg by leg: an airport qualifies when
/// its cross-track distance to some leg is within the corridor AND its
/// along-track projection falls between that leg's endpoints. An airport
/// abeam a leg's extension only qualifies via an adjacent leg.
pub fn route_matches(
    index: &GeoIndex,
    points: &[Coordinate],
    corridor_nm: f64,
) -> CatalogResult<Vec<RouteMatch>> {
    if points.len() < 2 {
        return Err(CatalogError::RouteTooShort(points.len()));
    }

    let mut matched: IndexMap<String, RouteMatch> = IndexMap::new();
    for (leg, (&start, &end)) in points.iter().tuple_windows().enumerate() {
        let leg_length = geo::haversine_nm(start, end);
        if leg_length == 0.0 {
            continue;
        }

        // Candidate pre-filter: everything in the corridor lies within this
        // circle around the leg midpoint.
        let search_radius = leg_length / 2.0 + corridor_nm + 1.0;
        for airport in index.within_radius(geo::midpoint(start, end), search_radius) {
            if matched.contains_key(&airport.icao) {
                continue;
            }
            let Some(position) = airport.position else {
                continue;
            };
            if geo::cross_track_nm(position, start, end).abs() > corridor_nm {
                continue;
            }
            let along = geo::along_track_nm(position, start, end);
            if along < 0.0 || along > leg_length {
                continue;
            }
            matched.insert(airport.icao.clone(), RouteMatch { airport, leg });
        }
    }
    debug!(
        legs = points.len() - 1,
        corridor_nm,
        matches = matched.len(),
        "evaluated route corridor"
    );

    matched.sort_unstable_keys();
    Ok(matched.into_values().collect())
}

/// Designated border-crossing airports inside the corridor of the direct
/// leg between two airports. An empty result is a normal outcome.
pub fn border_crossing_points(
    index: &GeoIndex,
    from: &Airport,
    to: &Airport,
    corridor_nm: f64,
) -> CatalogResult<Vec<BorderCrossingPoint>> {
    let from_position = from
        .position
        .ok_or_else(|| CatalogError::MissingCoordinates(from.icao.clone()))?;
    let to_position = to
        .position
        .ok_or_else(|| CatalogError::MissingCoordinates(to.icao.clone()))?;

    Ok(
        route_matches(index, &[from_position, to_position], corridor_nm)?
            .into_iter()
            .filter(|route_match| route_match.airport.border_crossing)
            .filter_map(|route_match| {
                let position = route_match.airport.position?;
                Some(BorderCrossingPoint {
                    position,
                    leg: route_match.leg,
                    airport: route_match.airport,
                })
            })
            .collect(),
    )
}
