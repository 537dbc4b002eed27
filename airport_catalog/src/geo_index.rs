use std::{f64::consts::FRAC_PI_2, sync::Arc};

use itertools::Itertools;
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use tracing::debug;

use crate::{
    airport::Airport,
    geo::{Coordinate, EARTH_RADIUS_NM, haversine_nm},
};

#[derive(Debug, Clone)]
struct IndexedAirport {
    position: [f64; 2],
    coordinate: Coordinate,
    airport: Arc<Airport>,
}

impl RTreeObject for IndexedAirport {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedAirport {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_lat = self.position[0] - point[0];
        let d_lon = self.position[1] - point[1];
        d_lat * d_lat + d_lon * d_lon
    }
}

/// Immutable nearest-neighbor structure over every airport coordinate,
/// built once at load time. Loading more airports means building a fresh
/// index and swapping it in whole; there is no incremental insert.
///
/// The tree orders candidates by raw lat/lon Euclidean distance, which is
/// good enough to find them; results are always re-verified and re-ranked
/// by true great-circle distance before they leave this module. Each
/// airport is additionally indexed at `longitude ± 360` so queries near the
/// antimeridian see candidates on both sides of the seam; duplicates are
/// collapsed per ICAO before returning.
pub struct GeoIndex {
    tree: RTree<IndexedAirport>,
    len: usize,
}

impl GeoIndex {
    /// Indexes every airport that has a position. Airports without
    /// coordinates are skipped and never appear in spatial query results.
    pub fn build<I: IntoIterator<Item = Arc<Airport>>>(airports: I) -> Self {
        let mut entries = Vec::new();
        let mut len = 0;
        for airport in airports {
            let Some(coordinate) = airport.position else {
                continue;
            };
            len += 1;
            let latitude = coordinate.latitude();
            let longitude = coordinate.longitude();
            let mut longitudes = vec![longitude];
            if longitude <= 0.0 {
                longitudes.push(longitude + 360.0);
            }
            if longitude >= 0.0 {
                longitudes.push(longitude - 360.0);
            }
            for shifted in longitudes {
                entries.push(IndexedAirport {
                    position: [latitude, shifted],
                    coordinate,
                    airport: airport.clone(),
                });
            }
        }
        debug!(indexed = len, entries = entries.len(), "built geo index");
        Self {
            tree: RTree::bulk_load(entries),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Up to `count` airports ascending by great-circle distance to `point`,
    /// ties broken by ICAO. Asking for more airports than exist returns the
    /// whole catalog; that is not an error.
    pub fn nearest(&self, point: Coordinate, count: usize) -> Vec<Arc<Airport>> {
        // Euclidean candidate order can disagree with great-circle order at
        // high latitudes, so over-fetch before re-ranking by haversine. The
        // budget also covers each airport's mirrored seam entries.
        let fetch = count
            .saturating_mul(4)
            .saturating_add(16)
            .min(self.tree.size());
        let query = [point.latitude(), point.longitude()];
        let mut candidates = self
            .tree
            .nearest_neighbor_iter(&query)
            .take(fetch)
            .map(|entry| (haversine_nm(point, entry.coordinate), entry))
            .collect_vec();
        candidates.sort_unstable_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| a.1.airport.icao.cmp(&b.1.airport.icao))
        });
        candidates.dedup_by(|a, b| a.1.airport.icao == b.1.airport.icao);
        candidates
            .into_iter()
            .take(count)
            .map(|(_, entry)| entry.airport.clone())
            .collect()
    }

    /// All airports within `radius_nm` great-circle distance of `point`,
    /// boundary inclusive, ascending by distance with ICAO ties.
    pub fn within_radius(&self, point: Coordinate, radius_nm: f64) -> Vec<Arc<Airport>> {
        if radius_nm < 0.0 {
            return Vec::new();
        }
        let radius_rad = radius_nm / EARTH_RADIUS_NM;
        let lat_pad = radius_rad.to_degrees();
        // The widest longitude offset of a circle of angular radius d at
        // latitude p is asin(sin d / cos p), not d / cos p; the circle
        // spans every longitude once it reaches a pole.
        let cos_lat = point.latitude().to_radians().cos();
        let sin_ratio = if radius_rad >= FRAC_PI_2 {
            1.0
        } else {
            radius_rad.sin() / cos_lat
        };
        let lon_pad = if sin_ratio >= 1.0 {
            180.0
        } else {
            sin_ratio.asin().to_degrees()
        };
        // The mirrored seam entries cover longitudes out to +-360, so the
        // envelope never needs to wrap or clamp in longitude.
        let envelope = AABB::from_corners(
            [
                (point.latitude() - lat_pad).max(-90.0),
                point.longitude() - lon_pad,
            ],
            [
                (point.latitude() + lat_pad).min(90.0),
                point.longitude() + lon_pad,
            ],
        );

        let mut matches = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|entry| (haversine_nm(point, entry.coordinate), entry))
            .filter(|(distance, _)| *distance <= radius_nm)
            .collect_vec();
        matches.sort_unstable_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| a.1.airport.icao.cmp(&b.1.airport.icao))
        });
        matches.dedup_by(|a, b| a.1.airport.icao == b.1.airport.icao);
        matches
            .into_iter()
            .map(|(_, entry)| entry.airport.clone())
            .collect()
    }
}
