use std::sync::Arc;

use wind_components::WindObservation;

use crate::{
    airport::{Airport, ApproachCategory},
    error::CatalogResult,
    geo::Coordinate,
    geo_index::GeoIndex,
    route::{self, BorderCrossingPoint, RouteMatch},
    rows::RowSource,
    selector::{self, RunwaySelection},
    store::AirportStore,
};

/// The query surface of the crate: an eagerly loaded store plus a spatial
/// index built over the same snapshot, kept consistent as a pair.
pub struct Catalog<S> {
    store: AirportStore<S>,
    index: GeoIndex,
}

impl<S: RowSource> Catalog<S> {
    /// Materializes the whole store and indexes every positioned airport.
    pub fn load(source: S) -> CatalogResult<Self> {
        let store = AirportStore::new(source);
        let airports = store.load_all()?;
        let index = GeoIndex::build(airports);
        Ok(Self { store, index })
    }

    /// Re-reads the row source and swaps in a freshly built index. Queries
    /// see either the old snapshot or the new one, never a partial rebuild;
    /// a failed reload leaves the old snapshot in place.
    pub fn reload(&mut self) -> CatalogResult<()> {
        let airports = self.store.load_all()?;
        self.index = GeoIndex::build(airports);
        Ok(())
    }

    pub fn store(&self) -> &AirportStore<S> {
        &self.store
    }

    pub fn geo_index(&self) -> &GeoIndex {
        &self.index
    }

    pub fn find_airport(&self, icao: &str) -> CatalogResult<Option<Arc<Airport>>> {
        self.store.airport(icao)
    }

    pub fn airports_in_country(&self, code: &str) -> CatalogResult<Vec<Arc<Airport>>> {
        self.store.airports_in_country(code)
    }

    pub fn airports_with_approach(
        &self,
        category: ApproachCategory,
    ) -> CatalogResult<Vec<Arc<Airport>>> {
        self.store.airports_with_approach(category)
    }

    pub fn nearest_airports(&self, point: Coordinate, count: usize) -> Vec<Arc<Airport>> {
        self.index.nearest(point, count)
    }

    pub fn airports_within_radius(&self, point: Coordinate, radius_nm: f64) -> Vec<Arc<Airport>> {
        self.index.within_radius(point, radius_nm)
    }

    pub fn airports_along_route(
        &self,
        points: &[Coordinate],
        corridor_nm: f64,
    ) -> CatalogResult<Vec<Arc<Airport>>> {
        route::airports_along_route(&self.index, points, corridor_nm)
    }

    pub fn route_matches(
        &self,
        points: &[Coordinate],
        corridor_nm: f64,
    ) -> CatalogResult<Vec<RouteMatch>> {
        route::route_matches(&self.index, points, corridor_nm)
    }

    pub fn border_crossing_points(
        &self,
        from: &Airport,
        to: &Airport,
        corridor_nm: f64,
    ) -> CatalogResult<Vec<BorderCrossingPoint>> {
        route::border_crossing_points(&self.index, from, to, corridor_nm)
    }

    /// Looks the airport up and runs runway selection against the given
    /// wind. `Ok(None)` covers both an unknown ICAO and an airport without
    /// an open runway.
    pub fn best_runway(
        &self,
        icao: &str,
        wind: &WindObservation,
        crosswind_limit_kt: Option<f64>,
    ) -> CatalogResult<Option<RunwaySelection>> {
        let Some(airport) = self.store.airport(icao)? else {
            return Ok(None);
        };
        Ok(selector::best_runway(&airport, wind, crosswind_limit_kt))
    }
}

#[cfg(test)]
mod tests {
    use wind_components::{Heading, Speed};

    use super::*;
    use crate::{
        geo,
        store::tests::{MockSource, airport_row, runway_row},
    };

    fn sample_source() -> MockSource {
        let mut engm = airport_row("ENGM", 60.193901, 11.1004);
        engm.border_crossing = true;
        MockSource {
            airports: vec![
                engm,
                airport_row("ENZV", 58.876701, 5.63778),
                airport_row("ENVA", 63.457802, 10.924),
            ],
            runways: vec![
                runway_row(1, "ENGM", "01", 6.0),
                runway_row(2, "ENZV", "18", 183.0),
            ],
            ..MockSource::default()
        }
    }

    #[test]
    fn test_load_builds_index_over_the_full_store() {
        let catalog = Catalog::load(sample_source()).unwrap();
        assert_eq!(catalog.geo_index().len(), 3);
        assert_eq!(catalog.store().source.airport_fetches.get(), 1);

        let point = Coordinate::new(60.0, 11.0).unwrap();
        let nearest = catalog.nearest_airports(point, 1);
        assert_eq!(nearest[0].icao, "ENGM");
    }

    #[test]
    fn test_lookup_and_selection_through_the_facade() {
        let catalog = Catalog::load(sample_source()).unwrap();
        let airport = catalog.find_airport("engm").unwrap().expect("known ICAO");
        assert_eq!(airport.runways.len(), 1);

        let wind = WindObservation::new(Heading::new(10.0), Speed::new(18), None);
        let selection = catalog
            .best_runway("ENGM", &wind, None)
            .unwrap()
            .expect("open runway");
        assert_eq!(selection.end.ident, "01");

        assert!(catalog.best_runway("XXXX", &wind, None).unwrap().is_none());
    }

    #[test]
    fn test_route_and_border_queries_through_the_facade() {
        let catalog = Catalog::load(sample_source()).unwrap();
        let from = catalog.find_airport("ENZV").unwrap().expect("known ICAO");
        let to = catalog.find_airport("ENVA").unwrap().expect("known ICAO");
        let from_pos = from.position.unwrap();
        let to_pos = to.position.unwrap();

        // ENGM sits well inside a wide corridor between the two.
        let offset = geo::cross_track_nm(
            catalog.find_airport("ENGM").unwrap().unwrap().position.unwrap(),
            from_pos,
            to_pos,
        )
        .abs();
        let along = catalog
            .airports_along_route(&[from_pos, to_pos], offset + 10.0)
            .unwrap();
        assert!(along.iter().any(|a| a.icao == "ENGM"));

        let crossings = catalog
            .border_crossing_points(&from, &to, offset + 10.0)
            .unwrap();
        assert_eq!(crossings.len(), 1);
        assert_eq!(crossings[0].airport.icao, "ENGM");
    }

    #[test]
    fn test_reload_swaps_in_a_fresh_index() {
        let mut catalog = Catalog::load(sample_source()).unwrap();
        assert_eq!(catalog.geo_index().len(), 3);
        catalog.reload().unwrap();
        assert_eq!(catalog.geo_index().len(), 3);
        // Each load is one airports fetch against the source.
        assert_eq!(catalog.store().source.airport_fetches.get(), 2);
    }
}
