//! Airport catalog with spatial queries and wind-relative runway selection.
//!
//! Rows come in through a [`rows::RowSource`] (CSV files via
//! [`CsvCatalog`], or anything else implementing the trait), get
//! materialized once into immutable [`Airport`] graphs by the
//! [`AirportStore`], and are then queryable by ICAO, country, approach
//! capability, proximity ([`GeoIndex`]), route corridor and border
//! crossings. [`Catalog`] bundles the store and the index into one surface.

pub mod airport;
pub mod catalog;
pub mod csv_source;
pub mod error;
pub mod geo;
pub mod geo_index;
pub mod route;
pub mod rows;
pub mod selector;
pub mod store;

pub use airport::{AipEntry, Airport, ApproachCategory, Procedure, Runway, RunwayEnd};
pub use catalog::Catalog;
pub use csv_source::CsvCatalog;
pub use error::{CatalogError, CatalogResult};
pub use geo::Coordinate;
pub use geo_index::GeoIndex;
pub use route::{BorderCrossingPoint, RouteMatch};
pub use selector::{RunwaySelection, best_runway};
pub use store::AirportStore;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use wind_components::Heading;

    use crate::{
        airport::{Airport, Runway, RunwayEnd},
        geo::Coordinate,
    };

    pub(crate) fn runway(
        low: &str,
        high: &str,
        low_heading: f64,
        length_ft: u32,
        closed: bool,
    ) -> Runway {
        let end = |ident: &str, heading: f64| RunwayEnd {
            ident: ident.to_string(),
            position: None,
            elevation_ft: 0,
            heading: Heading::new(heading),
            displaced_threshold_ft: 0,
        };
        Runway {
            low: end(low, low_heading),
            high: end(high, (low_heading + 180.0) % 360.0),
            length_ft,
            width_ft: 150,
            surface: "ASP".to_string(),
            lighted: true,
            closed,
        }
    }

    pub(crate) fn test_airport(icao: &str, runways: Vec<Runway>) -> Airport {
        Airport {
            icao: icao.to_string(),
            name: format!("{icao} airport"),
            position: None,
            elevation_ft: 100,
            country: "NO".to_string(),
            continent: "EU".to_string(),
            kind: "small_airport".to_string(),
            border_crossing: false,
            runways,
            procedures: Vec::new(),
            aip_entries: Vec::new(),
        }
    }

    pub(crate) fn positioned_airport(icao: &str, lat: f64, lon: f64) -> Arc<Airport> {
        let mut airport = test_airport(icao, Vec::new());
        airport.position = Some(Coordinate::new(lat, lon).expect("valid test coordinate"));
        Arc::new(airport)
    }

    pub(crate) fn unpositioned_airport(icao: &str) -> Arc<Airport> {
        Arc::new(test_airport(icao, Vec::new()))
    }

    pub(crate) fn border_airport(icao: &str, lat: f64, lon: f64) -> Arc<Airport> {
        let mut airport = test_airport(icao, Vec::new());
        airport.position = Some(Coordinate::new(lat, lon).expect("valid test coordinate"));
        airport.border_crossing = true;
        Arc::new(airport)
    }
}
