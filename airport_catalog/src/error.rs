use std::io;

use thiserror::Error;
use wind_components::ParseIdentError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures surfaced by the catalog. Absence (unknown ICAO, empty query
/// result, no usable runway) is never an error; these variants cover
/// malformed input at a construction boundary and an unreadable row store.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("system input/output error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read catalog rows: {0}")]
    Csv(#[from] csv::Error),
    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("invalid runway identifier for {icao}: {source}")]
    InvalidRunwayIdent {
        icao: String,
        #[source]
        source: ParseIdentError,
    },
    #[error("a route needs at least two points, got {0}")]
    RouteTooShort(usize),
    #[error("airport {0} has no published coordinates")]
    MissingCoordinates(String),
}
