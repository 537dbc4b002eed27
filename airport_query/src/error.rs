use std::io;

use airport_catalog::CatalogError;
use config::ConfigError;
use thiserror::Error;

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub(crate) enum ApplicationError {
    #[error("Error regarding config: {0}")]
    Config(#[from] ConfigError),
    #[error("System input/output error: {0}")]
    Io(#[from] io::Error),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("No airport with ICAO code {0} in the catalog")]
    UnknownAirport(String),
    #[error("Airport {0} has no published position")]
    AirportWithoutPosition(String),
    #[error("Cannot parse wind {0:?}, expected direction@speed with an optional Ggust")]
    WindFormat(String),
    #[error("No catalog directory given: pass --data-dir or set data_dir in the config file")]
    NoDataDir,
    #[error("{0} has no open runway")]
    NoRunwayToSelect(String),
}
