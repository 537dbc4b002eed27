use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::CatalogResult,
    rows::{AipEntryRow, AirportRow, ProcedureRow, RowSource, RunwayRow},
};

/// CSV-backed row store: a directory holding `airports.csv`, `runways.csv`,
/// `procedures.csv` and optionally `aip_entries.csv`, column-compatible with
/// the persisted schema. Every call re-reads the file; this is the external
/// blocking dependency the store caches in front of.
#[derive(Debug)]
pub struct CsvCatalog {
    dir: PathBuf,
}

impl CsvCatalog {
    pub fn open(dir: impl Into<PathBuf>) -> CatalogResult<Self> {
        let dir = dir.into();
        if !dir.join("airports.csv").is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no airports.csv in {}", dir.display()),
            )
            .into());
        }
        Ok(Self { dir })
    }

    fn read_required<T: DeserializeOwned>(&self, file: &str) -> CatalogResult<Vec<T>> {
        read_rows(File::open(self.dir.join(file))?)
    }

    fn read_optional<T: DeserializeOwned>(&self, file: &str) -> CatalogResult<Vec<T>> {
        let path = self.dir.join(file);
        if !path.is_file() {
            debug!(file, "catalog file not present, treating as empty");
            return Ok(Vec::new());
        }
        read_rows(File::open(path)?)
    }
}

fn matches_batch(icaos: &[&str], candidate: &str) -> bool {
    icaos.iter().any(|icao| icao.eq_ignore_ascii_case(candidate))
}

impl RowSource for CsvCatalog {
    fn airport_rows(&self) -> CatalogResult<Vec<AirportRow>> {
        self.read_required("airports.csv")
    }

    fn airport_row(&self, icao: &str) -> CatalogResult<Option<AirportRow>> {
        Ok(self
            .airport_rows()?
            .into_iter()
            .find(|row| row.icao.eq_ignore_ascii_case(icao)))
    }

    fn runway_rows(&self, icaos: &[&str]) -> CatalogResult<Vec<RunwayRow>> {
        let mut rows: Vec<RunwayRow> = self.read_required("runways.csv")?;
        rows.retain(|row| matches_batch(icaos, &row.airport_icao));
        Ok(rows)
    }

    fn procedure_rows(&self, icaos: &[&str]) -> CatalogResult<Vec<ProcedureRow>> {
        let mut rows: Vec<ProcedureRow> = self.read_required("procedures.csv")?;
        rows.retain(|row| matches_batch(icaos, &row.airport_icao));
        Ok(rows)
    }

    fn aip_entry_rows(&self, icaos: &[&str]) -> CatalogResult<Vec<AipEntryRow>> {
        let mut rows: Vec<AipEntryRow> = self.read_optional("aip_entries.csv")?;
        rows.retain(|row| matches_batch(icaos, &row.airport_icao));
        Ok(rows)
    }
}

/// Deserializes all rows from one CSV reader. A malformed row is a fatal
/// error for the call, never silently skipped.
pub(crate) fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> CatalogResult<Vec<T>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(Into::into)
}
