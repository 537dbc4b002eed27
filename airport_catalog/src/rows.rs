use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;

/// One row of the persisted `airports` table. The optional trailing
/// `border_crossing` column defaults to false when the store predates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRow {
    pub icao: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: i32,
    pub country: String,
    pub continent: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub border_crossing: bool,
}

/// One row of the persisted `runways` table: both directional ends of a
/// single strip. `low_dthr`/`high_dthr` are optional trailing columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunwayRow {
    pub id: u64,
    pub airport_icao: String,
    pub low_ident: String,
    pub low_lat: Option<f64>,
    pub low_lon: Option<f64>,
    pub low_elev: i32,
    pub low_hdg: f64,
    pub high_ident: String,
    pub high_lat: Option<f64>,
    pub high_lon: Option<f64>,
    pub high_elev: i32,
    pub high_hdg: f64,
    pub length: u32,
    pub width: u32,
    pub surface: String,
    pub lighted: bool,
    pub closed: bool,
    #[serde(default)]
    pub low_dthr: Option<u32>,
    #[serde(default)]
    pub high_dthr: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureRow {
    pub id: u64,
    pub airport_icao: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub approach_type: Option<String>,
    pub runway: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AipEntryRow {
    pub id: u64,
    pub airport_icao: String,
    pub name: String,
    pub url: Option<String>,
}

/// The external, blocking row store the catalog reads from.
///
/// Association fetches take the whole batch of ICAO codes at once; a
/// conforming implementation answers each call with a single underlying
/// read, so materializing N airports costs a bounded number of fetches
/// regardless of N.
pub trait RowSource {
    fn airport_rows(&self) -> CatalogResult<Vec<AirportRow>>;
    fn airport_row(&self, icao: &str) -> CatalogResult<Option<AirportRow>>;
    fn runway_rows(&self, icaos: &[&str]) -> CatalogResult<Vec<RunwayRow>>;
    fn procedure_rows(&self, icaos: &[&str]) -> CatalogResult<Vec<ProcedureRow>>;
    fn aip_entry_rows(&self, icaos: &[&str]) -> CatalogResult<Vec<AipEntryRow>>;
}
