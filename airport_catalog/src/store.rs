use std::sync::{Arc, RwLock};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};
use wind_components::Heading;

use crate::{
    airport::{AipEntry, Airport, ApproachCategory, Procedure, Runway, RunwayEnd},
    error::{CatalogError, CatalogResult},
    geo::Coordinate,
    rows::{AipEntryRow, AirportRow, ProcedureRow, RowSource, RunwayRow},
};

/// Read-only repository translating persisted rows into immutable
/// `Airport` value graphs, with a per-ICAO materialization cache in front
/// of the blocking row source.
pub struct AirportStore<S> {
    pub(crate) source: S,
    cache: RwLock<Cache>,
}

#[derive(Default)]
struct Cache {
    airports: IndexMap<String, Arc<Airport>>,
    misses: IndexSet<String>,
    complete: bool,
}

pub(crate) fn normalize_icao(icao: &str) -> String {
    icao.trim().to_ascii_uppercase()
}

impl<S: RowSource> AirportStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(Cache::default()),
        }
    }

    /// Exact, case-insensitive ICAO lookup. An unknown code is a normal
    /// `None`, never an error. Both hits and misses are cached so repeated
    /// lookups do not re-hit the row source; `load_all` resets the miss set.
    pub fn airport(&self, icao: &str) -> CatalogResult<Option<Arc<Airport>>> {
        let key = normalize_icao(icao);
        {
            let cache = self.cache.read().expect("airport cache lock poisoned");
            if cache.complete || cache.airports.contains_key(&key) {
                return Ok(cache.airports.get(&key).cloned());
            }
            if cache.misses.contains(&key) {
                return Ok(None);
            }
        }

        let Some(row) = self.source.airport_row(&key)? else {
            let mut cache = self.cache.write().expect("airport cache lock poisoned");
            cache.misses.insert(key);
            return Ok(None);
        };
        let airport = self
            .materialize_batch(vec![row])?
            .pop()
            .unwrap_or_else(|| unreachable!("one row in, one airport out"));

        let mut cache = self.cache.write().expect("airport cache lock poisoned");
        cache.airports.insert(key, airport.clone());
        Ok(Some(airport))
    }

    /// Eagerly materializes every airport in the store. One airports fetch
    /// plus one fetch per association type, regardless of batch size.
    #[tracing::instrument(skip(self))]
    pub fn load_all(&self) -> CatalogResult<Vec<Arc<Airport>>> {
        let rows = self.source.airport_rows()?;
        let airports = self.materialize_batch(rows)?;
        debug!(count = airports.len(), "materialized airport catalog");

        let mut cache = self.cache.write().expect("airport cache lock poisoned");
        cache.airports = airports
            .iter()
            .map(|airport| (airport.icao.clone(), airport.clone()))
            .collect();
        cache.airports.sort_unstable_keys();
        cache.misses.clear();
        cache.complete = true;
        Ok(airports)
    }

    /// The full catalog, from cache when a complete load already happened.
    pub fn all_airports(&self) -> CatalogResult<Vec<Arc<Airport>>> {
        {
            let cache = self.cache.read().expect("airport cache lock poisoned");
            if cache.complete {
                return Ok(cache.airports.values().cloned().collect());
            }
        }
        self.load_all()
    }

    pub fn airports_in_country(&self, code: &str) -> CatalogResult<Vec<Arc<Airport>>> {
        Ok(self
            .all_airports()?
            .into_iter()
            .filter(|airport| airport.country.eq_ignore_ascii_case(code.trim()))
            .collect())
    }

    pub fn airports_with_approach(
        &self,
        category: ApproachCategory,
    ) -> CatalogResult<Vec<Arc<Airport>>> {
        Ok(self
            .all_airports()?
            .into_iter()
            .filter(|airport| airport.has_approach(category))
            .collect())
    }

    pub fn airports_with_precision_approach(&self) -> CatalogResult<Vec<Arc<Airport>>> {
        self.airports_with_approach(ApproachCategory::Precision)
    }

    fn materialize_batch(&self, rows: Vec<AirportRow>) -> CatalogResult<Vec<Arc<Airport>>> {
        let icaos: Vec<String> = rows.iter().map(|row| normalize_icao(&row.icao)).collect();
        let icao_refs: Vec<&str> = icaos.iter().map(String::as_str).collect();

        // One batched fetch per association type.
        let mut runways = group_by_icao(self.source.runway_rows(&icao_refs)?, |row| {
            &row.airport_icao
        });
        let mut procedures = group_by_icao(self.source.procedure_rows(&icao_refs)?, |row| {
            &row.airport_icao
        });
        let mut aip_entries = group_by_icao(self.source.aip_entry_rows(&icao_refs)?, |row| {
            &row.airport_icao
        });

        rows.into_iter()
            .map(|row| {
                let key = normalize_icao(&row.icao);
                build_airport(
                    row,
                    runways.swap_remove(&key).unwrap_or_default(),
                    procedures.swap_remove(&key).unwrap_or_default(),
                    aip_entries.swap_remove(&key).unwrap_or_default(),
                )
                .map(Arc::new)
            })
            .collect()
    }
}

fn group_by_icao<T>(rows: Vec<T>, icao_of: impl Fn(&T) -> &String) -> IndexMap<String, Vec<T>> {
    let mut grouped: IndexMap<String, Vec<T>> = IndexMap::new();
    for row in rows {
        grouped
            .entry(normalize_icao(icao_of(&row)))
            .or_default()
            .push(row);
    }
    grouped
}

fn build_airport(
    row: AirportRow,
    mut runway_rows: Vec<RunwayRow>,
    mut procedure_rows: Vec<ProcedureRow>,
    mut aip_rows: Vec<AipEntryRow>,
) -> CatalogResult<Airport> {
    let icao = normalize_icao(&row.icao);
    let position = optional_position(&icao, row.latitude, row.longitude)?;

    runway_rows.sort_unstable_by_key(|r| r.id);
    procedure_rows.sort_unstable_by_key(|r| r.id);
    aip_rows.sort_unstable_by_key(|r| r.id);

    let runways = runway_rows
        .into_iter()
        .map(|r| build_runway(&icao, r))
        .collect::<CatalogResult<Vec<_>>>()?;

    let procedures = procedure_rows
        .into_iter()
        .map(|r| Procedure {
            name: r.name,
            kind: r.kind,
            approach_type: r.approach_type.filter(|t| !t.trim().is_empty()),
            runway: r.runway.filter(|t| !t.trim().is_empty()),
        })
        .collect();

    let aip_entries = aip_rows
        .into_iter()
        .map(|r| AipEntry {
            name: r.name,
            url: r.url.filter(|u| !u.trim().is_empty()),
        })
        .collect();

    Ok(Airport {
        icao,
        name: row.name,
        position,
        elevation_ft: row.elevation,
        country: row.country,
        continent: row.continent,
        kind: row.kind,
        border_crossing: row.border_crossing,
        runways,
        procedures,
        aip_entries,
    })
}

fn build_runway(icao: &str, row: RunwayRow) -> CatalogResult<Runway> {
    Ok(Runway {
        low: build_runway_end(
            icao,
            row.low_ident,
            row.low_lat,
            row.low_lon,
            row.low_elev,
            row.low_hdg,
            row.low_dthr,
        )?,
        high: build_runway_end(
            icao,
            row.high_ident,
            row.high_lat,
            row.high_lon,
            row.high_elev,
            row.high_hdg,
            row.high_dthr,
        )?,
        length_ft: row.length,
        width_ft: row.width,
        surface: row.surface,
        lighted: row.lighted,
        closed: row.closed,
    })
}

fn build_runway_end(
    icao: &str,
    ident: String,
    lat: Option<f64>,
    lon: Option<f64>,
    elevation_ft: i32,
    heading_deg: f64,
    displaced_threshold_ft: Option<u32>,
) -> CatalogResult<RunwayEnd> {
    let nominal = Heading::from_runway_ident(&ident).map_err(|source| {
        CatalogError::InvalidRunwayIdent {
            icao: icao.to_string(),
            source,
        }
    })?;
    let heading = Heading::new(heading_deg);

    // The identifier implies the heading mod 180 within a few degrees; a
    // larger disagreement is suspect data but not fatal.
    let fold = (nominal.degrees() - heading.degrees()).rem_euclid(180.0);
    if fold.min(180.0 - fold) > 10.0 {
        warn!(
            icao,
            %ident,
            true_heading = heading.degrees(),
            "runway identifier disagrees with its true heading"
        );
    }

    Ok(RunwayEnd {
        ident,
        position: optional_position(icao, lat, lon)?,
        elevation_ft,
        heading,
        displaced_threshold_ft: displaced_threshold_ft.unwrap_or(0),
    })
}

fn optional_position(
    icao: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> CatalogResult<Option<Coordinate>> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude).map(Some),
        (None, None) => Ok(None),
        _ => {
            warn!(icao, ?latitude, ?longitude, "half a coordinate in store, treating as absent");
            Ok(None)
        }
    }
}
