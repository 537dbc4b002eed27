pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod output;
pub(crate) mod wind_arg;

use std::{path::PathBuf, sync::Arc};

use airport_catalog::{Airport, Catalog, Coordinate, CsvCatalog, geo};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Settings,
    error::{ApplicationError, ApplicationResult},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the catalog CSV files, overriding the config file
    #[clap(long, short)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look one airport up by its ICAO code
    Find { icao: String },
    /// List every airport in a country (ISO code)
    Country { code: String },
    /// The closest airports to a position
    Nearest {
        latitude: f64,
        longitude: f64,
        #[clap(long, short)]
        count: Option<usize>,
    },
    /// Every airport within a great-circle radius of a position
    Radius {
        latitude: f64,
        longitude: f64,
        radius_nm: f64,
    },
    /// Airports inside the corridor along a route of airports
    Route {
        /// ICAO codes of the route points, in order
        #[clap(required = true, num_args = 2..)]
        icaos: Vec<String>,
        /// Corridor half-width in nautical miles
        #[clap(long, short)]
        corridor_nm: Option<f64>,
    },
    /// Designated border-crossing airports between two airports
    Border {
        from: String,
        to: String,
        #[clap(long, short)]
        corridor_nm: Option<f64>,
    },
    /// Pick the best runway end for a given wind
    BestRunway {
        icao: String,
        /// Wind as direction@speed with an optional gust, e.g. 270@15G25
        wind: String,
        /// Crosswind limit in knots, overriding the config file
        #[clap(long, short = 'x')]
        crosswind_limit_kt: Option<f64>,
    },
}

fn require_airport(catalog: &Catalog<CsvCatalog>, icao: &str) -> ApplicationResult<Arc<Airport>> {
    catalog
        .find_airport(icao)?
        .ok_or_else(|| ApplicationError::UnknownAirport(icao.to_string()))
}

fn airport_position(airport: &Airport) -> ApplicationResult<Coordinate> {
    airport
        .position
        .ok_or_else(|| ApplicationError::AirportWithoutPosition(airport.icao.clone()))
}

fn run() -> ApplicationResult<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;
    let data_dir = cli
        .data_dir
        .or_else(|| settings.data_dir.clone())
        .ok_or(ApplicationError::NoDataDir)?;
    let catalog = Catalog::load(CsvCatalog::open(data_dir)?)?;
    debug!(airports = catalog.geo_index().len(), "catalog loaded");

    match cli.command {
        Command::Find { icao } => {
            let airport = require_airport(&catalog, &icao)?;
            println!("{}", output::airport_summary(&airport));
        }
        Command::Country { code } => {
            for airport in catalog.airports_in_country(&code)? {
                println!("{}", output::airport_line(&airport, None));
            }
        }
        Command::Nearest {
            latitude,
            longitude,
            count,
        } => {
            let point = Coordinate::new(latitude, longitude)?;
            let count = count.unwrap_or(settings.nearest_count);
            for airport in catalog.nearest_airports(point, count) {
                let distance = airport.position.map(|p| geo::haversine_nm(point, p));
                println!("{}", output::airport_line(&airport, distance));
            }
        }
        Command::Radius {
            latitude,
            longitude,
            radius_nm,
        } => {
            let point = Coordinate::new(latitude, longitude)?;
            for airport in catalog.airports_within_radius(point, radius_nm) {
                let distance = airport.position.map(|p| geo::haversine_nm(point, p));
                println!("{}", output::airport_line(&airport, distance));
            }
        }
        Command::Route { icaos, corridor_nm } => {
            let corridor = corridor_nm.unwrap_or(settings.corridor_nm);
            let mut points = Vec::with_capacity(icaos.len());
            for icao in &icaos {
                let airport = require_airport(&catalog, icao)?;
                points.push(airport_position(&airport)?);
            }
            for airport in catalog.airports_along_route(&points, corridor)? {
                println!("{}", output::airport_line(&airport, None));
            }
        }
        Command::Border {
            from,
            to,
            corridor_nm,
        } => {
            let corridor = corridor_nm.unwrap_or(settings.corridor_nm);
            let from = require_airport(&catalog, &from)?;
            let to = require_airport(&catalog, &to)?;
            let crossings = catalog.border_crossing_points(&from, &to, corridor)?;
            if crossings.is_empty() {
                println!(
                    "No designated border-crossing airport between {} and {}",
                    from.icao, to.icao
                );
            }
            for crossing in crossings {
                println!("{}", output::crossing_line(&crossing));
            }
        }
        Command::BestRunway {
            icao,
            wind,
            crosswind_limit_kt,
        } => {
            let observation = wind_arg::parse_wind(&wind)?;
            let airport = require_airport(&catalog, &icao)?;
            let limit = crosswind_limit_kt.or(settings.crosswind_limit_kt);
            let selection = airport_catalog::best_runway(&airport, &observation, limit)
                .ok_or_else(|| ApplicationError::NoRunwayToSelect(airport.icao.clone()))?;
            println!(
                "{}",
                output::selection_report(&airport, &observation, &selection)
            );
        }
    }
    Ok(())
}

fn main() -> ApplicationResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    run()
}
