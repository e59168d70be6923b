//! PlaceGrid CLI - Command-line interface
//!
//! This binary provides a command-line interface to the PlaceGrid library.

mod error;

use std::path::PathBuf;

use clap::Parser;

use placegrid::config::ConfigFile;
use placegrid::geo::{Rectangle, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use placegrid::logging::init_logging;
use placegrid::pacing::FixedDelayPacer;
use placegrid::provider::{GooglePlacesProvider, ReqwestClient};
use placegrid::service::{search_places, SearchJob};

use error::CliError;

#[derive(Parser)]
#[command(name = "placegrid")]
#[command(version = placegrid::VERSION)]
#[command(about = "Search every place inside a geographic region", long_about = None)]
struct Args {
    /// South-west corner latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    sw_lat: f64,

    /// South-west corner longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    sw_lon: f64,

    /// North-east corner latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    ne_lat: f64,

    /// North-east corner longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    ne_lon: f64,

    /// Place types to include (comma-separated, e.g. "lodging,restaurant")
    #[arg(long, value_delimiter = ',')]
    types: Vec<String>,

    /// CSV output path (export skipped when omitted)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Coverage map HTML output path (export skipped when omitted)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Initial grid divisions per axis (defaults to the config file value)
    #[arg(long)]
    divisions: Option<u32>,

    /// Places API key (falls back to ~/.placegrid/config.ini)
    #[arg(long)]
    api_key: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    validate_bounds(&args)?;
    if args.types.is_empty() {
        return Err(CliError::NoTypes);
    }

    let config = ConfigFile::load().map_err(CliError::Config)?;
    let _logging_guard = init_logging(&config.logging.directory, &config.logging.file)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let api_key = args
        .api_key
        .or(config.provider.api_key)
        .ok_or(CliError::MissingApiKey)?;

    let http_client =
        ReqwestClient::with_timeout(config.provider.timeout).map_err(CliError::HttpClient)?;
    let provider = GooglePlacesProvider::new(http_client, FixedDelayPacer::default(), api_key);

    let region = Rectangle::new(args.sw_lat, args.sw_lon, args.ne_lat, args.ne_lon);
    let mut job = SearchJob::new(region, args.types);
    job.csv_path = args.csv;
    job.map_path = args.map;
    job.divisions = args.divisions.unwrap_or(config.search.divisions);
    job.max_density_depth = config.search.max_density_depth;

    println!("Searching region {}", region);
    let outcome = search_places(&provider, &job).map_err(CliError::Search)?;

    println!(
        "Found {} unique places across {} leaf queries",
        outcome.places.len(),
        outcome.log.len()
    );
    if let Some(path) = &job.csv_path {
        println!("Results saved to {}", path.display());
    }
    if let Some(path) = &job.map_path {
        println!("Coverage map saved to {}", path.display());
    }

    Ok(())
}

fn validate_bounds(args: &Args) -> Result<(), CliError> {
    for (name, lat) in [("--sw-lat", args.sw_lat), ("--ne-lat", args.ne_lat)] {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CliError::InvalidBounds(format!(
                "{} {} is outside {}..{}",
                name, lat, MIN_LAT, MAX_LAT
            )));
        }
    }
    for (name, lon) in [("--sw-lon", args.sw_lon), ("--ne-lon", args.ne_lon)] {
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CliError::InvalidBounds(format!(
                "{} {} is outside {}..{}",
                name, lon, MIN_LON, MAX_LON
            )));
        }
    }
    if args.sw_lat > args.ne_lat {
        return Err(CliError::InvalidBounds(format!(
            "south-west latitude {} is north of north-east latitude {}",
            args.sw_lat, args.ne_lat
        )));
    }
    if args.sw_lon > args.ne_lon {
        return Err(CliError::InvalidBounds(format!(
            "south-west longitude {} is east of north-east longitude {}",
            args.sw_lon, args.ne_lon
        )));
    }
    Ok(())
}
