//! Region assignment command.
//!
//! Loads a point table and a region table, tags every point with the code
//! of the first region containing it, and writes the result as CSV.

mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ecowater::loaders::{load_points, load_regions, write_table, CsvOptions};
use ecowater::pip::{build_points_into, RegionCodeResolver};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "assign")]
#[command(about = "Assign region codes to point observations")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Point table (CSV, optionally .gz)
    #[arg(short, long)]
    points: Option<PathBuf>,

    /// Region table (GeoJSON)
    #[arg(short, long)]
    regions: Option<PathBuf>,

    /// Output CSV file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Region property holding the code
    #[arg(long)]
    code_field: Option<String>,

    /// Longitude field of the point table
    #[arg(long)]
    longitude: Option<String>,

    /// Latitude field of the point table
    #[arg(long)]
    latitude: Option<String>,

    /// Point table delimiter
    #[arg(long)]
    delimiter: Option<char>,

    /// Payload field kept as text when payload types are inferred (repeatable)
    #[arg(long = "text-field")]
    text_fields: Vec<String>,

    /// Infer numbers and booleans in payload fields instead of copying them verbatim
    #[arg(long)]
    infer_payload: bool,

    /// Keep points that fall in no region
    #[arg(long)]
    keep_empty: bool,

    /// Evaluate regions on a single thread
    #[arg(long)]
    sequential: bool,
}

impl Args {
    /// Command-line flags override the config file
    fn merge_into(self, mut config: Config) -> Config {
        if self.points.is_some() {
            config.points.path = self.points;
        }
        if self.regions.is_some() {
            config.regions.path = self.regions;
        }
        if self.output.is_some() {
            config.output.path = self.output;
        }
        if let Some(field) = self.code_field {
            config.resolver.code_field = field;
        }
        if let Some(field) = self.longitude {
            config.points.longitude = field;
        }
        if let Some(field) = self.latitude {
            config.points.latitude = field;
        }
        if let Some(delimiter) = self.delimiter {
            config.points.delimiter = delimiter;
        }
        if !self.text_fields.is_empty() {
            config.points.text_fields = self.text_fields;
        }
        if self.infer_payload {
            config.points.raw_payload = false;
        }
        if self.keep_empty {
            config.resolver.remove_empty = false;
        }
        if self.sequential {
            config.resolver.parallel = false;
        }
        config
    }
}

/// CSV reading options for the point table described by `config`
fn csv_options(config: &Config) -> Result<CsvOptions> {
    let delimiter = u8::try_from(config.points.delimiter)
        .context("Delimiter must be a single-byte character")?;
    let infer_only = config.points.raw_payload.then(|| {
        vec![
            config.points.longitude.clone(),
            config.points.latitude.clone(),
        ]
    });

    Ok(CsvOptions {
        delimiter,
        text_fields: config.points.text_fields.clone(),
        infer_only,
    })
}

fn main() -> Result<()> {
    // Initialize logging; logs go to stderr so stdout can carry the table
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    let config = args.merge_into(config);

    let points_path = config
        .points
        .path
        .as_ref()
        .context("No point table given (--points or [points] path)")?;
    let regions_path = config
        .regions
        .path
        .as_ref()
        .context("No region table given (--regions or [regions] path)")?;

    let raw = load_points(points_path, &csv_options(&config)?)?;
    let regions = load_regions(regions_path)?;

    let resolver = RegionCodeResolver::new(config.resolver.clone());
    let options = resolver.options();

    let points = build_points_into(
        &raw,
        &config.points.longitude,
        &config.points.latitude,
        &options.geometry_field,
    )
    .context("Failed to build point geometries")?;

    let assigned = resolver
        .assign(&points, &regions)
        .context("Failed to assign region codes")?;

    info!(
        "Assigned '{}' to {} of {} points ({} regions)",
        options.code_field,
        assigned
            .column(&options.code_field)?
            .filter(|v| !v.is_null())
            .count(),
        raw.len(),
        regions.len()
    );

    match &config.output.path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_table(&assigned, BufWriter::new(file))?;
            info!("Wrote {} rows to {}", assigned.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_table(&assigned, &mut lock)?;
            lock.flush()?;
        }
    }

    Ok(())
}
