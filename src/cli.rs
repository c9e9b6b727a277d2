use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Municlim municipality-level climate aggregation pipeline.
#[derive(Parser)]
#[command(
    name = "municlim",
    version,
    about = "Mean annual temperature per municipality from monthly rasters"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Dissolve a boundary layer into one area-of-interest mask.
    Dissolve(DissolveArgs),
    /// Clip monthly rasters to a dissolved mask.
    Clip(ClipArgs),
    /// Aggregate monthly rasters to one annual mean per municipality.
    Aggregate(AggregateArgs),
    /// Compute summary tables from an annual result table.
    Summarize(SummarizeArgs),
}

/// Arguments for the `dissolve` subcommand.
#[derive(clap::Args)]
pub struct DissolveArgs {
    /// Path to the input boundary GeoJSON.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the dissolved mask GeoJSON.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `clip` subcommand.
#[derive(clap::Args)]
pub struct ClipArgs {
    /// Path to the dissolved mask GeoJSON.
    #[arg(short, long)]
    pub mask: PathBuf,

    /// Directory holding the monthly raster files.
    #[arg(short, long)]
    pub rasters: PathBuf,

    /// Directory for the clipped rasters (created if absent).
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `aggregate` subcommand.
#[derive(clap::Args)]
pub struct AggregateArgs {
    /// Path to the municipality boundary GeoJSON.
    #[arg(short, long)]
    pub boundaries: PathBuf,

    /// Directory holding the 12 monthly raster files.
    #[arg(short, long)]
    pub rasters: PathBuf,

    /// Path for the annual result CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Process a single calendar month instead of the full year.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,

    /// Process only the first N municipalities.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Override the unit-scale factor instead of detecting it per raster.
    #[arg(short, long)]
    pub scale: Option<f64>,

    /// Log per-raster diagnostics (valid-cell counts, value ranges).
    #[arg(short, long)]
    pub debug: bool,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `summarize` subcommand.
#[derive(clap::Args)]
pub struct SummarizeArgs {
    /// Path to the annual result CSV produced by `aggregate`.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory for the summary tables (created if absent).
    #[arg(short, long)]
    pub output: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
