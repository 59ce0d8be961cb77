//! Defines command-line interface options using `clap` for the zonal-grid tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zonal_grid::grid::ElementType;

/// A CLI tool for zonal statistics over raster grids
#[derive(Parser, Debug)]
#[command(
    name = "zonal-grid",
    version,
    about = "Zonal means and temperature-humidity index over text raster grids"
)]
pub struct Args {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace every cell of a measurement grid by the mean of its zone
    Zonal(ZonalArgs),
    /// Compute the temperature-humidity index and heat-stress mask
    Thi(ThiArgs),
}

#[derive(clap::Args, Debug)]
pub struct ZonalArgs {
    /// Path to the zone grid (integer identifiers)
    #[arg(short, long)]
    pub zones: PathBuf,

    /// Path to the measurement grid
    #[arg(long)]
    pub values: PathBuf,

    /// Element type of the zone grid (int8..int64, uint8..uint64, float32, float64)
    #[arg(long, default_value = "int64", value_parser = parse_element_type)]
    pub zone_type: ElementType,

    /// Element type of the measurement grid
    #[arg(long, default_value = "float64", value_parser = parse_element_type)]
    pub value_type: ElementType,

    /// Digits kept after the decimal point in zone means
    #[arg(long, default_value_t = 1)]
    pub decimals: u32,

    /// Shard the aggregation across the thread pool
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Path to save the aggregated grid as NetCDF. If not set, prints to terminal.
    #[arg(long)]
    pub output_netcdf: Option<PathBuf>,

    /// Print a JSON report instead of plain text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ThiArgs {
    /// Path to the temperature grid
    #[arg(long)]
    pub temperature: PathBuf,

    /// Path to the relative humidity grid (percent)
    #[arg(long)]
    pub humidity: PathBuf,

    /// THI above which a cell counts as under serious stress
    #[arg(long, default_value_t = zonal_grid::thi::DEFAULT_STRESS_THRESHOLD)]
    pub threshold: f64,
}

fn parse_element_type(s: &str) -> Result<ElementType, String> {
    s.parse::<ElementType>().map_err(|e| e.to_string())
}
