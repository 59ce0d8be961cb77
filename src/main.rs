//! Entry point for the zonal-grid command-line tool.
//! Handles CLI parsing, grid loading, and dispatches zonal aggregation or THI computation.

use clap::Parser;
use serde_json::json;
use std::process;
use zonal_grid::prelude::*;
use zonal_grid::statistics::round_half_even;
use zonal_grid::thi::{has_no_nulls, stress_mask, summary, temperature_humidity_index};

mod cli;
mod logging;

use cli::{Args, Command, ThiArgs, ZonalArgs};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    ParallelConfig::new(args.threads).setup_global_pool()?;

    match args.command {
        Command::Zonal(zonal_args) => run_zonal(zonal_args),
        Command::Thi(thi_args) => run_thi(thi_args),
    }
}

fn run_zonal(args: ZonalArgs) -> Result<()> {
    let zones = load_grid(&args.zones, args.zone_type)?;
    let values = load_grid(&args.values, args.value_type)?;

    let mode = if args.parallel {
        ProcessingMode::Parallel
    } else {
        ProcessingMode::Sequential
    };
    let aggregator = ZonalAggregator::new(
        AggregatorConfig::default()
            .with_decimals(args.decimals)
            .with_mode(mode),
    );
    let (result, zone_means) = aggregator.aggregate_with_means_any(&zones, &values)?;
    let zone_set: ZoneSet = zone_means.iter().map(|m| m.zone).collect();
    // Printing and NetCDF output work on f64 regardless of the measurement type
    let result = result.to_f64();

    if args.json {
        let means: Vec<_> = zone_means
            .iter()
            .map(|m| {
                json!({
                    "zone": m.zone,
                    "count": m.count,
                    "mean": round_half_even(m.mean, args.decimals),
                })
            })
            .collect();
        let report = json!({
            "zones": zone_set.to_vec(),
            "shape": result.shape(),
            "means": means,
            "grid": result.to_rows(),
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| ZonalError::Generic(format!("Failed to serialize report: {e}")))?;
        println!("{text}");
    } else {
        println!("{zone_set}");
        println!("{}", result.view());
    }

    if let Some(output_path) = args.output_netcdf {
        let long_name = format!("Zonal mean of {}", args.values.display());
        write_grid_to_netcdf(&result, "zonal_mean", &long_name, &output_path)?;
        println!("✅ Saved result to {}", output_path.display());
    }

    Ok(())
}

fn run_thi(args: ThiArgs) -> Result<()> {
    let temperature: Grid<f64> = load_typed(&args.temperature)?;
    let humidity: Grid<f64> = load_typed(&args.humidity)?;

    for (name, grid) in [("temperature", &temperature), ("humidity", &humidity)] {
        let stats = summary(grid)?;
        println!(
            "{name}: min={} max={} mean={} std={}",
            stats.min, stats.max, stats.mean, stats.std
        );
        println!("{name} valid (no NaN): {}", has_no_nulls(grid));
    }

    let thi = temperature_humidity_index(&temperature, &humidity)?;
    println!("{}", thi.view());

    let config = ThiConfig {
        stress_threshold: args.threshold,
    };
    let mask = stress_mask(&thi, &config);
    let stressed = mask.iter().filter(|&&s| s).count();
    println!("{mask}");
    println!("Stressed cells: {stressed} of {}", mask.len());

    Ok(())
}
