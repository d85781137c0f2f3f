//! paleolatitude: command-line front end for the APWP engine
//!
//! Reads `apwp-<frame>.csv` files from a data directory, runs one
//! paleolatitude computation and prints it as a table or JSON.

mod cli;
mod load;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ComputeArgs, ListArgs, OutputFormat};
use paleo_apwp::plates::plate_frame_id;
use paleo_apwp::{ComputeOptions, PaleolatitudeCalculator, PaleolatitudeResult, Site};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match &cli.command {
        Commands::Compute(args) => compute(args),
        Commands::ListFrames(args) => list_frames(args),
        Commands::About => {
            println!("{}\n\n{}", cli::ABOUT, cli::CITATION);
            Ok(())
        }
    }
}

fn compute(args: &ComputeArgs) -> Result<()> {
    let catalog = load::load_catalog(&args.data.data_dir)?;
    let rotations = args
        .rotations
        .as_deref()
        .map(load::load_rotations)
        .transpose()?;
    let plates = args.plates.as_deref().map(load::load_plates).transpose()?;

    let site = Site::new(args.lat, args.lon, args.age)?;
    let mut options = ComputeOptions::new(&args.pm_ref_frame)
        .with_extrapolation(args.allow_extrapolation);
    if let Some(target) = &args.target_frame {
        options = options.with_target_frame(target);
    }

    let mut calculator = PaleolatitudeCalculator::new(&catalog);
    if let Some(table) = &rotations {
        calculator = calculator.with_rotations(table);
    }
    if let Some(index) = &plates {
        calculator = calculator.with_plates(index);
    }

    let frame = &options.reference_frame;
    let result = calculator
        .compute(&site, &options)
        .with_context(|| format!("Computation failed for frame '{frame}'"))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_table(&site, &result),
    }
    Ok(())
}

fn print_table(site: &Site, result: &PaleolatitudeResult) {
    let (lat, lon) = (site.latitude_deg(), site.longitude_deg());
    println!("Site:             {lat:.4}°, {lon:.4}°");
    println!("Age:              {} Ma", result.age_ma);
    println!("Reference frame:  {}", result.reference_frame);
    if let (Some(id), Some(name)) = (result.plate_id, &result.plate_name) {
        println!("Plate:            {} ({})", name, id);
    }
    if let Some(target) = &result.target_frame {
        println!("Rotated into:     {}", target);
    }
    println!(
        "Pole used:        {:.2}°, {:.2}° (A95 {:.2}°)",
        result.pole_used.latitude_deg(),
        result.pole_used.longitude_deg(),
        result.pole_used.a95_deg()
    );
    println!(
        "Paleolatitude:    {:.2}° ± {:.2}°  [{:.2}°, {:.2}°]",
        result.paleolatitude_deg,
        result.confidence_interval_deg,
        result.paleolatitude_min_deg,
        result.paleolatitude_max_deg
    );
    if result.extrapolated {
        println!("Note:             extrapolated beyond the dated window");
    }
    println!("\n{}", cli::CITATION);
}

fn list_frames(args: &ListArgs) -> Result<()> {
    let files = load::discover(&args.data.data_dir)?;
    for (frame, path) in &files {
        println!("{:<40} {}", frame, path.display());
    }

    if let Some(path) = &args.plates {
        let plates = load::load_plates(path)?;
        for id in plates.plate_ids() {
            let name = plates.plate_name(id).unwrap_or_default();
            println!("{:<40} {}", plate_frame_id(id), name);
        }
    }
    Ok(())
}
