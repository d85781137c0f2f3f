//! CLI argument definitions for paleolatitude

use clap::{Parser, Subcommand, ValueEnum};
use paleo_apwp::DEFAULT_REFERENCE_FRAME;
use std::path::PathBuf;

pub const ABOUT: &str = "\
This is PaleoLatitude (http://www.paleolatitude.org)
Source code licensed under the GNU Lesser GPL (LGPL) version 3.0";

pub const CITATION: &str = "\
Please cite:
  Douwe J.J. van Hinsbergen, Lennart V. de Groot, Sebastiaan J. van Schaik,
  Appy Sluijs, Peter K. Bijl, Wim Spakman, Cor G. Langereis, Henk Brinkhuis:
  A Paleolatitude Calculator for Paleoclimate Studies
  In: PLoS ONE, 2015 (http://doi.org/10.1371/journal.pone.0126946).";

#[derive(Parser)]
#[command(name = "paleolatitude")]
#[command(about = "Paleolatitude of a site from an apparent polar wander path")]
#[command(version)]
#[command(before_long_help = ABOUT)]
#[command(after_long_help = CITATION)]
pub struct Cli {
    /// Print additional debugging information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the paleolatitude of a site at a given age
    Compute(ComputeArgs),

    /// List the reference frames found in the data directory
    ListFrames(ListArgs),

    /// Print version, license and citation information
    About,
}

#[derive(Parser)]
pub struct DataArgs {
    /// Directory holding apwp-<frame>.csv files
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

#[derive(Parser)]
pub struct ListArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Also list the plates in this outline CSV
    #[arg(long)]
    pub plates: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ComputeArgs {
    /// Present-day site latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Present-day site longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Age in million years before present
    #[arg(long)]
    pub age: f64,

    /// Paleomagnetic reference frame whose APWP is interpolated
    #[arg(long, default_value = DEFAULT_REFERENCE_FRAME)]
    pub pm_ref_frame: String,

    /// Rotate the pole into this frame before computing
    #[arg(long)]
    pub target_frame: Option<String>,

    /// Extrapolate beyond the dated window instead of failing
    #[arg(long)]
    pub allow_extrapolation: bool,

    /// CSV of finite rotations (from,to,age,lat,lon,angle; blank age = fixed)
    #[arg(long)]
    pub rotations: Option<PathBuf>,

    /// CSV of plate outlines (plate_id,name,part,lat,lon); the site's plate
    /// becomes the target frame unless --target-frame is given
    #[arg(long)]
    pub plates: Option<PathBuf>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
