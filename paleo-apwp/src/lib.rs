//! Apparent polar wander path (APWP) interpolation and paleolatitude computation.
//!
//! Given a present-day site and a geologic age, `paleo-apwp` estimates the
//! latitude the site occupied at that age from a chosen APWP: a dated series
//! of paleomagnetic poles expressed in a named reference frame.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pole`] | [`PoleRecord`], one validated pole estimate with A95 |
//! | [`dataset`] | [`ApwpDataset`], one frame's strictly age-ordered series and age bracketing |
//! | [`interpolate`] | [`SphericalInterpolator`], great-circle interpolation and opt-in extrapolation |
//! | [`rotation`] | [`FiniteRotation`], [`RotationTable`] and [`ReferenceFrameRotator`] |
//! | [`catalog`] | [`ApwpCatalog`], frame id → dataset registry |
//! | [`plates`] | [`PlateIndex`], plate outlines and site-to-plate lookup |
//! | [`calculator`] | [`PaleolatitudeCalculator`], the end-to-end request |
//! | [`errors`] | [`ApwpError`] and [`ErrorKind`] |
//!
//! # Example
//!
//! ```
//! use paleo_apwp::{ApwpCatalog, ApwpDataset, ComputeOptions, PaleolatitudeCalculator, Site};
//!
//! let rows = [
//!     (0.0, 90.0, 0.0, 0.0),
//!     (10.0, 86.0, 170.0, 2.0),
//!     (20.0, 84.0, 160.0, 2.5),
//! ];
//! let dataset = ApwpDataset::from_rows("demo-frame", rows)?;
//! let catalog = ApwpCatalog::from_datasets([dataset])?;
//!
//! let site = Site::new(52.0, 5.0, 15.0)?;
//! let result = PaleolatitudeCalculator::new(&catalog)
//!     .compute(&site, &ComputeOptions::new("demo-frame"))?;
//!
//! assert!(result.paleolatitude_min_deg <= result.paleolatitude_deg);
//! assert!(result.paleolatitude_deg <= result.paleolatitude_max_deg);
//! # Ok::<(), paleo_apwp::ApwpError>(())
//! ```
//!
//! # Design Notes
//!
//! - **No hidden selection state**: every request names its frame in
//!   [`ComputeOptions`]; an unknown frame is an error, never a fallback.
//! - **Immutable after load**: datasets, catalog and rotation table are
//!   read-only once built and are `Send + Sync`.
//! - **No I/O**: parsing files is left to callers; the optional
//!   `paleolatitude` binary (feature `cli`) is one such caller.

pub mod calculator;
pub mod catalog;
pub mod dataset;
pub mod errors;
pub mod interpolate;
pub mod plates;
pub mod pole;
pub mod rotation;

pub use calculator::{
    ComputeOptions, PaleolatitudeCalculator, PaleolatitudeResult, Site, DEFAULT_REFERENCE_FRAME,
};
pub use catalog::ApwpCatalog;
pub use dataset::{ApwpDataset, Bracket};
pub use errors::{ApwpError, ApwpResult, ErrorKind, FrameErrorKind, PlateErrorKind};
pub use interpolate::{InterpolatedPole, SphericalInterpolator};
pub use plates::{PlateIndex, PlatePolygon};
pub use pole::PoleRecord;
pub use rotation::{DatedRotation, FiniteRotation, ReferenceFrameRotator, RotationTable};
