//! Spherical geometry for paleomagnetic reconstructions.
//!
//! `paleo-core` provides the numerical building blocks used by the APWP
//! engine: unit vectors on the sphere, great-circle interpolation, finite
//! rotations and angular distances. Everything is pure arithmetic with no
//! I/O and no shared state.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matrix`] | [`Vector3`] (lat/lon conversion, slerp) and [`RotationMatrix3`] (Rodrigues, axis-angle) |
//! | [`math`] | Great-circle distance (Vincenty) |
//! | [`utils`] | Longitude/latitude normalization |
//! | [`constants`] | π multiples, degree/radian factors, tolerances |
//!
//! # Design Notes
//!
//! - **Degrees at the edges, radians inside**: geographic inputs and outputs
//!   are degrees; trigonometry works in radians.
//! - **Vectors, not components**: interpolating latitude and longitude
//!   separately is wrong near the poles and across the antimeridian, so
//!   every interpolation goes through [`Vector3::slerp`].
//! - **Longitude convention**: [-180°, 180°).

pub mod constants;
pub mod math;
pub mod matrix;
pub mod utils;

pub use matrix::{RotationMatrix3, Vector3};
