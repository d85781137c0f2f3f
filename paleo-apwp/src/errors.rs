//! Error types for APWP loading and paleolatitude queries.
//!
//! | Variant | Raised by | When |
//! |---------|-----------|------|
//! | [`DataIntegrity`](ApwpError::DataIntegrity) | dataset, catalog, rotation-table and plate construction | malformed or non-monotonic records, duplicate ids |
//! | [`UnknownFrame`](ApwpError::UnknownFrame) | catalog lookup, rotator | frame not loaded, or no rotation chain between frames |
//! | [`OutOfRange`](ApwpError::OutOfRange) | interpolator, rotation table | age outside the dated window and extrapolation not allowed |
//! | [`InvalidInput`](ApwpError::InvalidInput) | query construction | non-finite or out-of-range site coordinates or age |
//! | [`PlateLookup`](ApwpError::PlateLookup) | plate index, calculator | site on no plate, on overlapping plates, or on an unconstrained plate |
//!
//! All variants are plain data: nothing in this crate holds resources, so
//! every error is safe to report and retry with different inputs. Retrying
//! with the same inputs always yields the same error.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type ApwpResult<T> = Result<T, ApwpError>;

/// Why a frame could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameErrorKind {
    /// No dataset is registered for the frame id.
    NotInCatalog,
    /// No chain of finite rotations connects the two frames.
    NoRotationPath,
}

/// Why a site could not be placed on a usable plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlateErrorKind {
    /// No plate polygon contains the site.
    NoPlate,
    /// Two plates contain the site and neither lies inside the other.
    Overlapping,
    /// The site sits on a mobile belt with no rigid-plate motion model.
    Unconstrained,
}

/// Fieldless discriminant of [`ApwpError`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DataIntegrity,
    UnknownFrame,
    OutOfRange,
    InvalidInput,
    PlateLookup,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ApwpError {
    #[error("Data integrity violation in '{frame}' at record {index}: {message}")]
    DataIntegrity {
        frame: String,
        index: usize,
        message: String,
    },

    #[error("Unknown reference frame '{frame}' ({kind:?}): {message}")]
    UnknownFrame {
        frame: String,
        kind: FrameErrorKind,
        message: String,
    },

    #[error("Age {age_ma} Ma outside dated window [{min_age_ma}, {max_age_ma}] Ma of '{frame}'")]
    OutOfRange {
        frame: String,
        age_ma: f64,
        min_age_ma: f64,
        max_age_ma: f64,
    },

    #[error("Invalid {parameter}: {message}")]
    InvalidInput { parameter: String, message: String },

    #[error("No usable plate at ({latitude_deg}°, {longitude_deg}°) ({kind:?}): {message}")]
    PlateLookup {
        latitude_deg: f64,
        longitude_deg: f64,
        kind: PlateErrorKind,
        message: String,
    },
}

impl ApwpError {
    pub fn data_integrity(frame: &str, index: usize, message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            frame: frame.to_string(),
            index,
            message: message.into(),
        }
    }

    pub fn unknown_frame(frame: &str) -> Self {
        Self::UnknownFrame {
            frame: frame.to_string(),
            kind: FrameErrorKind::NotInCatalog,
            message: "no dataset registered for this frame".to_string(),
        }
    }

    pub fn no_rotation_path(from: &str, to: &str) -> Self {
        Self::UnknownFrame {
            frame: to.to_string(),
            kind: FrameErrorKind::NoRotationPath,
            message: format!("no finite rotation chain from '{}' to '{}'", from, to),
        }
    }

    pub fn out_of_range(frame: &str, age_ma: f64, min_age_ma: f64, max_age_ma: f64) -> Self {
        Self::OutOfRange {
            frame: frame.to_string(),
            age_ma,
            min_age_ma,
            max_age_ma,
        }
    }

    pub fn invalid_input(parameter: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    pub fn plate_lookup(
        latitude_deg: f64,
        longitude_deg: f64,
        kind: PlateErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::PlateLookup {
            latitude_deg,
            longitude_deg,
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DataIntegrity { .. } => ErrorKind::DataIntegrity,
            Self::UnknownFrame { .. } => ErrorKind::UnknownFrame,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::PlateLookup { .. } => ErrorKind::PlateLookup,
        }
    }
}
