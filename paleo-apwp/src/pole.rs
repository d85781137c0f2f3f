//! Dated paleomagnetic pole estimates.
//!
//! A [`PoleRecord`] is one row of an apparent polar wander path: the position
//! of the paleomagnetic north pole at a given age, with the half-angle of its
//! 95% confidence cone (A95).
//!
//! Records are validated and normalized on construction. Longitudes are
//! stored in [-180°, 180°), so `350°E` and `-10°` describe the same record.

use crate::{ApwpError, ApwpResult};
use paleo_core::utils::normalize_longitude;
use paleo_core::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound accepted for A95; a cone wider than a hemisphere carries no information.
pub const MAX_A95_DEG: f64 = 90.0;

/// One dated paleomagnetic pole estimate.
///
/// Deserialized records pass through [`PoleRecord::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PoleRecord {
    age_ma: f64,
    latitude_deg: f64,
    longitude_deg: f64,
    a95_deg: f64,
}

impl PoleRecord {
    /// Validates and normalizes a pole record.
    ///
    /// - `age_ma`: finite and non-negative (million years before present)
    /// - `latitude_deg`: within [-90°, 90°]
    /// - `longitude_deg`: finite, within [-360°, 360°]; normalized to [-180°, 180°)
    /// - `a95_deg`: finite, within [0°, 90°]
    ///
    /// Violations are reported as [`ApwpError::InvalidInput`]; dataset
    /// construction re-labels them as integrity errors with the record index.
    ///
    /// ```
    /// use paleo_apwp::PoleRecord;
    ///
    /// let pole = PoleRecord::new(10.0, 86.5, 350.0, 2.6).unwrap();
    /// assert_eq!(pole.longitude_deg(), -10.0);
    /// assert!(PoleRecord::new(-1.0, 86.5, 0.0, 2.6).is_err());
    /// ```
    pub fn new(
        age_ma: f64,
        latitude_deg: f64,
        longitude_deg: f64,
        a95_deg: f64,
    ) -> ApwpResult<Self> {
        if !age_ma.is_finite() || age_ma < 0.0 {
            return Err(ApwpError::invalid_input(
                "pole age",
                format!("{} Ma is not a finite non-negative age", age_ma),
            ));
        }
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ApwpError::invalid_input(
                "pole latitude",
                format!("{}° is outside [-90°, 90°]", latitude_deg),
            ));
        }
        if !longitude_deg.is_finite() || !(-360.0..=360.0).contains(&longitude_deg) {
            return Err(ApwpError::invalid_input(
                "pole longitude",
                format!("{}° is outside [-360°, 360°]", longitude_deg),
            ));
        }
        if !a95_deg.is_finite() || !(0.0..=MAX_A95_DEG).contains(&a95_deg) {
            return Err(ApwpError::invalid_input(
                "A95",
                format!("{}° is outside [0°, {}°]", a95_deg, MAX_A95_DEG),
            ));
        }

        Ok(Self {
            age_ma,
            latitude_deg,
            longitude_deg: normalize_longitude(longitude_deg),
            a95_deg,
        })
    }

    /// Builds a record from a direction on the sphere.
    ///
    /// Used for derived poles (interpolated or rotated). The direction is
    /// normalized, so any non-zero vector is accepted; inputs are assumed
    /// already valid and are not re-checked beyond clamping. A95 saturates
    /// at [`MAX_A95_DEG`], which bounds linearly extrapolated cones.
    pub fn from_unit_vector(age_ma: f64, direction: Vector3, a95_deg: f64) -> Self {
        let (latitude_deg, longitude_deg) = direction.normalize().to_lat_lon_deg();
        Self {
            age_ma,
            latitude_deg,
            longitude_deg: normalize_longitude(longitude_deg),
            a95_deg: a95_deg.clamp(0.0, MAX_A95_DEG),
        }
    }

    pub fn age_ma(&self) -> f64 {
        self.age_ma
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn a95_deg(&self) -> f64 {
        self.a95_deg
    }

    /// Unit vector pointing at the pole.
    pub fn to_unit_vector(&self) -> Vector3 {
        Vector3::from_lat_lon_deg(self.latitude_deg, self.longitude_deg)
    }

    /// Same pole position and uncertainty, re-dated.
    pub fn with_age(self, age_ma: f64) -> Self {
        Self { age_ma, ..self }
    }

    /// Great-circle distance to another pole, in degrees.
    pub fn angular_distance_deg(&self, other: &Self) -> f64 {
        paleo_core::math::angular_distance_deg(
            self.latitude_deg,
            self.longitude_deg,
            other.latitude_deg,
            other.longitude_deg,
        )
    }
}

impl std::fmt::Display for PoleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Ma: pole ({:.2}°, {:.2}°) A95={:.2}°",
            self.age_ma, self.latitude_deg, self.longitude_deg, self.a95_deg
        )
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PoleRecordFields {
    age_ma: f64,
    latitude_deg: f64,
    longitude_deg: f64,
    a95_deg: f64,
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PoleRecord {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let f = PoleRecordFields::deserialize(d)?;
        PoleRecord::new(f.age_ma, f.latitude_deg, f.longitude_deg, f.a95_deg)
            .map_err(serde::de::Error::custom)
    }
}
