//! Paleolatitude of a site from an interpolated paleomagnetic pole.
//!
//! For a site at great-circle distance `p` from the paleopole, the
//! paleolatitude is `λ = 90° − p`: positive in the hemisphere of the
//! paleomagnetic north pole. The pole's A95 is carried through the axial
//! dipole field:
//!
//! ```text
//! I   = atan(2 tan λ)                inclination at the site
//! ΔI  = 2·A95 / (1 + 3 cos² p)       inclination uncertainty
//! λ±  = atan(½ tan(I ± ΔI))          paleolatitude bounds
//! ```
//!
//! A bound whose inclination passes a pole saturates at ±90° rather than
//! wrapping into the other hemisphere, which keeps the interval monotone in
//! A95. The reported confidence interval is the larger of the two
//! half-widths.
//!
//! With a [`PlateIndex`] attached and no explicit target frame, the pole is
//! rotated into the frame of the plate the site sits on
//! ([`plate_frame_id`](crate::plates::plate_frame_id)). Sites on mobile
//! belts are rejected.

use paleo_core::constants::{DEG_TO_RAD, RAD_TO_DEG};
use paleo_core::utils::normalize_longitude;

use crate::errors::PlateErrorKind;
use crate::interpolate::SphericalInterpolator;
use crate::plates::{PlateIndex, PlatePolygon};
use crate::rotation::{ReferenceFrameRotator, RotationTable};
use crate::{ApwpCatalog, ApwpError, ApwpResult, PoleRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Frame used when a request does not name one.
pub const DEFAULT_REFERENCE_FRAME: &str = "torsvik-2012-vandervoo-2015";

/// A present-day location queried at a past age.
///
/// Deserialized sites pass through [`Site::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Site {
    latitude_deg: f64,
    longitude_deg: f64,
    age_ma: f64,
}

impl Site {
    /// Validates coordinates and age; longitude is normalized to [-180°, 180°).
    pub fn new(latitude_deg: f64, longitude_deg: f64, age_ma: f64) -> ApwpResult<Self> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ApwpError::invalid_input(
                "site latitude",
                format!("{}° is outside [-90°, 90°]", latitude_deg),
            ));
        }
        if !longitude_deg.is_finite() || !(-360.0..=360.0).contains(&longitude_deg) {
            return Err(ApwpError::invalid_input(
                "site longitude",
                format!("{}° is outside [-360°, 360°]", longitude_deg),
            ));
        }
        if !age_ma.is_finite() || age_ma < 0.0 {
            return Err(ApwpError::invalid_input(
                "age",
                format!("{} Ma is not a finite non-negative age", age_ma),
            ));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg: normalize_longitude(longitude_deg),
            age_ma,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn age_ma(&self) -> f64 {
        self.age_ma
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SiteFields {
    latitude_deg: f64,
    longitude_deg: f64,
    age_ma: f64,
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Site {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let f = SiteFields::deserialize(d)?;
        Site::new(f.latitude_deg, f.longitude_deg, f.age_ma).map_err(serde::de::Error::custom)
    }
}

/// Per-request configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComputeOptions {
    /// Frame whose APWP is interpolated.
    pub reference_frame: String,
    /// Frame to rotate the pole into before computing. `None` keeps
    /// `reference_frame`, or uses the site's plate when plates are attached.
    pub target_frame: Option<String>,
    /// Permit ages outside the dated window (result is tagged extrapolated).
    pub allow_extrapolation: bool,
}

impl ComputeOptions {
    pub fn new(reference_frame: impl Into<String>) -> Self {
        Self {
            reference_frame: reference_frame.into(),
            target_frame: None,
            allow_extrapolation: false,
        }
    }

    pub fn with_target_frame(mut self, target_frame: impl Into<String>) -> Self {
        self.target_frame = Some(target_frame.into());
        self
    }

    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_FRAME)
    }
}

/// Outcome of one paleolatitude computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaleolatitudeResult {
    pub age_ma: f64,
    pub paleolatitude_deg: f64,
    pub paleolatitude_min_deg: f64,
    pub paleolatitude_max_deg: f64,
    /// `max(λmax − λ, λ − λmin)`, never negative.
    pub confidence_interval_deg: f64,
    /// Pole actually applied, after interpolation and any rotation.
    pub pole_used: PoleRecord,
    pub reference_frame: String,
    /// Frame the pole was rotated into, if any.
    pub target_frame: Option<String>,
    /// Plate the site was located on, when plates were consulted.
    pub plate_id: Option<u32>,
    pub plate_name: Option<String>,
    pub extrapolated: bool,
}

/// Paleolatitude with its bounds, before any request metadata is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaleolatitudeEstimate {
    pub paleolatitude_deg: f64,
    pub min_deg: f64,
    pub max_deg: f64,
    pub confidence_interval_deg: f64,
}

/// Paleolatitude and bounds for a site at `distance_deg` from a pole with the given A95.
///
/// ```
/// use paleo_apwp::calculator::paleolatitude_from_distance;
///
/// let est = paleolatitude_from_distance(90.0, 0.0);
/// assert!(est.paleolatitude_deg.abs() < 1e-12);
/// assert!(est.confidence_interval_deg.abs() < 1e-12);
///
/// // on the paleo-equator ΔI = 2·A95 and λ± = atan(½ tan ΔI)
/// let est = paleolatitude_from_distance(90.0, 5.0);
/// let expected = (0.5 * 10f64.to_radians().tan()).atan().to_degrees();
/// assert!((est.confidence_interval_deg - expected).abs() < 1e-9);
/// ```
pub fn paleolatitude_from_distance(distance_deg: f64, a95_deg: f64) -> PaleolatitudeEstimate {
    let lambda_deg = 90.0 - distance_deg;
    let lambda = lambda_deg * DEG_TO_RAD;

    let inclination = libm::atan2(2.0 * libm::sin(lambda), libm::cos(lambda));
    let cos_p = libm::cos(distance_deg * DEG_TO_RAD);
    let delta_i = 2.0 * a95_deg * DEG_TO_RAD / (1.0 + 3.0 * cos_p * cos_p);

    let upper = inclination + delta_i;
    let lower = inclination - delta_i;

    let max_deg = if upper >= 0.5 * std::f64::consts::PI {
        90.0
    } else {
        latitude_from_inclination(upper)
    };
    let min_deg = if lower <= -0.5 * std::f64::consts::PI {
        -90.0
    } else {
        latitude_from_inclination(lower)
    };

    let max_deg = max_deg.max(lambda_deg);
    let min_deg = min_deg.min(lambda_deg);

    PaleolatitudeEstimate {
        paleolatitude_deg: lambda_deg,
        min_deg,
        max_deg,
        confidence_interval_deg: (max_deg - lambda_deg)
            .max(lambda_deg - min_deg)
            .max(0.0),
    }
}

fn latitude_from_inclination(inclination: f64) -> f64 {
    libm::atan2(0.5 * libm::sin(inclination), libm::cos(inclination)) * RAD_TO_DEG
}

/// Paleolatitude of a present-day location relative to a given pole.
pub fn paleolatitude_for_pole(
    latitude_deg: f64,
    longitude_deg: f64,
    pole: &PoleRecord,
) -> PaleolatitudeEstimate {
    let distance_deg = paleo_core::math::angular_distance_deg(
        latitude_deg,
        longitude_deg,
        pole.latitude_deg(),
        pole.longitude_deg(),
    );
    paleolatitude_from_distance(distance_deg, pole.a95_deg())
}

/// Resolves frames, interpolates the pole, rotates it if asked, and computes the paleolatitude.
#[derive(Debug, Clone, Copy)]
pub struct PaleolatitudeCalculator<'a> {
    catalog: &'a ApwpCatalog,
    rotations: Option<&'a RotationTable>,
    plates: Option<&'a PlateIndex>,
}

impl<'a> PaleolatitudeCalculator<'a> {
    pub fn new(catalog: &'a ApwpCatalog) -> Self {
        Self {
            catalog,
            rotations: None,
            plates: None,
        }
    }

    pub fn with_rotations(mut self, rotations: &'a RotationTable) -> Self {
        self.rotations = Some(rotations);
        self
    }

    /// Locates each site on a plate and rotates into that plate's frame
    /// unless the request names a target frame.
    pub fn with_plates(mut self, plates: &'a PlateIndex) -> Self {
        self.plates = Some(plates);
        self
    }

    /// Runs one request against exactly one pinned frame.
    ///
    /// ```
    /// use paleo_apwp::{ApwpCatalog, ApwpDataset, ComputeOptions, PaleolatitudeCalculator, Site};
    ///
    /// let rows = [(0.0, 90.0, 0.0, 0.0), (10.0, 80.0, 0.0, 2.0)];
    /// let catalog = ApwpCatalog::from_datasets([ApwpDataset::from_rows("demo", rows)?])?;
    /// let site = Site::new(0.0, 0.0, 0.0)?;
    /// let result = PaleolatitudeCalculator::new(&catalog)
    ///     .compute(&site, &ComputeOptions::new("demo"))?;
    /// assert!(result.paleolatitude_deg.abs() < 1e-9);
    /// assert!(result.confidence_interval_deg < 1e-12);
    /// # Ok::<(), paleo_apwp::ApwpError>(())
    /// ```
    pub fn compute(
        &self,
        site: &Site,
        options: &ComputeOptions,
    ) -> ApwpResult<PaleolatitudeResult> {
        let dataset = self.catalog.get(&options.reference_frame)?;

        let plate = match (options.target_frame.as_ref(), self.plates) {
            (None, Some(plates)) => Some(site_plate(plates, site)?),
            _ => None,
        };
        let plate_frame = plate.map(PlatePolygon::frame_id);

        let interpolated = SphericalInterpolator::new(dataset)
            .pole_at_with(site.age_ma(), options.allow_extrapolation)?;
        let mut pole = interpolated.pole;
        let mut extrapolated = interpolated.extrapolated;

        let target_frame = options
            .target_frame
            .as_deref()
            .or(plate_frame.as_deref())
            .filter(|target| *target != options.reference_frame);

        if let Some(target) = target_frame {
            let from = options.reference_frame.as_str();
            let table = self
                .rotations
                .ok_or_else(|| ApwpError::no_rotation_path(from, target))?;
            let rotator = ReferenceFrameRotator::new(table);
            let rotated = rotator.rotate(&pole, from, target, options.allow_extrapolation)?;
            pole = rotated.pole;
            extrapolated |= rotated.extrapolated;
        }

        let (lat, lon) = (site.latitude_deg(), site.longitude_deg());
        let estimate = paleolatitude_for_pole(lat, lon, &pole);

        tracing::debug!(
            frame = %options.reference_frame,
            target = ?target_frame,
            plate_id = ?plate.map(PlatePolygon::plate_id),
            age_ma = site.age_ma(),
            paleolatitude_deg = estimate.paleolatitude_deg,
            confidence_interval_deg = estimate.confidence_interval_deg,
            extrapolated,
            "computed paleolatitude"
        );

        Ok(PaleolatitudeResult {
            age_ma: site.age_ma(),
            paleolatitude_deg: estimate.paleolatitude_deg,
            paleolatitude_min_deg: estimate.min_deg,
            paleolatitude_max_deg: estimate.max_deg,
            confidence_interval_deg: estimate.confidence_interval_deg,
            pole_used: pole,
            reference_frame: options.reference_frame.clone(),
            target_frame: target_frame.map(str::to_string),
            plate_id: plate.map(PlatePolygon::plate_id),
            plate_name: plate.map(|p| p.name().to_string()),
            extrapolated,
        })
    }
}

/// The rigid plate under `site`; mobile belts have no rotation model.
fn site_plate<'p>(plates: &'p PlateIndex, site: &Site) -> ApwpResult<&'p PlatePolygon> {
    let (lat, lon) = (site.latitude_deg(), site.longitude_deg());
    let plate = plates.find_plate(lat, lon)?;
    if plate.is_unconstrained() {
        return Err(ApwpError::plate_lookup(
            lat,
            lon,
            PlateErrorKind::Unconstrained,
            format!("'{}' has no rigid-plate motion model", plate.name()),
        ));
    }
    Ok(plate)
}
