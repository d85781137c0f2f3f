//! Angle normalization helpers.
//!
//! | Function | Input | Output Range |
//! |----------|-------|--------------|
//! | [`normalize_longitude`] | degrees | [-180°, 180°) |
//! | [`normalize_latitude`] | degrees | [-90°, 90°] (clamped) |
//!
//! Longitudes are stored in the half-open range [-180°, 180°) everywhere in
//! the workspace, so 180°E and 180°W map to the same value (-180°).

/// Normalizes longitude to the half-open range [-180°, 180°).
///
/// ```
/// use paleo_core::utils::normalize_longitude;
///
/// assert_eq!(normalize_longitude(190.0), -170.0);
/// assert_eq!(normalize_longitude(180.0), -180.0);
/// assert_eq!(normalize_longitude(-180.0), -180.0);
/// ```
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    let normalized = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Clamps latitude to the valid range [-90°, 90°].
///
/// Only meant for absorbing rounding noise from vector round trips; genuine
/// out-of-range input should be rejected, not clamped.
#[inline]
pub fn normalize_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}
