use crate::constants::{DEG_TO_RAD, RAD_TO_DEG};

/// Angular separation between two points on the sphere, in radians.
///
/// Vincenty's formula: well-conditioned for both tiny and near-antipodal
/// separations, unlike the plain `acos` of the dot product.
#[inline]
pub fn vincenty_angular_separation(
    sin_lat1: f64,
    cos_lat1: f64,
    sin_lat2: f64,
    cos_lat2: f64,
    delta_lon: f64,
) -> f64 {
    let (sin_delta_lon, cos_delta_lon) = libm::sincos(delta_lon);

    let num = libm::sqrt(
        (cos_lat2 * sin_delta_lon).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_delta_lon).powi(2),
    );
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_delta_lon;

    libm::atan2(num, den)
}

/// Great-circle distance between two (latitude, longitude) pairs, all in degrees.
///
/// ```
/// use paleo_core::math::angular_distance_deg;
///
/// assert!((angular_distance_deg(0.0, 0.0, 90.0, 0.0) - 90.0).abs() < 1e-12);
/// assert!((angular_distance_deg(10.0, 179.0, 10.0, -179.0) - 1.9696).abs() < 1e-3);
/// ```
pub fn angular_distance_deg(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let (sin_lat1, cos_lat1) = libm::sincos(lat1_deg * DEG_TO_RAD);
    let (sin_lat2, cos_lat2) = libm::sincos(lat2_deg * DEG_TO_RAD);
    let delta_lon = (lon2_deg - lon1_deg) * DEG_TO_RAD;

    vincenty_angular_separation(sin_lat1, cos_lat1, sin_lat2, cos_lat2, delta_lon) * RAD_TO_DEG
}
