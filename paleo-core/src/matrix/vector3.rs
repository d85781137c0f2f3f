//! 3D Cartesian vectors for positions on the unit sphere.
//!
//! Pole positions and site locations arrive as geographic latitude/longitude,
//! but every geometric operation in the workspace (angular distance,
//! great-circle interpolation, finite rotation) is carried out on unit vectors.
//! The typical workflow is:
//!
//! 1. Convert geographic → Cartesian with [`from_lat_lon_deg`](Vector3::from_lat_lon_deg)
//! 2. Interpolate with [`slerp`](Vector3::slerp) or apply a [`RotationMatrix3`](super::RotationMatrix3)
//! 3. Convert back with [`to_lat_lon_deg`](Vector3::to_lat_lon_deg)
//!
//! ```
//! use paleo_core::Vector3;
//!
//! let a = Vector3::from_lat_lon_deg(80.0, 170.0);
//! let b = Vector3::from_lat_lon_deg(80.0, -170.0);
//!
//! // Halfway along the great circle, across the antimeridian
//! let (lat, lon) = a.slerp(&b, 0.5).to_lat_lon_deg();
//! assert!(lat > 80.0);
//! assert!((lon.abs() - 180.0).abs() < 1e-9);
//! ```
//!
//! # Coordinate Conventions
//!
//! - **x** points to (0°N, 0°E), **y** to (0°N, 90°E), **z** to the geographic north pole.
//! - Longitudes returned by [`to_lat_lon_deg`](Vector3::to_lat_lon_deg) are in [-180°, 180°).
use crate::constants::{COINCIDENT_EPSILON_RAD, DEG_TO_RAD, PI, RAD_TO_DEG};
use crate::utils::{normalize_latitude, normalize_longitude};
use std::fmt;

/// A 3D Cartesian vector.
///
/// Components are public for direct access; most values in this workspace
/// are unit vectors, but nothing enforces that.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Creates a new vector from x, y, z components.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the zero vector `[0, 0, 0]`.
    #[inline]
    pub fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Unit vector toward (0°N, 0°E).
    #[inline]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Unit vector toward (0°N, 90°E).
    #[inline]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// Unit vector toward the geographic north pole.
    #[inline]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Returns the Euclidean length.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Returns the squared magnitude.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a unit vector pointing in the same direction.
    ///
    /// If the vector has zero length, returns the zero vector unchanged (avoids NaN).
    ///
    /// ```
    /// use paleo_core::Vector3;
    ///
    /// let v = Vector3::new(3.0, 4.0, 0.0);
    /// let unit = v.normalize();
    /// assert!((unit.magnitude() - 1.0).abs() < 1e-15);
    /// assert_eq!(unit, Vector3::new(0.6, 0.8, 0.0));
    /// ```
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else {
            Self::new(self.x / mag, self.y / mag, self.z / mag)
        }
    }

    /// Dot product. For unit vectors this is the cosine of the separation.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product, following the right-hand rule.
    ///
    /// ```
    /// use paleo_core::Vector3;
    ///
    /// let z = Vector3::x_axis().cross(&Vector3::y_axis());
    /// assert_eq!(z, Vector3::z_axis());
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns the components as a `[f64; 3]` array.
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates a vector from a `[f64; 3]` array.
    #[inline]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Creates a unit vector from spherical coordinates in radians.
    ///
    /// - `lon`: azimuth from +X toward +Y
    /// - `lat`: elevation above the XY plane
    pub fn from_spherical(lon: f64, lat: f64) -> Self {
        let (sin_lon, cos_lon) = libm::sincos(lon);
        let (sin_lat, cos_lat) = libm::sincos(lat);
        Self::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Converts the vector to spherical coordinates `(lon, lat)` in radians.
    ///
    /// The vector does not need to be normalized. Directions along the z axis
    /// (and the zero vector) report a longitude of exactly 0.
    pub fn to_spherical(&self) -> (f64, f64) {
        let d2 = self.x * self.x + self.y * self.y;

        let lon = if d2 == 0.0 {
            0.0
        } else {
            libm::atan2(self.y, self.x)
        };
        let lat = if self.z == 0.0 {
            0.0
        } else {
            libm::atan2(self.z, libm::sqrt(d2))
        };

        (lon, lat)
    }

    /// Creates a unit vector from geographic latitude and longitude in degrees.
    ///
    /// ```
    /// use paleo_core::Vector3;
    ///
    /// let north = Vector3::from_lat_lon_deg(90.0, 123.0);
    /// assert!((north.z - 1.0).abs() < 1e-15);
    /// ```
    pub fn from_lat_lon_deg(lat_deg: f64, lon_deg: f64) -> Self {
        Self::from_spherical(lon_deg * DEG_TO_RAD, lat_deg * DEG_TO_RAD)
    }

    /// Converts to geographic `(latitude, longitude)` in degrees.
    ///
    /// Latitude is clamped to [-90°, 90°] and longitude normalized to
    /// [-180°, 180°).
    pub fn to_lat_lon_deg(&self) -> (f64, f64) {
        let (lon, lat) = self.to_spherical();
        (
            normalize_latitude(lat * RAD_TO_DEG),
            normalize_longitude(lon * RAD_TO_DEG),
        )
    }

    /// Angle between two vectors in radians, in [0, π].
    ///
    /// Uses `atan2(|a×b|, a·b)`, which keeps full precision for nearly
    /// parallel and nearly antiparallel vectors.
    pub fn angle_to(&self, other: &Self) -> f64 {
        libm::atan2(self.cross(other).magnitude(), self.dot(other))
    }

    /// Returns some unit vector perpendicular to `self`.
    ///
    /// The choice is deterministic: the cross product with whichever
    /// coordinate axis is least aligned with `self`.
    pub fn any_orthogonal(&self) -> Self {
        let ax = self.x.abs();
        let ay = self.y.abs();
        let az = self.z.abs();
        let axis = if ax <= ay && ax <= az {
            Self::x_axis()
        } else if ay <= az {
            Self::y_axis()
        } else {
            Self::z_axis()
        };
        self.cross(&axis).normalize()
    }

    /// Spherical linear interpolation along the great circle from `self` to `other`.
    ///
    /// Both inputs are expected to be unit vectors. `t = 0` returns `self`,
    /// `t = 1` returns `other`; values outside [0, 1] continue along the same
    /// great circle (used for extrapolation). The result is a unit vector.
    ///
    /// Degenerate cases:
    /// - coincident inputs return `self` unchanged;
    /// - antipodal inputs have no unique great circle; an arbitrary but
    ///   deterministic one through `self` is used.
    ///
    /// ```
    /// use paleo_core::Vector3;
    ///
    /// let a = Vector3::x_axis();
    /// let b = Vector3::y_axis();
    /// let mid = a.slerp(&b, 0.5);
    /// let h = std::f64::consts::FRAC_1_SQRT_2;
    /// assert!((mid.x - h).abs() < 1e-15);
    /// assert!((mid.y - h).abs() < 1e-15);
    /// ```
    pub fn slerp(&self, other: &Self, t: f64) -> Self {
        let omega = self.angle_to(other);

        if omega < COINCIDENT_EPSILON_RAD {
            return *self;
        }

        if PI - omega < COINCIDENT_EPSILON_RAD {
            let perp = self.any_orthogonal();
            let (s, c) = libm::sincos(t * PI);
            return (*self * c + perp * s).normalize();
        }

        let sin_omega = libm::sin(omega);
        let w_self = libm::sin((1.0 - t) * omega) / sin_omega;
        let w_other = libm::sin(t * omega) / sin_omega;

        (*self * w_self + *other * w_other).normalize()
    }
}

/// Vector + Vector
impl std::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Vector - Vector
impl std::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Vector * scalar
impl std::ops::Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

/// scalar * Vector
impl std::ops::Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        vec * self
    }
}

/// Vector / scalar
impl std::ops::Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

/// -Vector
impl std::ops::Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({:.9}, {:.9}, {:.9})", self.x, self.y, self.z)
    }
}
