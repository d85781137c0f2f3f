//! 3x3 rotation matrices for finite rotations on the sphere.
//!
//! A finite rotation moves every point of the sphere about a fixed axis (the
//! Euler pole) by a fixed angle. Paleomagnetic poles are moved between
//! reference frames this way, and the matrix form makes composition and
//! inversion trivial:
//!
//! - compose: `b * a` applies `a` first, then `b`
//! - invert: [`transpose`](RotationMatrix3::transpose)
//!
//! ```
//! use paleo_core::{RotationMatrix3, Vector3};
//!
//! // 90° about the north pole moves 0°E to 90°E
//! let r = RotationMatrix3::from_axis_angle(Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
//! let v = r * Vector3::x_axis();
//! assert!((v.y - 1.0).abs() < 1e-15);
//!
//! let back = r.transpose() * v;
//! assert!((back.x - 1.0).abs() < 1e-15);
//! ```
//!
//! # Rotation Convention
//!
//! Rotations built here are *active* and right-handed: a positive angle turns
//! points counterclockwise when the sphere is viewed from above the rotation
//! axis. This is the usual sign convention for Euler poles in plate
//! reconstructions.
//!
//! # Storage Layout
//!
//! Elements are stored in row-major order as `[[f64; 3]; 3]`. The element at
//! row `i`, column `j` is `matrix[(i, j)]` or `matrix.get(i, j)`.

use super::Vector3;
use crate::constants::{COINCIDENT_EPSILON_RAD, PI};
use std::fmt;

/// A 3x3 rotation matrix.
///
/// Represents proper rotations (orthogonal, determinant +1). Angles are in
/// radians. Row-major storage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl RotationMatrix3 {
    /// Creates the 3x3 identity matrix.
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Creates a matrix from a row-major 3x3 array.
    ///
    /// This does not validate that the matrix is a proper rotation.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    /// Returns the element at the specified row and column.
    ///
    /// Indices are 0-based. Panics if `row >= 3` or `col >= 3`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    /// Builds the rotation by `angle` radians about `axis` (Rodrigues' formula).
    ///
    /// `axis` does not need to be normalized. A zero axis yields the identity.
    ///
    /// ```text
    /// R = I cos(a) + (1 - cos(a)) k kᵀ + sin(a) [k]ₓ
    /// ```
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let k = axis.normalize();
        if k.magnitude_squared() == 0.0 {
            return Self::identity();
        }

        let (s, c) = libm::sincos(angle);
        let t = 1.0 - c;
        let (x, y, z) = (k.x, k.y, k.z);

        Self::from_array([
            [c + x * x * t, x * y * t - z * s, x * z * t + y * s],
            [y * x * t + z * s, c + y * y * t, y * z * t - x * s],
            [z * x * t - y * s, z * y * t + x * s, c + z * z * t],
        ])
    }

    /// Decomposes the rotation into a unit axis and an angle in [0, π].
    ///
    /// The identity (and anything within rounding of it) reports the z axis
    /// with a zero angle. At exactly π the axis sign is arbitrary.
    ///
    /// ```
    /// use paleo_core::{RotationMatrix3, Vector3};
    ///
    /// let axis = Vector3::from_lat_lon_deg(50.0, -30.0);
    /// let (k, angle) = RotationMatrix3::from_axis_angle(axis, 0.4).to_axis_angle();
    /// assert!((angle - 0.4).abs() < 1e-14);
    /// assert!((k.dot(&axis) - 1.0).abs() < 1e-14);
    /// ```
    pub fn to_axis_angle(&self) -> (Vector3, f64) {
        let m = &self.elements;
        let v = Vector3::new(m[2][1] - m[1][2], m[0][2] - m[2][0], m[1][0] - m[0][1]);
        let trace = m[0][0] + m[1][1] + m[2][2];

        let angle = libm::atan2(v.magnitude() / 2.0, (trace - 1.0) / 2.0);

        if angle < COINCIDENT_EPSILON_RAD {
            return (Vector3::z_axis(), 0.0);
        }

        if PI - angle > 1e-6 {
            return (v.normalize(), angle);
        }

        // Near a half turn the antisymmetric part vanishes; recover the axis
        // from the symmetric part instead, anchored on its largest component.
        let diag = [m[0][0], m[1][1], m[2][2]];
        let i = (0..3)
            .max_by(|&a, &b| diag[a].total_cmp(&diag[b]))
            .unwrap_or(0);
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;

        let mut axis = [0.0; 3];
        axis[i] = libm::sqrt(((diag[i] + 1.0) / 2.0).max(0.0));
        axis[j] = (m[i][j] + m[j][i]) / (4.0 * axis[i]);
        axis[k] = (m[i][k] + m[k][i]) / (4.0 * axis[i]);

        let mut axis = Vector3::from_array(axis).normalize();
        // Keep the sign consistent with whatever antisymmetric part survives.
        if axis.dot(&v) < 0.0 {
            axis = -axis;
        }

        (axis, angle)
    }

    /// Multiplies this matrix by another: `other` is applied first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..3 {
                    *cell += self.elements[i][k] * other.elements[k][j];
                }
            }
        }

        Self::from_array(result)
    }

    /// Applies this rotation matrix to a 3D vector (`M * v`).
    pub fn apply_to_vector(&self, vector: [f64; 3]) -> [f64; 3] {
        [
            self.elements[0][0] * vector[0]
                + self.elements[0][1] * vector[1]
                + self.elements[0][2] * vector[2],
            self.elements[1][0] * vector[0]
                + self.elements[1][1] * vector[1]
                + self.elements[1][2] * vector[2],
            self.elements[2][0] * vector[0]
                + self.elements[2][1] * vector[1]
                + self.elements[2][2] * vector[2],
        ]
    }

    /// Returns the transpose, which for a rotation is its inverse.
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self::from_array([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Returns the maximum absolute difference between corresponding elements.
    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;

        for i in 0..3 {
            for j in 0..3 {
                let diff = (self.elements[i][j] - other.elements[i][j]).abs();
                max_diff = max_diff.max(diff);
            }
        }

        max_diff
    }

    /// Interpolates between two rotations at a constant angular rate.
    ///
    /// Returns `self` at `t = 0` and `other` at `t = 1`, turning about the
    /// axis of the relative rotation `selfᵀ · other` in between. Values of
    /// `t` outside [0, 1] continue the same motion.
    ///
    /// ```
    /// use paleo_core::{RotationMatrix3, Vector3};
    ///
    /// let a = RotationMatrix3::from_axis_angle(Vector3::z_axis(), 0.2);
    /// let b = RotationMatrix3::from_axis_angle(Vector3::z_axis(), 0.6);
    /// let mid = a.interpolate(&b, 0.5);
    /// let expected = RotationMatrix3::from_axis_angle(Vector3::z_axis(), 0.4);
    /// assert!(mid.max_difference(&expected) < 1e-14);
    /// ```
    pub fn interpolate(&self, other: &Self, t: f64) -> Self {
        let relative = self.transpose().multiply(other);
        let (axis, angle) = relative.to_axis_angle();
        self.multiply(&Self::from_axis_angle(axis, t * angle))
    }
}

impl std::ops::Mul for RotationMatrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&RotationMatrix3> for &RotationMatrix3 {
    type Output = RotationMatrix3;

    fn mul(self, rhs: &RotationMatrix3) -> RotationMatrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Index<(usize, usize)> for RotationMatrix3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl std::ops::Mul<Vector3> for RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        Vector3::from_array(self.apply_to_vector(vec.to_array()))
    }
}

impl std::ops::Mul<Vector3> for &RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        Vector3::from_array(self.apply_to_vector(vec.to_array()))
    }
}

impl Default for RotationMatrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for RotationMatrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RotationMatrix3:")?;
        for row in &self.elements {
            writeln!(f, "  [{:12.9} {:12.9} {:12.9}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
