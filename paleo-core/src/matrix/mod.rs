//! 3D rotation matrices and vectors on the unit sphere.
//!
//! - [`RotationMatrix3`]: 3×3 orthogonal matrix for finite rotations
//! - [`Vector3`]: 3D Cartesian vector

mod rotation_matrix;
mod vector3;

pub use rotation_matrix::RotationMatrix3;
pub use vector3::Vector3;
