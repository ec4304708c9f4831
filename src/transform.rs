// src/transform.rs
//! Rigid transform for the visual car body: a position plus an orthonormal
//! rotation basis.
//!
//! The basis is stored as a `Mat3` with columns x = right, y = up,
//! z = back (glam's right-handed convention; the direction of travel is
//! `-z_axis`). Steering and slope alignment repeatedly compose and
//! interpolate this basis, which accumulates floating error, so
//! [`Transform::orthonormalize`] is called after every blend rather than
//! assumed.

use glam::{Mat3, Quat, Vec3};

/// Cross products shorter than this are treated as degenerate when building
/// an aligned frame.
const DEGENERATE_AXIS_SQ: f32 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub basis: Mat3,
}

impl Transform {
    /// Identity orientation at the given position.
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            basis: Mat3::IDENTITY,
        }
    }

    /// Local right axis (+X column).
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.basis.x_axis
    }

    /// Local up axis (+Y column).
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.basis.y_axis
    }

    /// Direction of travel. The +Z column points backward, so forward is its
    /// negation.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        -self.basis.z_axis
    }

    /// Basis rotated about its own up axis by `angle` radians. Positive
    /// angles turn left (counterclockwise looking down the up axis).
    #[inline]
    pub fn yawed(&self, angle: f32) -> Mat3 {
        Mat3::from_axis_angle(self.up(), angle) * self.basis
    }

    /// Re-orthonormalize the basis with the z column as the stable axis, so
    /// the heading survives the correction. Gram-Schmidt: z is normalized,
    /// x rebuilt perpendicular to y and z, y closes the right-handed frame.
    pub fn orthonormalize(&mut self) {
        let z = self.basis.z_axis.normalize();
        let x = self.basis.y_axis.cross(z).normalize();
        let y = z.cross(x);
        self.basis = Mat3::from_cols(x, y, z);
    }

    /// Worst deviation of the basis from orthonormal: column length error or
    /// pairwise dot product, whichever is larger.
    pub fn orthonormality_error(&self) -> f32 {
        let (x, y, z) = (self.basis.x_axis, self.basis.y_axis, self.basis.z_axis);
        let len_err = (x.length() - 1.0)
            .abs()
            .max((y.length() - 1.0).abs())
            .max((z.length() - 1.0).abs());
        let dot_err = x.dot(y).abs().max(y.dot(z).abs()).max(z.dot(x).abs());
        len_err.max(dot_err)
    }
}

/// Spherical interpolation between two bases along the shortest arc.
/// `t` is the fraction of the remaining rotation taken this step; callers
/// feed `rate * dt`, giving an exponential approach to the target.
#[inline]
pub fn slerp_basis(from: Mat3, to: Mat3, t: f32) -> Mat3 {
    let a = Quat::from_mat3(&from).normalize();
    let b = Quat::from_mat3(&to).normalize();
    Mat3::from_quat(a.slerp(b, t).normalize())
}

/// Build a right-handed orthonormal frame whose up axis is exactly `up`,
/// keeping the heading of `basis` as closely as the new up allows:
/// x = up x z, z closes the frame. Returns `None` when `up` is parallel to
/// the z column and no stable heading exists.
pub fn basis_with_up(basis: Mat3, up: Vec3) -> Option<Mat3> {
    let x = up.cross(basis.z_axis);
    if x.length_squared() < DEGENERATE_AXIS_SQ {
        return None;
    }
    let x = x.normalize();
    let z = x.cross(up);
    Some(Mat3::from_cols(x, up, z))
}
