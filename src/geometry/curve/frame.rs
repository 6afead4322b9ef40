use crate::error::{GeometryError, Result};
use crate::math::{Vector3, TOLERANCE};

use super::{Curve, SAMPLE_EPSILON};

/// Local frame of a curve at one parameter value.
///
/// `binormal` and `normal` are unit length and orthogonal to each other and
/// to `tangent`. The tangent is a finite difference and is NOT normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Finite-difference tangent (unnormalized).
    pub tangent: Vector3,
    /// First unit axis of the cross-section plane.
    pub binormal: Vector3,
    /// Second unit axis of the cross-section plane.
    pub normal: Vector3,
}

impl Frame {
    /// Computes the frame of `curve` at parameter `x`.
    ///
    /// The tangent is `point(x + e) - point(x - e)` with both samples clamped
    /// to `[0, 1]`. The binormal is `tangent x (p1 + p2)`, which has no
    /// fixed up-vector to flip through at inflections. When that product
    /// vanishes (a straight segment pointing away from the origin) an axis
    /// next to the tangent's dominant component is projected orthogonal to
    /// the tangent instead.
    ///
    /// Frames are computed independently per sample; the binormal may
    /// change sign between nearby samples on some curves.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the two samples coincide,
    /// or any error from evaluating the curve.
    pub fn at<C: Curve + ?Sized>(curve: &C, x: f64) -> Result<Self> {
        let point_1 = curve.point((x - SAMPLE_EPSILON).max(0.0))?;
        let point_2 = curve.point((x + SAMPLE_EPSILON).min(1.0))?;

        let tangent = point_2 - point_1;
        if tangent.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let binormal = tangent.cross(&(point_1.coords + point_2.coords));
        let binormal = if binormal.norm() < TOLERANCE {
            fallback_binormal(&tangent)
        } else {
            binormal.normalize()
        };

        let normal = binormal.cross(&tangent).normalize();
        Ok(Self {
            tangent,
            binormal,
            normal,
        })
    }
}

/// Unit vector orthogonal to `tangent`, derived from a coordinate axis.
///
/// X-dominant tangents use Y, Y-dominant use Z, Z-dominant use X.
fn fallback_binormal(tangent: &Vector3) -> Vector3 {
    let abs = tangent.abs();
    let axis = if abs.x >= abs.y && abs.x >= abs.z {
        Vector3::y()
    } else if abs.y >= abs.z {
        Vector3::z()
    } else {
        Vector3::x()
    };
    (axis - tangent * (tangent.dot(&axis) / tangent.norm_squared())).normalize()
}
