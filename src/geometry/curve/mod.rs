mod catmull_rom;
mod circle;
mod frame;

pub use catmull_rom::CatmullRom;
pub use circle::Circle;
pub use frame::Frame;

use crate::error::{GeometryError, Result};
use crate::math::Point3;

/// Step used for finite differences and for flooring tiny control distances.
pub const SAMPLE_EPSILON: f64 = 0.001;

/// Trait for parametric curves in 3D space over the domain `[0, 1]`.
pub trait Curve {
    /// Evaluates the curve at parameter `x`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `x` is outside `[0, 1]`.
    fn point(&self, x: f64) -> Result<Point3>;
}

/// Rejects parameters outside the unit domain.
pub(crate) fn check_parameter(x: f64) -> Result<()> {
    if (0.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "x",
            value: x,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}
