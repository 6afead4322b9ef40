use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::{check_parameter, Curve};

/// A full circle in the XY plane, centered at the origin.
///
/// `P(x) = (r * cos(2*pi*x), r * sin(2*pi*x), 0)`
#[derive(Debug, Clone)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn new(radius: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        Ok(Self { radius })
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Curve for Circle {
    fn point(&self, x: f64) -> Result<Point3> {
        check_parameter(x)?;
        let angle = TAU * x;
        Ok(Point3::new(
            self.radius * angle.cos(),
            self.radius * angle.sin(),
            0.0,
        ))
    }
}
