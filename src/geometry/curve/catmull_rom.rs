use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

use super::{check_parameter, Curve, SAMPLE_EPSILON};

/// Centripetal Catmull-Rom spline through an ordered point sequence.
///
/// The curve passes through every control point. `x = 0` maps to the
/// first point and `x = 1` to the last, with control points evenly spread
/// over the parameter range. Missing neighbours at both ends are
/// extrapolated by reflecting the first and last edges.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Point3>,
}

impl CatmullRom {
    /// Creates a new spline.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than 2 points are given.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "catmull-rom curve needs at least 2 points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self { points })
    }

    /// Returns the control points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the segment index and local parameter for `x`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn locate(&self, x: f64) -> (usize, f64) {
        let last_segment = self.points.len() - 2;
        let scaled = (self.points.len() - 1) as f64 * x;
        let segment = (scaled.floor() as usize).min(last_segment);
        (segment, scaled - segment as f64)
    }
}

impl Curve for CatmullRom {
    fn point(&self, x: f64) -> Result<Point3> {
        check_parameter(x)?;
        let (segment, weight) = self.locate(x);
        let n = self.points.len();

        let point_1 = self.points[segment];
        let point_2 = self.points[segment + 1];

        let point_0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            point_1 - (point_2 - point_1)
        };
        let point_3 = if segment + 2 < n {
            self.points[segment + 2]
        } else {
            point_2 + (point_2 - point_1)
        };

        Ok(centripetal_segment(weight, &point_0, &point_1, &point_2, &point_3))
    }
}

/// Evaluates the segment between `point_1` and `point_2` at local `t`.
///
/// Knot distances use exponent 0.25 (square root of the chord length's
/// square root). A distance below [`SAMPLE_EPSILON`] is replaced by the
/// previous one, or by 1 for the first.
fn centripetal_segment(
    t: f64,
    point_0: &Point3,
    point_1: &Point3,
    point_2: &Point3,
    point_3: &Point3,
) -> Point3 {
    let mut delta_0 = (point_1 - point_0).norm().powf(0.25);
    let mut delta_1 = (point_2 - point_1).norm().powf(0.25);
    let mut delta_2 = (point_3 - point_2).norm().powf(0.25);

    if delta_0 < SAMPLE_EPSILON {
        delta_0 = 1.0;
    }
    if delta_1 < SAMPLE_EPSILON {
        delta_1 = delta_0;
    }
    if delta_2 < SAMPLE_EPSILON {
        delta_2 = delta_1;
    }

    let tangent_1: Vector3 = ((point_1 - point_0) / delta_0
        - (point_2 - point_0) / (delta_0 + delta_1)
        + (point_2 - point_1) / delta_1)
        * delta_1;
    let tangent_2: Vector3 = ((point_2 - point_1) / delta_1
        - (point_3 - point_1) / (delta_1 + delta_2)
        + (point_3 - point_2) / delta_2)
        * delta_1;

    let p1 = point_1.coords;
    let p2 = point_2.coords;
    let coef_2 = -3.0 * p1 + 3.0 * p2 - 2.0 * tangent_1 - tangent_2;
    let coef_3 = 2.0 * p1 - 2.0 * p2 + tangent_1 + tangent_2;

    let t2 = t * t;
    let t3 = t2 * t;
    Point3::from(p1 + tangent_1 * t + coef_2 * t2 + coef_3 * t3)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::Frame;
    use approx::assert_relative_eq;

    fn zigzag() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.2, 1.0, 0.0),
            Point3::new(-0.3, 3.5, 0.1),
            Point3::new(0.0, 3.6, 0.0),
            Point3::new(1.0, 6.0, -2.0),
        ]
    }

    #[test]
    fn fewer_than_two_points_fails() {
        assert!(CatmullRom::new(vec![]).is_err());
        assert!(CatmullRom::new(vec![Point3::origin()]).is_err());
    }

    #[test]
    fn endpoints_are_interpolated() {
        let points = zigzag();
        let curve = CatmullRom::new(points.clone()).unwrap();
        assert_relative_eq!(curve.point(0.0).unwrap(), points[0], epsilon = 1e-9);
        assert_relative_eq!(curve.point(1.0).unwrap(), points[4], epsilon = 1e-9);
    }

    #[test]
    fn two_point_endpoints() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(-4.0, 0.5, 2.0);
        let curve = CatmullRom::new(vec![a, b]).unwrap();
        assert_relative_eq!(curve.point(0.0).unwrap(), a, epsilon = 1e-9);
        assert_relative_eq!(curve.point(1.0).unwrap(), b, epsilon = 1e-9);
    }

    #[test]
    fn passes_through_interior_points() {
        let points = zigzag();
        let curve = CatmullRom::new(points.clone()).unwrap();
        for (i, expected) in points.iter().enumerate() {
            let x = f64::from(u32::try_from(i).unwrap()) / 4.0;
            assert_relative_eq!(curve.point(x).unwrap(), *expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn straight_evenly_spaced_points_are_linear() {
        let curve = CatmullRom::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(
            curve.point(0.25).unwrap(),
            Point3::new(0.0, 0.5, 0.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            curve.point(0.8).unwrap(),
            Point3::new(0.0, 1.6, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn coincident_points_stay_finite() {
        let curve = CatmullRom::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        ])
        .unwrap();
        for i in 0..=30 {
            let p = curve.point(f64::from(i) / 30.0).unwrap();
            assert!(p.coords.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn coincident_pair_endpoints_stay_finite() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let curve = CatmullRom::new(vec![p, p]).unwrap();
        assert_relative_eq!(curve.point(0.5).unwrap(), p, epsilon = 1e-12);
        assert!(Frame::at(&curve, 0.5).is_err());
    }

    #[test]
    fn out_of_range_parameter() {
        let curve = CatmullRom::new(zigzag()).unwrap();
        assert!(curve.point(-1e-6).is_err());
        assert!(curve.point(1.0 + 1e-6).is_err());
    }

    #[test]
    fn interior_tangents_are_non_zero() {
        let curve = CatmullRom::new(zigzag()).unwrap();
        for i in 1..50 {
            let frame = Frame::at(&curve, f64::from(i) / 50.0).unwrap();
            assert!(frame.tangent.norm() > 1e-9);
        }
    }
}
