mod branch;
mod interpret;

pub use branch::Branch;
pub use interpret::Interpret;

use crate::math::{Point3, UnitQuaternion, Vector3};

/// Direction the turtle walks along in its local frame (Y+).
const FORWARD: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// Initial parameters of a turtle.
#[derive(Debug, Clone, Copy)]
pub struct TurtleParams {
    /// Rotation angle in radians applied by every rotation symbol.
    pub angle: f64,
    /// Distance covered by the first forward step.
    pub step_length: f64,
    /// Branch radius at the root.
    pub radius: f64,
    /// Multiplier applied to the step length after each forward step.
    pub length_decay: f64,
    /// Multiplier applied to the radius after each forward step.
    pub radius_decay: f64,
}

impl Default for TurtleParams {
    fn default() -> Self {
        Self {
            angle: 20_f64.to_radians(),
            step_length: 1.0,
            radius: 0.5,
            length_decay: 1.0,
            radius_decay: 1.0,
        }
    }
}

/// Rotation commands understood by the turtle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// `+`
    YawPositive,
    /// `-`
    YawNegative,
    /// `/`
    RollPositive,
    /// `\`
    RollNegative,
    /// `^`
    PitchPositive,
    /// `_`
    PitchNegative,
}

impl Rotation {
    /// Maps a grammar symbol to a rotation command.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::YawPositive),
            '-' => Some(Self::YawNegative),
            '/' => Some(Self::RollPositive),
            '\\' => Some(Self::RollNegative),
            '^' => Some(Self::PitchPositive),
            '_' => Some(Self::PitchNegative),
            _ => None,
        }
    }

    /// Local rotation for the given angle.
    ///
    /// Yaw turns about Z, roll about the forward axis Y, pitch about X.
    fn local(self, angle: f64) -> UnitQuaternion {
        match self {
            Self::YawPositive => UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle),
            Self::YawNegative => UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -angle),
            Self::RollPositive => UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle),
            Self::RollNegative => UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -angle),
            Self::PitchPositive => UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle),
            Self::PitchNegative => UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -angle),
        }
    }
}

/// Cursor walking through 3D space while a sentence is interpreted.
///
/// The turtle is `Copy`: entering a fork hands a copy to the sub-branch so
/// that siblings never observe each other's moves.
#[derive(Debug, Clone, Copy)]
pub struct Turtle {
    position: Point3,
    orientation: UnitQuaternion,
    angle: f64,
    step_length: f64,
    radius: f64,
    length_decay: f64,
    radius_decay: f64,
}

impl Turtle {
    /// Creates a turtle at the origin, facing Y+.
    #[must_use]
    pub fn new(params: TurtleParams) -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            angle: params.angle,
            step_length: params.step_length,
            radius: params.radius,
            length_decay: params.length_decay,
            radius_decay: params.radius_decay,
        }
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// Returns the current orientation.
    #[must_use]
    pub fn orientation(&self) -> &UnitQuaternion {
        &self.orientation
    }

    /// Returns the current step length.
    #[must_use]
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Returns the current radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the current heading (unit length).
    #[must_use]
    pub fn heading(&self) -> Vector3 {
        self.orientation * FORWARD
    }

    /// Moves one step along the heading, then decays step length and radius.
    pub fn advance(&mut self) {
        self.position += self.heading() * self.step_length;
        self.step_length *= self.length_decay;
        self.radius *= self.radius_decay;
    }

    /// Applies a rotation in the turtle's local frame.
    pub fn rotate(&mut self, rotation: Rotation) {
        self.orientation *= rotation.local(self.angle);
        self.orientation.renormalize_fast();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn turtle(angle: f64) -> Turtle {
        Turtle::new(TurtleParams {
            angle,
            ..TurtleParams::default()
        })
    }

    #[test]
    fn starts_at_origin_facing_up() {
        let t = turtle(0.3);
        assert_relative_eq!(*t.position(), Point3::origin());
        assert_relative_eq!(t.heading(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn advance_applies_decay() {
        let mut t = Turtle::new(TurtleParams {
            angle: 0.0,
            step_length: 2.0,
            radius: 1.0,
            length_decay: 0.5,
            radius_decay: 0.25,
        });
        t.advance();
        assert_relative_eq!(*t.position(), Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(t.step_length(), 1.0);
        assert_relative_eq!(t.radius(), 0.25);
        t.advance();
        assert_relative_eq!(*t.position(), Point3::new(0.0, 3.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn yaw_turns_about_z() {
        let mut t = turtle(FRAC_PI_2);
        t.rotate(Rotation::YawPositive);
        assert_relative_eq!(t.heading(), -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn pitch_turns_about_x() {
        let mut t = turtle(FRAC_PI_2);
        t.rotate(Rotation::PitchPositive);
        assert_relative_eq!(t.heading(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn roll_keeps_heading() {
        let mut t = turtle(0.7);
        t.rotate(Rotation::RollPositive);
        t.rotate(Rotation::RollPositive);
        assert_relative_eq!(t.heading(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn opposite_rotations_cancel() {
        let mut t = turtle(0.4);
        t.rotate(Rotation::PitchPositive);
        t.rotate(Rotation::YawNegative);
        t.rotate(Rotation::YawPositive);
        t.rotate(Rotation::PitchNegative);
        assert_relative_eq!(t.heading(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn repeated_rotations_stay_unit() {
        let mut t = turtle(0.123);
        for i in 0..10_000 {
            let rotation = match i % 3 {
                0 => Rotation::YawPositive,
                1 => Rotation::RollNegative,
                _ => Rotation::PitchPositive,
            };
            t.rotate(rotation);
        }
        assert!((t.orientation().quaternion().norm() - 1.0).abs() < 1e-12);
        assert!((t.heading().norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn symbol_mapping() {
        assert_eq!(Rotation::from_symbol('+'), Some(Rotation::YawPositive));
        assert_eq!(Rotation::from_symbol('\\'), Some(Rotation::RollNegative));
        assert_eq!(Rotation::from_symbol('_'), Some(Rotation::PitchNegative));
        assert_eq!(Rotation::from_symbol('F'), None);
    }
}
