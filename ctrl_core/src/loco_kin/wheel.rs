//! Wheel geometry

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single wheel of the drivetrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wheel {
    /// The position of the wheel's contact point relative to the robot centre.
    ///
    /// Units: meters,
    /// Frame: Robot body (x forward, y left)
    pub pos_m: Vector2<f64>,

    /// The direction along which the wheel's speed is measured.
    ///
    /// This is not required to be a unit vector: a mecanum wheel uses (1, +-1)
    /// so that its speed equals the forward speed when driving straight.
    ///
    /// Frame: Robot body
    pub dir: Vector2<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Orientation of the rollers on a mecanum wheel.
///
/// In the usual X layout the front-left and rear-right wheels are
/// `NegDiagonal`, the front-right and rear-left wheels `PosDiagonal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Roller {
    /// Wheel speed is measured along (1, 1)
    PosDiagonal,
    /// Wheel speed is measured along (1, -1)
    NegDiagonal,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Wheel {
    /// A wheel at the given position driving along an arbitrary direction.
    pub fn new(pos_m: Vector2<f64>, dir: Vector2<f64>) -> Self {
        Self { pos_m, dir }
    }

    /// A conventional wheel which drives along the robot's x axis, as used
    /// by differential and skid steer drivetrains.
    pub fn fixed(pos_m: Vector2<f64>) -> Self {
        Self::new(pos_m, Vector2::new(1.0, 0.0))
    }

    /// A mecanum wheel.
    pub fn mecanum(pos_m: Vector2<f64>, roller: Roller) -> Self {
        let dir = match roller {
            Roller::PosDiagonal => Vector2::new(1.0, 1.0),
            Roller::NegDiagonal => Vector2::new(1.0, -1.0),
        };

        Self::new(pos_m, dir)
    }

    /// An omni wheel whose drive direction is at `angle_rad` from the robot's
    /// x axis (anticlockwise positive).
    pub fn omni(pos_m: Vector2<f64>, angle_rad: f64) -> Self {
        Self::new(pos_m, Vector2::new(angle_rad.cos(), angle_rad.sin()))
    }

    /// True if the wheel can't contribute to any lateral motion.
    pub fn is_longitudinal(&self) -> bool {
        self.dir.y.abs() <= f64::EPSILON * self.dir.norm()
    }

    /// True if the wheel's geometry is usable.
    pub(crate) fn is_valid(&self) -> bool {
        self.pos_m.iter().all(|v| v.is_finite())
            && self.dir.iter().all(|v| v.is_finite())
            && self.dir.norm() > 0.0
    }

    /// The row of the inverse kinematics matrix for this wheel, mapping
    /// (vx, vy, omega) to the wheel speed when turning about `centre_m`.
    ///
    /// The wheel's velocity is `(vx - omega * r_y, vy + omega * r_x)` where `r`
    /// is the wheel's offset from the centre of rotation, and its speed is the
    /// projection of that velocity onto `dir`.
    pub(crate) fn inverse_row(&self, centre_m: &Vector2<f64>) -> [f64; 3] {
        let r = self.pos_m - centre_m;

        [
            self.dir.x,
            self.dir.y,
            self.dir.y * r.x - self.dir.x * r.y,
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mecanum_rows() {
        let origin = Vector2::zeros();

        // Front left of a 12 by 12 layout
        let fl = Wheel::mecanum(Vector2::new(12.0, 12.0), Roller::NegDiagonal);
        assert_eq!(fl.inverse_row(&origin), [1.0, -1.0, -24.0]);

        // Front right
        let fr = Wheel::mecanum(Vector2::new(12.0, -12.0), Roller::PosDiagonal);
        assert_eq!(fr.inverse_row(&origin), [1.0, 1.0, 24.0]);

        // Moving the centre onto the wheel removes the rotational term
        assert_eq!(fl.inverse_row(&fl.pos_m), [1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_validity() {
        assert!(Wheel::fixed(Vector2::new(0.0, 0.3)).is_valid());
        assert!(Wheel::fixed(Vector2::new(0.0, 0.3)).is_longitudinal());
        assert!(!Wheel::omni(Vector2::zeros(), 1.0).is_longitudinal());
        assert!(!Wheel::new(Vector2::zeros(), Vector2::zeros()).is_valid());
        assert!(!Wheel::fixed(Vector2::new(f64::NAN, 0.0)).is_valid());
    }
}
