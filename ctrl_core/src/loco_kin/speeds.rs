//! Chassis and wheel speeds

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Speed of the robot body in its own frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChassisSpeeds {
    /// Forward velocity.
    ///
    /// Units: meters/second
    pub vx_ms: f64,

    /// Lateral velocity, left positive.
    ///
    /// Units: meters/second
    pub vy_ms: f64,

    /// Angular velocity about the centre of rotation, anticlockwise positive.
    ///
    /// Units: radians/second
    pub omega_rads: f64,
}

/// Speeds of each wheel in the drivetrain, in the order the wheels were given
/// when the kinematics were built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSpeeds {
    /// Units: meters/second
    pub speeds_ms: Vec<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ChassisSpeeds {
    pub fn new(vx_ms: f64, vy_ms: f64, omega_rads: f64) -> Self {
        Self {
            vx_ms,
            vy_ms,
            omega_rads,
        }
    }

    /// Convert a field-relative velocity into robot-relative chassis speeds,
    /// given the robot's heading in the field frame.
    pub fn from_field_relative(
        vx_ms: f64,
        vy_ms: f64,
        omega_rads: f64,
        heading_rad: f64,
    ) -> Self {
        let (sin, cos) = heading_rad.sin_cos();

        Self {
            vx_ms: vx_ms * cos + vy_ms * sin,
            vy_ms: -vx_ms * sin + vy_ms * cos,
            omega_rads,
        }
    }
}

impl WheelSpeeds {
    pub fn new(speeds_ms: Vec<f64>) -> Self {
        Self { speeds_ms }
    }

    /// Number of wheels.
    pub fn len(&self) -> usize {
        self.speeds_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds_ms.is_empty()
    }

    /// The largest absolute wheel speed, or zero if there are no wheels.
    pub fn max_abs(&self) -> f64 {
        self.speeds_ms.iter().fold(0.0, |max, s| s.abs().max(max))
    }

    /// Scale all wheel speeds down so the fastest wheel is no faster than
    /// `max_speed_ms`.
    ///
    /// All wheels are scaled by the same factor so the ratios (and therefore
    /// the direction of motion) are kept. Speeds are never scaled up.
    pub fn normalise(&mut self, max_speed_ms: f64) {
        let max_abs = self.max_abs();

        if max_abs > max_speed_ms {
            let scale = max_speed_ms / max_abs;
            for s in self.speeds_ms.iter_mut() {
                *s *= scale;
            }
        }
    }
}

impl From<Vec<f64>> for WheelSpeeds {
    fn from(speeds_ms: Vec<f64>) -> Self {
        Self::new(speeds_ms)
    }
}

impl AsRef<[f64]> for WheelSpeeds {
    fn as_ref(&self) -> &[f64] {
        &self.speeds_ms
    }
}
