//! Parameters structure for the kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::Deserialize;

use super::{KinError, Wheel};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drivetrain geometry parameters.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Params {
    /// The position of each wheel in the robot body frame.
    ///
    /// Units: meters,
    /// Frame: Robot body
    pub wheel_pos_m: Vec<[f64; 2]>,

    /// The drive direction of each wheel, in the same order as
    /// `wheel_pos_m`.
    ///
    /// Frame: Robot body
    pub wheel_dir: Vec<[f64; 2]>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Build the list of wheels described by these parameters.
    pub fn wheels(&self) -> Result<Vec<Wheel>, KinError> {
        if self.wheel_pos_m.len() != self.wheel_dir.len() {
            return Err(KinError::ParamMismatch {
                num_pos: self.wheel_pos_m.len(),
                num_dir: self.wheel_dir.len(),
            });
        }

        Ok(self
            .wheel_pos_m
            .iter()
            .zip(self.wheel_dir.iter())
            .map(|(p, d)| Wheel::new(Vector2::new(p[0], p[1]), Vector2::new(d[0], d[1])))
            .collect())
    }
}
