//! Trajectory states

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths::{lerp, wrap_pi};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Position and heading of the robot on the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2 {
    /// Units: meters,
    /// Frame: Field
    pub x_m: f64,

    /// Units: meters,
    /// Frame: Field
    pub y_m: f64,

    /// Angle from the field's +ve x axis, anticlockwise positive.
    ///
    /// Units: radians,
    /// Frame: Field
    pub heading_rad: f64,
}

/// A single sample of a planned motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajState {
    /// Time since the start of the trajectory.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Units: meters/second
    pub velocity_ms: f64,

    /// Units: meters/second^2
    pub acceleration_mss: f64,

    pub pose: Pose2,

    /// Units: 1/meters
    pub curvature_radpm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose2 {
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self { x_m, y_m, heading_rad }
    }

    /// Straight line distance to another pose.
    pub fn distance_to(&self, other: &Pose2) -> f64 {
        (other.x_m - self.x_m).hypot(other.y_m - self.y_m)
    }

    /// Interpolate towards `other`, with the heading turning the shortest way.
    pub fn interpolate(&self, other: &Pose2, frac: f64) -> Pose2 {
        let dh = wrap_pi(other.heading_rad - self.heading_rad);

        Pose2 {
            x_m: lerp(self.x_m, other.x_m, frac),
            y_m: lerp(self.y_m, other.y_m, frac),
            heading_rad: wrap_pi(self.heading_rad + dh * frac),
        }
    }
}

impl TrajState {
    pub fn new(
        time_s: f64,
        velocity_ms: f64,
        acceleration_mss: f64,
        pose: Pose2,
        curvature_radpm: f64,
    ) -> Self {
        Self {
            time_s,
            velocity_ms,
            acceleration_mss,
            pose,
            curvature_radpm,
        }
    }

    /// The state's elements in flattening order.
    pub fn to_elements(&self) -> [f64; super::NUM_STATE_ELEMENTS] {
        [
            self.time_s,
            self.velocity_ms,
            self.acceleration_mss,
            self.pose.x_m,
            self.pose.y_m,
            self.pose.heading_rad,
            self.curvature_radpm,
        ]
    }

    /// Build a state from exactly [`NUM_STATE_ELEMENTS`](super::NUM_STATE_ELEMENTS)
    /// elements in flattening order.
    pub(crate) fn from_elements(e: &[f64]) -> Self {
        Self::new(e[0], e[1], e[2], Pose2::new(e[3], e[4], e[5]), e[6])
    }

    /// Interpolate between this state and a later state `end`, where `frac`
    /// is the fraction of the time between them.
    ///
    /// Velocity follows from this state's constant acceleration, and the pose
    /// moves along the segment by the fraction of its length that has been
    /// travelled. Curvature is interpolated linearly in time.
    pub fn interpolate(&self, end: &TrajState, frac: f64) -> TrajState {
        let time_s = lerp(self.time_s, end.time_s, frac);
        let dt = time_s - self.time_s;

        let reversing = self.velocity_ms < 0.0
            || (self.velocity_ms == 0.0 && self.acceleration_mss < 0.0);

        let velocity_ms = self.velocity_ms + self.acceleration_mss * dt;
        let mut dist_m = self.velocity_ms * dt + 0.5 * self.acceleration_mss * dt * dt;
        if reversing {
            dist_m = -dist_m;
        }

        let seg_length_m = self.pose.distance_to(&end.pose);
        let pose_frac = if seg_length_m > 0.0 {
            dist_m / seg_length_m
        } else {
            frac
        };

        TrajState {
            time_s,
            velocity_ms,
            acceleration_mss: self.acceleration_mss,
            pose: self.pose.interpolate(&end.pose, pose_frac),
            curvature_radpm: lerp(self.curvature_radpm, end.curvature_radpm, frac),
        }
    }
}
