//! PathWeaver JSON codec
//!
//! A trajectory is stored as a JSON array with one object per state:
//!
//! ```json
//! [{"time": 0.0, "velocity": 0.0, "acceleration": 1.0,
//!   "pose": {"translation": {"x": 0.0, "y": 0.0}, "rotation": {"radians": 0.0}},
//!   "curvature": 0.0}]
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Internal
use super::{Pose2, TrajError, TrajState, Trajectory};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct JsonState {
    time: f64,
    velocity: f64,
    acceleration: f64,
    pose: JsonPose,
    curvature: f64,
}

#[derive(Serialize, Deserialize)]
struct JsonPose {
    translation: JsonTranslation,
    rotation: JsonRotation,
}

#[derive(Serialize, Deserialize)]
struct JsonTranslation {
    x: f64,
    y: f64,
}

#[derive(Serialize, Deserialize)]
struct JsonRotation {
    radians: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl From<&TrajState> for JsonState {
    fn from(s: &TrajState) -> Self {
        Self {
            time: s.time_s,
            velocity: s.velocity_ms,
            acceleration: s.acceleration_mss,
            pose: JsonPose {
                translation: JsonTranslation {
                    x: s.pose.x_m,
                    y: s.pose.y_m,
                },
                rotation: JsonRotation {
                    radians: s.pose.heading_rad,
                },
            },
            curvature: s.curvature_radpm,
        }
    }
}

impl From<JsonState> for TrajState {
    fn from(s: JsonState) -> Self {
        TrajState::new(
            s.time,
            s.velocity,
            s.acceleration,
            Pose2::new(
                s.pose.translation.x,
                s.pose.translation.y,
                s.pose.rotation.radians,
            ),
            s.curvature,
        )
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Serialise a trajectory into PathWeaver JSON.
///
/// JSON numbers can't be infinite or NaN, so a state with any non-finite
/// field is rejected rather than written as `null`.
pub fn serialize(traj: &Trajectory) -> Result<String, TrajError> {
    if let Some(index) = traj
        .states()
        .iter()
        .position(|s| s.to_elements().iter().any(|e| !e.is_finite()))
    {
        return Err(TrajError::NonFinite { index });
    }

    let states: Vec<JsonState> = traj.states().iter().map(JsonState::from).collect();

    serde_json::to_string(&states).map_err(|e| TrajError::Parse(e.to_string()))
}

/// Deserialise a trajectory from PathWeaver JSON.
pub fn deserialize(json: &str) -> Result<Trajectory, TrajError> {
    let states: Vec<JsonState> =
        serde_json::from_str(json).map_err(|e| TrajError::Parse(e.to_string()))?;

    Trajectory::new(states.into_iter().map(TrajState::from).collect())
}

/// Load a trajectory from a PathWeaver JSON file.
pub fn read_pathweaver_json<P: AsRef<Path>>(path: P) -> Result<Trajectory, TrajError> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|source| TrajError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let traj = deserialize(&json)?;
    debug!("Read {} trajectory states from {:?}", traj.len(), path);

    Ok(traj)
}

/// Write a trajectory to a PathWeaver JSON file, replacing any existing file.
pub fn write_pathweaver_json<P: AsRef<Path>>(traj: &Trajectory, path: P) -> Result<(), TrajError> {
    let path = path.as_ref();

    let json = serialize(traj)?;
    std::fs::write(path, json).map_err(|source| TrajError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} trajectory states to {:?}", traj.len(), path);

    Ok(())
}
