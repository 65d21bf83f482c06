//! # Trajectory module
//!
//! A trajectory is a time ordered sequence of motion states produced by a
//! planner and consumed by a follower. This module provides the data model,
//! time sampling, and the codecs used to move trajectories between tools:
//!
//! - a flat list of [`NUM_STATE_ELEMENTS`] numbers per state, for boundaries
//!   which can only pass numeric arrays,
//! - PathWeaver JSON, the field labelled format used by path planning tools,
//! - a compact CSV form with one headerless record per state.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod compact;
mod json;
mod state;
mod trajectory;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::path::PathBuf;

// Internal
pub use compact::*;
pub use json::*;
pub use state::*;
pub use trajectory::*;

use crate::ErrorKind;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of elements a single state flattens to: time, velocity,
/// acceleration, x, y, heading and curvature.
pub const NUM_STATE_ELEMENTS: usize = 7;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while building, decoding or storing a trajectory.
#[derive(Debug, thiserror::Error)]
pub enum TrajError {
    #[error("State {index} has a timestamp earlier than (or not comparable to) the state before it")]
    NonMonotonicTime { index: usize },

    #[error(
        "Expected a multiple of {} trajectory elements, found {0}",
        NUM_STATE_ELEMENTS
    )]
    ElementCount(usize),

    #[error("State {index} has a non-finite field, which JSON cannot represent")]
    NonFinite { index: usize },

    #[error("Could not parse the trajectory: {0}")]
    Parse(String),

    #[error("Could not access trajectory file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajError {
    /// The broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrajError::Io { .. } => ErrorKind::Io,
            _ => ErrorKind::Parse,
        }
    }
}
