//! Compact CSV codec
//!
//! Each state is one headerless record of its elements in flattening order.
//! Numbers are written with the shortest representation that reads back to
//! the same value.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{TrajError, Trajectory};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Encode a trajectory in the compact CSV form.
pub fn to_compact(traj: &Trajectory) -> Result<String, TrajError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for state in traj.states() {
        writer
            .write_record(state.to_elements().iter().map(|e| e.to_string()))
            .map_err(|e| TrajError::Parse(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TrajError::Parse(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| TrajError::Parse(e.to_string()))
}

/// Decode a trajectory from the compact CSV form.
///
/// Record boundaries are not significant: all fields are read in order and
/// regrouped into states, so a short record shows up as an element count
/// error.
pub fn from_compact(text: &str) -> Result<Trajectory, TrajError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut elements = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| TrajError::Parse(e.to_string()))?;

        for field in record.iter() {
            let value = field
                .parse::<f64>()
                .map_err(|e| TrajError::Parse(format!("invalid number {:?}: {}", field, e)))?;
            elements.push(value);
        }
    }

    Trajectory::from_elements(&elements)
}
