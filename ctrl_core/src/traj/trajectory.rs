//! Trajectory container and sampling

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{Pose2, TrajError, TrajState, NUM_STATE_ELEMENTS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An ordered sequence of trajectory states with non-decreasing timestamps.
///
/// An empty trajectory is valid and represents no motion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    states: Vec<TrajState>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Trajectory {
    /// Create a new trajectory from the given states.
    ///
    /// Fails if any state's timestamp is earlier than the one before it, or
    /// is NaN.
    pub fn new(states: Vec<TrajState>) -> Result<Self, TrajError> {
        let mut prev_s = f64::NEG_INFINITY;

        for (index, state) in states.iter().enumerate() {
            // Written this way round so NaN fails the check
            if !(state.time_s >= prev_s) {
                return Err(TrajError::NonMonotonicTime { index });
            }
            prev_s = state.time_s;
        }

        Ok(Self { states })
    }

    /// Create an empty trajectory.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn states(&self) -> &[TrajState] {
        &self.states
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Time of the final state, or zero for an empty trajectory.
    ///
    /// Units: seconds
    pub fn total_time(&self) -> f64 {
        self.states.last().map(|s| s.time_s).unwrap_or(0.0)
    }

    /// Pose of the first state, if there is one.
    pub fn initial_pose(&self) -> Option<Pose2> {
        self.states.first().map(|s| s.pose)
    }

    /// Sample the trajectory at the given time.
    ///
    /// Times before the start or after the end give the first or last state.
    /// Returns `None` if the trajectory is empty.
    pub fn sample(&self, time_s: f64) -> Option<TrajState> {
        let first = self.states.first()?;
        let last = self.states.last()?;

        if time_s <= first.time_s {
            return Some(*first);
        }
        if time_s >= last.time_s {
            return Some(*last);
        }

        // First state at or after the sample time. Since the time is strictly
        // inside the trajectory this is never the first state.
        let end_idx = self.states.partition_point(|s| s.time_s < time_s);
        let start = &self.states[end_idx - 1];
        let end = &self.states[end_idx];

        let span_s = end.time_s - start.time_s;
        if span_s <= 0.0 {
            return Some(*end);
        }

        Some(start.interpolate(end, (time_s - start.time_s) / span_s))
    }

    /// Flatten the trajectory into [`NUM_STATE_ELEMENTS`] numbers per state.
    ///
    /// The elements of each state are, in order: time, velocity, acceleration,
    /// x, y, heading and curvature.
    pub fn to_elements(&self) -> Vec<f64> {
        self.states.iter().flat_map(|s| s.to_elements()).collect()
    }

    /// Rebuild a trajectory from its flattened elements.
    pub fn from_elements(elements: &[f64]) -> Result<Self, TrajError> {
        if elements.len() % NUM_STATE_ELEMENTS != 0 {
            return Err(TrajError::ElementCount(elements.len()));
        }

        Self::new(
            elements
                .chunks_exact(NUM_STATE_ELEMENTS)
                .map(TrajState::from_elements)
                .collect(),
        )
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    /// A short trajectory driving along x then curving left.
    pub(crate) fn test_traj() -> Trajectory {
        Trajectory::new(vec![
            TrajState::new(0.0, 0.0, 1.0, Pose2::new(0.0, 0.0, 0.0), 0.0),
            TrajState::new(1.0, 1.0, 0.0, Pose2::new(0.5, 0.0, 0.0), 0.0),
            TrajState::new(2.0, 1.0, -0.5, Pose2::new(1.5, 0.1, 0.2), 0.4),
            TrajState::new(3.1, 0.45, -0.5, Pose2::new(2.2, 0.4, 0.6), 0.7),
        ])
        .unwrap()
    }

    #[test]
    fn test_monotonic_time() {
        let s = |t| TrajState::new(t, 0.0, 0.0, Pose2::default(), 0.0);

        // Repeated timestamps are allowed
        assert!(Trajectory::new(vec![s(0.0), s(1.0), s(1.0), s(2.0)]).is_ok());

        let err = Trajectory::new(vec![s(0.0), s(1.0), s(0.5)]).unwrap_err();
        assert!(matches!(err, TrajError::NonMonotonicTime { index: 2 }));
        assert_eq!(err.kind(), ErrorKind::Parse);

        assert!(matches!(
            Trajectory::new(vec![s(f64::NAN)]),
            Err(TrajError::NonMonotonicTime { index: 0 })
        ));
    }

    #[test]
    fn test_queries() {
        let traj = test_traj();
        assert_eq!(traj.len(), 4);
        assert_eq!(traj.total_time(), 3.1);
        assert_eq!(traj.initial_pose(), Some(Pose2::new(0.0, 0.0, 0.0)));

        let empty = Trajectory::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.total_time(), 0.0);
        assert_eq!(empty.initial_pose(), None);
        assert_eq!(empty.sample(1.0), None);
    }

    #[test]
    fn test_sample() {
        let traj = test_traj();

        // Clamped at the ends
        assert_eq!(traj.sample(-1.0), Some(traj.states()[0]));
        assert_eq!(traj.sample(10.0), Some(traj.states()[3]));

        // Exactly on a state
        let s = traj.sample(1.0).unwrap();
        assert_relative_eq!(s.pose.x_m, 0.5);

        // Half way through the first segment, accelerating from rest
        let s = traj.sample(0.5).unwrap();
        assert_relative_eq!(s.time_s, 0.5);
        assert_relative_eq!(s.velocity_ms, 0.5);
        assert_relative_eq!(s.pose.x_m, 0.125, epsilon = 1e-12);
        assert_relative_eq!(s.pose.y_m, 0.0);

        // Curvature is linear in time
        let s = traj.sample(1.5).unwrap();
        assert_relative_eq!(s.curvature_radpm, 0.2, epsilon = 1e-12);
        assert_relative_eq!(s.pose.heading_rad, 0.1 / 1.01_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_elements() {
        for traj in [
            Trajectory::empty(),
            Trajectory::new(vec![test_traj().states()[2]]).unwrap(),
            test_traj(),
        ] {
            let elements = traj.to_elements();
            assert_eq!(elements.len(), NUM_STATE_ELEMENTS * traj.len());
            assert_eq!(Trajectory::from_elements(&elements).unwrap(), traj);
        }

        let elements = test_traj().to_elements();
        assert_eq!(&elements[14..21], &[2.0, 1.0, -0.5, 1.5, 0.1, 0.2, 0.4]);
    }

    #[test]
    fn test_bad_element_count() {
        let elements = test_traj().to_elements();

        let err = Trajectory::from_elements(&elements[..elements.len() - 3]).unwrap_err();
        assert!(matches!(err, TrajError::ElementCount(25)));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
