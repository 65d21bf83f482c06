//! Implementation of the kinematics engine

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::{DVector, Vector2, Vector3};
use std::path::Path;

// Internal
use super::{
    ChassisSpeeds, KinError, Params, Roller, Wheel, WheelSpeeds, MIN_NUM_WHEELS, NUM_CHASSIS_DOF,
};
use crate::linalg::{pseudo_inverse, rank, Matrix};
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematics of a drivetrain with a fixed set of wheels.
///
/// The inverse kinematics matrix (chassis speeds to wheel speeds) and its
/// pseudo-inverse (wheel speeds to chassis speeds) are built once on
/// construction and only read afterwards, so a `WheelKinematics` can be shared
/// between threads freely.
#[derive(Debug, Clone)]
pub struct WheelKinematics {
    wheels: Vec<Wheel>,

    /// False if no wheel can push sideways, in which case lateral velocity is
    /// neither commanded nor observed.
    holonomic: bool,

    /// k x 3 matrix mapping (vx, vy, omega) about the origin to wheel speeds
    inv_kin: Matrix,

    /// 3 x k pseudo-inverse of `inv_kin`
    fwd_kin: Matrix,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WheelKinematics {
    /// Build the kinematics for the given wheels.
    ///
    /// At least two wheels are needed, and together they must be able to
    /// observe every chassis degree of freedom. The exception is a drivetrain
    /// where every wheel drives along the robot's x axis (differential or skid
    /// steer), which only needs to observe forward and angular velocity.
    pub fn new(wheels: Vec<Wheel>) -> Result<Self, KinError> {
        if wheels.len() < MIN_NUM_WHEELS {
            return Err(KinError::NotEnoughWheels(wheels.len()));
        }

        if let Some(i) = wheels.iter().position(|w| !w.is_valid()) {
            return Err(KinError::InvalidWheel(i));
        }

        let holonomic = !wheels.iter().all(|w| w.is_longitudinal());
        let inv_kin = Self::build_inv_kin(&wheels, holonomic, &Vector2::zeros());

        let required = if holonomic {
            NUM_CHASSIS_DOF
        } else {
            NUM_CHASSIS_DOF - 1
        };
        let rank = rank(&inv_kin)?;
        if rank < required {
            return Err(KinError::DegenerateGeometry { rank, required });
        }

        let fwd_kin = pseudo_inverse(&inv_kin)?;

        debug!(
            "Built kinematics for {} wheels (holonomic: {})",
            wheels.len(),
            holonomic
        );

        Ok(Self {
            wheels,
            holonomic,
            inv_kin,
            fwd_kin,
        })
    }

    /// Kinematics of a four wheel mecanum drivetrain in the usual X roller
    /// layout.
    ///
    /// Wheel speeds are ordered front left, front right, rear left, rear right.
    pub fn mecanum(
        front_left_m: Vector2<f64>,
        front_right_m: Vector2<f64>,
        rear_left_m: Vector2<f64>,
        rear_right_m: Vector2<f64>,
    ) -> Result<Self, KinError> {
        Self::new(vec![
            Wheel::mecanum(front_left_m, Roller::NegDiagonal),
            Wheel::mecanum(front_right_m, Roller::PosDiagonal),
            Wheel::mecanum(rear_left_m, Roller::PosDiagonal),
            Wheel::mecanum(rear_right_m, Roller::NegDiagonal),
        ])
    }

    /// Kinematics of a differential drivetrain with the given distance
    /// between the left and right wheels.
    ///
    /// Wheel speeds are ordered left, right.
    pub fn differential(track_width_m: f64) -> Result<Self, KinError> {
        let half = track_width_m / 2.0;

        Self::new(vec![
            Wheel::fixed(Vector2::new(0.0, half)),
            Wheel::fixed(Vector2::new(0.0, -half)),
        ])
    }

    /// Build the kinematics from a parameters structure.
    pub fn from_params(params: &Params) -> Result<Self, KinError> {
        Self::new(params.wheels()?)
    }

    /// Load a TOML parameter file and build the kinematics it describes.
    pub fn from_param_file<P: AsRef<Path>>(path: P) -> Result<Self, KinError> {
        let params: Params = params::load(path).map_err(KinError::ParamLoadError)?;

        Self::from_params(&params)
    }

    /// The wheels of this drivetrain, in wheel speed order.
    pub fn wheels(&self) -> &[Wheel] {
        &self.wheels
    }

    /// Number of wheels.
    pub fn num_wheels(&self) -> usize {
        self.wheels.len()
    }

    /// True if the drivetrain can move sideways.
    pub fn is_holonomic(&self) -> bool {
        self.holonomic
    }

    /// Calculate the wheel speeds needed to achieve the given chassis speeds,
    /// turning about the robot centre.
    pub fn to_wheel_speeds(&self, chassis: &ChassisSpeeds) -> WheelSpeeds {
        Self::apply(&self.inv_kin, chassis)
    }

    /// Calculate the wheel speeds needed to achieve the given chassis speeds
    /// while turning about `centre_m` instead of the robot centre.
    ///
    /// Only the moment arm of the rotational part changes, the translational
    /// part is identical to [`to_wheel_speeds`](Self::to_wheel_speeds).
    pub fn to_wheel_speeds_about(
        &self,
        chassis: &ChassisSpeeds,
        centre_m: &Vector2<f64>,
    ) -> WheelSpeeds {
        let inv_kin = Self::build_inv_kin(&self.wheels, self.holonomic, centre_m);

        Self::apply(&inv_kin, chassis)
    }

    /// Estimate the chassis speeds from measured wheel speeds.
    ///
    /// This is the least-squares fit through the pseudo-inverse of the
    /// kinematics, which is exact when the wheel speeds are consistent with
    /// a rigid body motion.
    pub fn to_chassis_speeds(&self, wheel_speeds: &WheelSpeeds) -> Result<ChassisSpeeds, KinError> {
        if wheel_speeds.len() != self.num_wheels() {
            return Err(KinError::WheelCountMismatch {
                expected: self.num_wheels(),
                found: wheel_speeds.len(),
            });
        }

        let chassis = &self.fwd_kin * DVector::from_column_slice(&wheel_speeds.speeds_ms);

        Ok(ChassisSpeeds::new(chassis[0], chassis[1], chassis[2]))
    }

    // ---- PRIVATE ----

    fn build_inv_kin(wheels: &[Wheel], holonomic: bool, centre_m: &Vector2<f64>) -> Matrix {
        let mut inv_kin = Matrix::zeros(wheels.len(), NUM_CHASSIS_DOF);

        for (i, wheel) in wheels.iter().enumerate() {
            let mut row = wheel.inverse_row(centre_m);

            // Drop any rounding noise in the lateral column so the
            // pseudo-inverse never reports a lateral velocity
            if !holonomic {
                row[1] = 0.0;
            }

            for (j, v) in row.iter().enumerate() {
                inv_kin[(i, j)] = *v;
            }
        }

        inv_kin
    }

    fn apply(inv_kin: &Matrix, chassis: &ChassisSpeeds) -> WheelSpeeds {
        let v = Vector3::new(chassis.vx_ms, chassis.vy_ms, chassis.omega_rads);

        WheelSpeeds::new((inv_kin * v).iter().cloned().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const TOL: f64 = 0.1;

    fn mecanum() -> WheelKinematics {
        WheelKinematics::mecanum(
            Vector2::new(12.0, 12.0),
            Vector2::new(12.0, -12.0),
            Vector2::new(-12.0, 12.0),
            Vector2::new(-12.0, -12.0),
        )
        .unwrap()
    }

    fn assert_wheels(speeds: &WheelSpeeds, expected: &[f64]) {
        assert_eq!(speeds.len(), expected.len());
        for (s, e) in speeds.speeds_ms.iter().zip(expected.iter()) {
            assert_relative_eq!(*s, *e, epsilon = TOL);
        }
    }

    fn assert_chassis(speeds: &ChassisSpeeds, vx: f64, vy: f64, omega: f64) {
        assert_relative_eq!(speeds.vx_ms, vx, epsilon = TOL);
        assert_relative_eq!(speeds.vy_ms, vy, epsilon = TOL);
        assert_relative_eq!(speeds.omega_rads, omega, epsilon = TOL);
    }

    #[test]
    fn test_straight_line() {
        let kin = mecanum();

        let wheels = kin.to_wheel_speeds(&ChassisSpeeds::new(5.0, 0.0, 0.0));
        assert_wheels(&wheels, &[5.0, 5.0, 5.0, 5.0]);

        let chassis = kin
            .to_chassis_speeds(&WheelSpeeds::new(vec![5.0, 5.0, 5.0, 5.0]))
            .unwrap();
        assert_chassis(&chassis, 5.0, 0.0, 0.0);
    }

    #[test]
    fn test_strafe() {
        let kin = mecanum();

        let wheels = kin.to_wheel_speeds(&ChassisSpeeds::new(0.0, 4.0, 0.0));
        assert_wheels(&wheels, &[-4.0, 4.0, 4.0, -4.0]);

        let chassis = kin
            .to_chassis_speeds(&WheelSpeeds::new(vec![-5.0, 5.0, 5.0, -5.0]))
            .unwrap();
        assert_chassis(&chassis, 0.0, 5.0, 0.0);
    }

    #[test]
    fn test_rotation() {
        let kin = mecanum();
        let w = 150.79644737;

        let wheels = kin.to_wheel_speeds(&ChassisSpeeds::new(0.0, 0.0, 2.0 * PI));
        assert_wheels(&wheels, &[-w, w, -w, w]);

        let chassis = kin
            .to_chassis_speeds(&WheelSpeeds::new(vec![-w, w, -w, w]))
            .unwrap();
        assert_chassis(&chassis, 0.0, 0.0, 2.0 * PI);
    }

    #[test]
    fn test_mixed_rotation_translation() {
        let kin = mecanum();

        let wheels = kin.to_wheel_speeds(&ChassisSpeeds::new(2.0, 3.0, 1.0));
        assert_wheels(&wheels, &[-25.0, 29.0, -19.0, 23.0]);

        let chassis = kin
            .to_chassis_speeds(&WheelSpeeds::new(vec![-17.677670, 20.506097, -13.435, 16.26]))
            .unwrap();
        assert_chassis(&chassis, 1.41335, 2.1221, 0.707);
    }

    #[test]
    fn test_off_centre_rotation() {
        let kin = mecanum();
        let fl = Vector2::new(12.0, 12.0);

        let wheels = kin.to_wheel_speeds_about(&ChassisSpeeds::new(0.0, 0.0, 1.0), &fl);
        assert_wheels(&wheels, &[0.0, 24.0, -24.0, 48.0]);

        let wheels = kin.to_wheel_speeds_about(&ChassisSpeeds::new(5.0, 2.0, 1.0), &fl);
        assert_wheels(&wheels, &[3.0, 31.0, -17.0, 51.0]);

        let chassis = kin
            .to_chassis_speeds(&WheelSpeeds::new(vec![0.0, 16.971, -16.971, 33.941]))
            .unwrap();
        assert_chassis(&chassis, 8.48525, -8.48525, 0.707);

        let chassis = kin
            .to_chassis_speeds(&WheelSpeeds::new(vec![2.12, 21.92, -12.02, 36.06]))
            .unwrap();
        assert_chassis(&chassis, 12.02, -7.07, 0.707);
    }

    #[test]
    fn test_centre_only_changes_rotation() {
        let kin = mecanum();
        let centre = Vector2::new(3.0, -7.0);
        let translation = ChassisSpeeds::new(1.5, -2.5, 0.0);

        assert_eq!(
            kin.to_wheel_speeds_about(&translation, &centre),
            kin.to_wheel_speeds(&translation)
        );
    }

    #[test]
    fn test_normalise_after_inverse() {
        let kin = mecanum();

        let mut wheels = kin.to_wheel_speeds(&ChassisSpeeds::new(2.0, 3.0, 1.0));
        wheels.normalise(10.0);

        assert_relative_eq!(wheels.max_abs(), 10.0, epsilon = 1e-12);

        // Direction of travel is unchanged, only the magnitude
        let chassis = kin.to_chassis_speeds(&wheels).unwrap();
        let k = 10.0 / 29.0;
        assert_relative_eq!(chassis.vx_ms, 2.0 * k, epsilon = 1e-9);
        assert_relative_eq!(chassis.vy_ms, 3.0 * k, epsilon = 1e-9);
        assert_relative_eq!(chassis.omega_rads, k, epsilon = 1e-9);
    }

    #[test]
    fn test_differential() {
        let kin = WheelKinematics::differential(0.5).unwrap();
        assert!(!kin.is_holonomic());

        let wheels = kin.to_wheel_speeds(&ChassisSpeeds::new(1.0, 0.0, 2.0));
        assert_eq!(wheels.speeds_ms, vec![0.5, 1.5]);

        // Lateral demands can't be met and are ignored
        let chassis = kin
            .to_chassis_speeds(&WheelSpeeds::new(vec![0.5, 1.5]))
            .unwrap();
        assert_relative_eq!(chassis.vx_ms, 1.0, epsilon = 1e-12);
        assert_relative_eq!(chassis.vy_ms, 0.0, epsilon = 1e-12);
        assert_relative_eq!(chassis.omega_rads, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_three_wheel_omni() {
        // Kiwi drive, wheels at 120 degree spacing driving tangentially
        let wheels = (0..3)
            .map(|i| {
                let a = i as f64 * 2.0 * PI / 3.0;
                Wheel::omni(Vector2::new(0.2 * a.cos(), 0.2 * a.sin()), a + PI / 2.0)
            })
            .collect();
        let kin = WheelKinematics::new(wheels).unwrap();
        assert!(kin.is_holonomic());

        let demand = ChassisSpeeds::new(0.4, -0.3, 1.2);
        let chassis = kin.to_chassis_speeds(&kin.to_wheel_speeds(&demand)).unwrap();

        assert_relative_eq!(chassis.vx_ms, demand.vx_ms, epsilon = 1e-12);
        assert_relative_eq!(chassis.vy_ms, demand.vy_ms, epsilon = 1e-12);
        assert_relative_eq!(chassis.omega_rads, demand.omega_rads, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            WheelKinematics::new(vec![Wheel::fixed(Vector2::new(0.0, 0.1))]),
            Err(KinError::NotEnoughWheels(1))
        ));
        assert!(matches!(
            WheelKinematics::new(vec![]),
            Err(KinError::NotEnoughWheels(0))
        ));

        // All mecanum wheels at the centre can't observe rotation
        let err = WheelKinematics::mecanum(
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::zeros(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            KinError::DegenerateGeometry {
                rank: 2,
                required: 3
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Dimension);

        // Zero track width differential
        assert!(matches!(
            WheelKinematics::differential(0.0),
            Err(KinError::DegenerateGeometry { .. })
        ));

        assert!(matches!(
            WheelKinematics::new(vec![
                Wheel::fixed(Vector2::new(0.0, 0.1)),
                Wheel::new(Vector2::new(0.0, -0.1), Vector2::zeros()),
            ]),
            Err(KinError::InvalidWheel(1))
        ));
    }

    #[test]
    fn test_wheel_count_mismatch() {
        let kin = mecanum();

        assert!(matches!(
            kin.to_chassis_speeds(&WheelSpeeds::new(vec![1.0, 2.0, 3.0])),
            Err(KinError::WheelCountMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_from_param_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../params/mecanum_kin.toml");
        let kin = WheelKinematics::from_param_file(path).unwrap();
        assert_eq!(kin.num_wheels(), 4);

        // Rotation only: |speed| = omega * (x + y) for every wheel
        let wheels = kin.to_wheel_speeds(&ChassisSpeeds::new(0.0, 0.0, 1.0));
        assert_wheels(&wheels, &[-0.55, 0.55, -0.55, 0.55]);

        let err = WheelKinematics::from_param_file("/not/a/real/file.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);

        let params = Params {
            wheel_pos_m: vec![[0.0, 0.1], [0.0, -0.1]],
            wheel_dir: vec![[1.0, 0.0]],
        };
        assert!(matches!(
            WheelKinematics::from_params(&params),
            Err(KinError::ParamMismatch {
                num_pos: 2,
                num_dir: 1
            })
        ));
    }

    #[test]
    fn test_shared_between_threads() {
        let kin = mecanum();
        let demand = ChassisSpeeds::new(2.0, 3.0, 1.0);
        let expected = kin.to_wheel_speeds(&demand);

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(kin.to_wheel_speeds(&demand), expected));
            }
        });
    }
}
