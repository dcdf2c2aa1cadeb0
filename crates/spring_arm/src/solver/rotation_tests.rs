//! Tests for rotation solver.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    use crate::arm::{InheritRotation, RotationLag, SpringArmSettings};
    use crate::solver::rotation::look_rotation;
    use crate::solver::{solve_rotation, EulerAngles, Pose};

    const EPSILON: f32 = 1e-4;

    /// Угол между rotations (радианы), q и -q — одна rotation
    fn angle_between(a: Quat, b: Quat) -> f32 {
        let dot = a.dot(b).abs().min(1.0);
        2.0 * dot.acos()
    }

    /// Совпадение rotations без acos (около 1.0 он теряет точность)
    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.dot(b).abs() > 1.0 - 1e-5
    }

    #[test]
    fn test_rotation_is_sticky_by_default() {
        let settings = SpringArmSettings::default();
        let socket_rotation = Quat::from_euler(EulerRot::YXZ, 0.4, -0.3, 0.1);
        let arm = Pose::new(Vec3::ZERO, Quat::from_rotation_y(1.2));

        let result = solve_rotation(&settings, arm, socket_rotation, Vec3::new(0.0, 0.0, 4.0), 0.016);

        // Ни auto_focus, ни inherit — rotation socket'а не трогаем
        assert_eq!(result, socket_rotation);
    }

    #[test]
    fn test_auto_focus_looks_at_arm() {
        let settings = SpringArmSettings {
            auto_focus: true,
            ..Default::default()
        };
        let arm = Pose::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let socket_translation = Vec3::new(0.0, 3.0, 4.0);

        let result = solve_rotation(&settings, arm, Quat::IDENTITY, socket_translation, 0.016);

        let forward = result * Vec3::NEG_Z;
        let expected = (arm.translation - socket_translation).normalize();
        assert!(forward.distance(expected) < EPSILON);
    }

    #[test]
    fn test_auto_focus_coincident_keeps_baseline() {
        let settings = SpringArmSettings {
            auto_focus: true,
            ..Default::default()
        };
        let baseline = Quat::from_rotation_x(0.5);
        let arm = Pose::from_translation(Vec3::ONE);

        let result = solve_rotation(&settings, arm, baseline, Vec3::ONE, 0.016);

        assert!(result.is_finite());
        assert_eq!(result, baseline);
        assert!(look_rotation(Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn test_inherit_yaw_with_auto_focus() {
        let settings = SpringArmSettings {
            auto_focus: true,
            inherit_rotation: InheritRotation::yaw_only(),
            ..Default::default()
        };
        let arm = Pose::new(Vec3::ZERO, Quat::from_euler(EulerRot::YXZ, 0.9, 0.2, 0.05));
        let socket_translation = Vec3::new(1.0, 2.0, 4.0);

        let result = solve_rotation(&settings, arm, Quat::IDENTITY, socket_translation, 0.016);

        let result_euler = EulerAngles::from_quat(result);
        let arm_euler = EulerAngles::from_quat(arm.rotation);
        let focus_euler = EulerAngles::from_quat(look_rotation(socket_translation, arm.translation).unwrap());

        // Yaw — от arm'а, pitch/roll — от look rotation
        assert!((result_euler.yaw - arm_euler.yaw).abs() < EPSILON);
        assert!((result_euler.pitch - focus_euler.pitch).abs() < EPSILON);
        assert!((result_euler.roll - focus_euler.roll).abs() < EPSILON);
    }

    #[test]
    fn test_inherit_all_axes_copies_arm_rotation() {
        let settings = SpringArmSettings {
            inherit_rotation: InheritRotation::all(),
            ..Default::default()
        };
        let arm = Pose::new(Vec3::ZERO, Quat::from_euler(EulerRot::YXZ, -1.1, 0.35, 0.2));

        let result = solve_rotation(&settings, arm, Quat::from_rotation_z(2.0), Vec3::Z, 0.016);

        assert!(same_rotation(result, arm.rotation));
    }

    #[test]
    fn test_inherit_flags_ignored_when_disabled() {
        let settings = SpringArmSettings {
            inherit_rotation: InheritRotation {
                enabled: false,
                pitch: true,
                yaw: true,
                roll: true,
            },
            ..Default::default()
        };
        let socket_rotation = Quat::from_rotation_x(0.3);
        let arm = Pose::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));

        let result = solve_rotation(&settings, arm, socket_rotation, Vec3::Z, 0.016);
        assert_eq!(result, socket_rotation);
    }

    #[test]
    fn test_inherit_pitch_keeps_socket_yaw() {
        let settings = SpringArmSettings {
            inherit_rotation: InheritRotation {
                enabled: true,
                pitch: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let socket_rotation = Quat::from_euler(EulerRot::YXZ, 0.5, 0.0, 0.0);
        let arm = Pose::new(Vec3::ZERO, Quat::from_euler(EulerRot::YXZ, -0.8, -0.4, 0.0));

        let result = EulerAngles::from_quat(solve_rotation(&settings, arm, socket_rotation, Vec3::Z, 0.016));

        assert!((result.yaw - 0.5).abs() < EPSILON);
        assert!((result.pitch + 0.4).abs() < EPSILON);
        assert!(result.roll.abs() < EPSILON);
    }

    #[test]
    fn test_rotation_lag_slerps_by_factor() {
        let settings = SpringArmSettings {
            inherit_rotation: InheritRotation::all(),
            rotation_lag: RotationLag::new(2.0),
            ..Default::default()
        };
        let arm = Pose::new(Vec3::ZERO, Quat::from_rotation_y(1.0));

        // factor = 2.0 × 0.1 = 0.2 → 20% пути
        let result = solve_rotation(&settings, arm, Quat::IDENTITY, Vec3::Z, 0.1);

        assert!((angle_between(result, Quat::IDENTITY) - 0.2).abs() < EPSILON);
        assert!((angle_between(result, arm.rotation) - 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_lag_zero_speed_holds() {
        let settings = SpringArmSettings {
            auto_focus: true,
            rotation_lag: RotationLag::new(0.0),
            ..Default::default()
        };
        let socket_rotation = Quat::from_rotation_x(-0.25);
        let mut rotation = socket_rotation;

        for frame in 0..30 {
            let arm = Pose::from_translation(Vec3::new(frame as f32, 0.0, 0.0));
            rotation = solve_rotation(&settings, arm, rotation, Vec3::new(0.0, 2.0, 4.0), 0.016);
        }

        assert_eq!(rotation, socket_rotation);
    }

    #[test]
    fn test_rotation_lag_large_delta_snaps() {
        let settings = SpringArmSettings {
            inherit_rotation: InheritRotation::all(),
            rotation_lag: RotationLag::new(2.0),
            ..Default::default()
        };
        let arm = Pose::new(Vec3::ZERO, Quat::from_rotation_y(1.0));

        // factor clamp → 1.0
        let result = solve_rotation(&settings, arm, Quat::IDENTITY, Vec3::Z, 5.0);
        assert!(same_rotation(result, arm.rotation));
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = EulerAngles {
            pitch: 0.3,
            yaw: -1.2,
            roll: 0.1,
        };
        let back = EulerAngles::from_quat(angles.to_quat());

        assert!((back.pitch - angles.pitch).abs() < EPSILON);
        assert!((back.yaw - angles.yaw).abs() < EPSILON);
        assert!((back.roll - angles.roll).abs() < EPSILON);
    }
}
