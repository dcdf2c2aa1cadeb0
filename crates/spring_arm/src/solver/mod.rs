//! Spring arm solver — чистая функция, без ECS
//!
//! Один solve = position, затем rotation (rotation читает только что
//! посчитанную позицию socket'а). Runtime system и authoring preview
//! вызывают один и тот же `solve`; разница только в том, что делают с результатом.
//!
//! Lag — frame-rate зависимый: factor = speed × delta, clamp [0, 1].

use bevy::prelude::*;

use crate::arm::{SpringArmSettings, SpringArmState};
use crate::probe::{ProbeHit, SphereProbe};

pub mod position;
pub mod rotation;

#[cfg(test)]
mod rotation_tests;

pub use position::{solve_position, PositionSolve};
pub use rotation::{solve_rotation, EulerAngles};

/// World-space pose (translation + rotation, без scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Forward (-Z), как у `Transform::forward`
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

impl From<&GlobalTransform> for Pose {
    fn from(global: &GlobalTransform) -> Self {
        let (_scale, rotation, translation) = global.to_scale_rotation_translation();
        Self { translation, rotation }
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self {
            translation: transform.translation,
            rotation: transform.rotation,
        }
    }
}

/// Результат полного solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringArmSolution {
    /// Новый world pose socket'а
    pub socket: Pose,
    /// Состояние для следующего frame'а
    pub state: SpringArmState,
    /// Probe hit этого frame'а (None — нет collision или probe выключен)
    pub probe_hit: Option<ProbeHit>,
    /// Rising edge collision (только LagMode::TargetMovement)
    pub collision_started: bool,
}

/// Полный solve: position, затем rotation
///
/// `arm` и `socket` — текущие world poses, `delta` — секунды с прошлого frame'а.
pub fn solve(
    settings: &SpringArmSettings,
    state: &SpringArmState,
    arm: Pose,
    socket: Pose,
    delta: f32,
    probe: &impl SphereProbe,
) -> SpringArmSolution {
    let position = solve_position(settings, state, arm, socket.translation, delta, probe);
    let rotation = solve_rotation(settings, arm, socket.rotation, position.translation, delta);

    SpringArmSolution {
        socket: Pose::new(position.translation, rotation),
        state: position.state,
        probe_hit: position.probe_hit,
        collision_started: position.collision_started,
    }
}

/// Interpolation factor для lag: speed × delta, clamp [0, 1]
///
/// Отрицательная скорость / NaN → 0 (нет движения).
pub fn lag_factor(speed: f32, delta: f32) -> f32 {
    let factor = speed * delta;
    if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else if factor == f32::INFINITY {
        1.0
    } else {
        0.0
    }
}

/// Ограничить `point` сферой радиуса `max_distance` вокруг `anchor`
///
/// `max_distance <= 0` — без ограничения. Направление сохраняется.
pub fn clamp_lag_distance(anchor: Vec3, point: Vec3, max_distance: f32) -> Vec3 {
    if max_distance <= 0.0 || !max_distance.is_finite() {
        return point;
    }

    let offset = point - anchor;
    if offset.length() > max_distance {
        anchor + offset.normalize_or_zero() * max_distance
    } else {
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lag_factor_clamps() {
        assert_eq!(lag_factor(2.0, 0.25), 0.5);
        assert_eq!(lag_factor(2.0, 1.0), 1.0);
        assert_eq!(lag_factor(0.0, 0.016), 0.0);
        assert_eq!(lag_factor(-3.0, 0.016), 0.0);
        assert_eq!(lag_factor(f32::NAN, 0.016), 0.0);
        assert_eq!(lag_factor(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_clamp_lag_distance_keeps_direction() {
        let clamped = clamp_lag_distance(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert!(clamped.distance(Vec3::new(2.0, 0.0, 0.0)) < 1e-6);

        // Внутри радиуса — без изменений
        let inside = Vec3::new(1.0, 1.0, 0.0);
        assert_eq!(clamp_lag_distance(Vec3::ZERO, inside, 2.0), inside);

        // 0 = unbounded
        let far = Vec3::splat(100.0);
        assert_eq!(clamp_lag_distance(Vec3::ZERO, far, 0.0), far);
    }

    #[test]
    fn test_pose_forward_is_neg_z() {
        assert_eq!(Pose::IDENTITY.forward(), Vec3::NEG_Z);

        let turned = Pose::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(turned.forward().distance(Vec3::NEG_X) < 1e-6);
    }
}
