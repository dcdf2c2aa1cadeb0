//! Rotation solver
//!
//! 1. Baseline — текущая rotation socket'а (sticky, не сбрасывается)
//! 2. auto_focus → look rotation socket → arm
//! 3. inherit_rotation → per-axis Euler override из rotation arm'а
//! 4. rotation_lag → slerp(current, desired, speed × delta), иначе snap
//!
//! Euler порядок YXZ: yaw (Y), pitch (X), roll (Z).
//! Per-axis override композится по компонентам, около pitch ±90° возможны
//! gimbal-скачки — это свойство Euler-представления, так и оставляем.

use bevy::prelude::*;

use super::{lag_factor, Pose};
use crate::arm::SpringArmSettings;

/// Euler углы в радианах (YXZ)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl EulerAngles {
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        Self { pitch, yaw, roll }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }
}

/// Rotation, при которой forward (-Z) смотрит из `from` в `to`
///
/// Совпадающие точки → None.
pub fn look_rotation(from: Vec3, to: Vec3) -> Option<Quat> {
    let direction = (to - from).try_normalize()?;
    Some(Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation)
}

/// Rotation solve
///
/// `socket_translation` — позиция, только что посчитанная position solver'ом.
pub fn solve_rotation(
    settings: &SpringArmSettings,
    arm: Pose,
    socket_rotation: Quat,
    socket_translation: Vec3,
    delta: f32,
) -> Quat {
    let desired = desired_rotation(settings, arm, socket_rotation, socket_translation);

    let lag = &settings.rotation_lag;
    if !lag.enabled {
        return desired;
    }

    // Концы отрезка без slerp — ровно текущая / ровно desired rotation
    match lag_factor(lag.speed, delta) {
        factor if factor <= 0.0 => socket_rotation,
        factor if factor >= 1.0 => desired,
        factor => socket_rotation.slerp(desired, factor).normalize(),
    }
}

fn desired_rotation(settings: &SpringArmSettings, arm: Pose, socket_rotation: Quat, socket_translation: Vec3) -> Quat {
    let focus = if settings.auto_focus {
        look_rotation(socket_translation, arm.translation)
    } else {
        None
    };

    let inherit = &settings.inherit_rotation;
    if !inherit.is_active() {
        // Без Euler round trip: baseline или look rotation как есть
        return focus.unwrap_or(socket_rotation);
    }

    let mut desired = EulerAngles::from_quat(focus.unwrap_or(socket_rotation));
    let arm_euler = EulerAngles::from_quat(arm.rotation);

    if inherit.pitch {
        desired.pitch = arm_euler.pitch;
    }
    if inherit.yaw {
        desired.yaw = arm_euler.yaw;
    }
    if inherit.roll {
        desired.roll = arm_euler.roll;
    }

    desired.to_quat()
}
