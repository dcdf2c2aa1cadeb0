//! Position solver
//!
//! Три режима: no lag / LagMode::TransformPosition / LagMode::TargetMovement.
//!
//! Uncollided target во всех режимах:
//!   base + target_offset + arm.rotation·socket_offset + arm.forward·(−arm_length)
//!
//! Probe всегда стартует из реальной позиции arm'а (не из сглаженной).

use bevy::prelude::*;

use super::{clamp_lag_distance, lag_factor, Pose};
use crate::arm::{LagMode, SpringArmSettings, SpringArmState};
use crate::probe::{cast_towards, probe_radius, ProbeHit, SphereProbe};

/// Результат position solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSolve {
    /// Новая world позиция socket'а
    pub translation: Vec3,
    pub state: SpringArmState,
    pub probe_hit: Option<ProbeHit>,
    /// Rising edge collision (TargetMovement)
    pub collision_started: bool,
}

/// Uncollided позиция socket'а относительно `base`
pub fn uncollided_target(settings: &SpringArmSettings, base: Vec3, arm: Pose) -> Vec3 {
    base + settings.target_offset
        + arm.rotation * settings.socket_offset
        + arm.forward() * -settings.arm_length
}

/// Sphere-cast arm → target; hit → `hit.point + hit.normal × radius`
fn probe_target(
    settings: &SpringArmSettings,
    arm: Pose,
    target: Vec3,
    radius: f32,
    probe: &impl SphereProbe,
) -> (Vec3, Option<ProbeHit>) {
    if !settings.collision_test {
        return (target, None);
    }

    let radius = probe_radius(radius);
    match cast_towards(probe, arm.translation, target, radius, settings.probe_mask) {
        Some(hit) => (hit.resting_position(radius), Some(hit)),
        None => (target, None),
    }
}

/// Position solve
///
/// `socket_translation` — текущая позиция socket'а (reference для TargetMovement).
pub fn solve_position(
    settings: &SpringArmSettings,
    state: &SpringArmState,
    arm: Pose,
    socket_translation: Vec3,
    delta: f32,
    probe: &impl SphereProbe,
) -> PositionSolve {
    let lag = &settings.position_lag;

    if !lag.enabled {
        return solve_immediate(settings, state, arm, probe);
    }

    match lag.mode {
        LagMode::TransformPosition => solve_transform_position_lag(settings, state, arm, delta, probe),
        LagMode::TargetMovement => {
            solve_target_movement_lag(settings, state, arm, socket_translation, delta, probe)
        }
    }
}

/// No lag: target пишется напрямую, state не меняется
fn solve_immediate(
    settings: &SpringArmSettings,
    state: &SpringArmState,
    arm: Pose,
    probe: &impl SphereProbe,
) -> PositionSolve {
    let target = uncollided_target(settings, arm.translation, arm);
    let (translation, probe_hit) = probe_target(settings, arm, target, settings.probe_size, probe);

    PositionSolve {
        translation,
        state: *state,
        probe_hit,
        collision_started: false,
    }
}

/// LagMode::TransformPosition
///
/// Сглаживаем позицию arm'а, от неё строим target. Probe radius — половина.
fn solve_transform_position_lag(
    settings: &SpringArmSettings,
    state: &SpringArmState,
    arm: Pose,
    delta: f32,
    probe: &impl SphereProbe,
) -> PositionSolve {
    let lag = &settings.position_lag;

    let previous = state.desired_position.unwrap_or(arm.translation);
    let smoothed = previous.lerp(arm.translation, lag_factor(lag.speed, delta));
    let desired = clamp_lag_distance(arm.translation, smoothed, lag.max_distance);

    let target = uncollided_target(settings, desired, arm);
    let (translation, probe_hit) = probe_target(settings, arm, target, settings.probe_size / 2.0, probe);

    PositionSolve {
        translation,
        state: SpringArmState {
            desired_position: Some(desired),
            ..*state
        },
        probe_hit,
        collision_started: false,
    }
}

/// LagMode::TargetMovement
///
/// Socket догоняет collided target. На rising edge collision reference
/// прыгает сразу в collided позицию — камера не "въезжает" в стену.
fn solve_target_movement_lag(
    settings: &SpringArmSettings,
    state: &SpringArmState,
    arm: Pose,
    socket_translation: Vec3,
    delta: f32,
    probe: &impl SphereProbe,
) -> PositionSolve {
    let lag = &settings.position_lag;

    let target = uncollided_target(settings, arm.translation, arm);
    let (target, probe_hit) = probe_target(settings, arm, target, settings.probe_size, probe);

    let collided = probe_hit.is_some();
    let collision_started = collided && !state.collision_previously_triggered;

    let reference = if collision_started { target } else { socket_translation };

    let lagged = reference.lerp(target, lag_factor(lag.speed, delta));
    let translation = clamp_lag_distance(reference, lagged, lag.max_distance);

    PositionSolve {
        translation,
        state: SpringArmState {
            collision_previously_triggered: collided,
            ..*state
        },
        probe_hit,
        collision_started,
    }
}
