//! Spring arm runtime systems
//!
//! Arm/socket poses читаются через `TransformHelper` (актуальный world pose
//! с учётом hierarchy, даже до transform propagation этого frame'а).
//! Socket пишется в локальный Transform (через parent, если он есть).

use std::collections::HashSet;

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;
use bevy_rapier3d::plugin::ReadRapierContext;

use super::{SpringArm, SpringArmPlayback, SpringArmPreviews, SpringArmState};
use crate::logger::{log, log_info, log_warning};
use crate::probe::{NoCollision, PlaneProbe, RapierSphereProbe};
use crate::solver::{solve, Pose, SpringArmSolution};

/// World poses, нужные одному solve
pub(crate) struct ArmFrame {
    pub arm: Pose,
    pub socket: Pose,
    /// GlobalTransform parent'а socket'а (None — socket root entity)
    pub socket_parent: Option<GlobalTransform>,
}

/// Чей Transform не нашёлся
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissingTransform {
    Arm,
    Target,
}

/// Собрать world poses arm'а и socket'а
///
/// Err — arm или socket не имеют Transform (socket despawned и т.п.).
pub(crate) fn read_arm_frame(
    helper: &TransformHelper,
    parents: &Query<&ChildOf>,
    arm: Entity,
    socket: Entity,
) -> Result<ArmFrame, MissingTransform> {
    let arm_global = helper
        .compute_global_transform(arm)
        .map_err(|_| MissingTransform::Arm)?;
    let socket_global = helper
        .compute_global_transform(socket)
        .map_err(|_| MissingTransform::Target)?;

    let socket_parent = parents
        .get(socket)
        .ok()
        .and_then(|child_of| helper.compute_global_transform(child_of.parent()).ok());

    Ok(ArmFrame {
        arm: Pose::from(&arm_global),
        socket: Pose::from(&socket_global),
        socket_parent,
    })
}

/// Solve с подходящим probe
///
/// Приоритет: Rapier context → `PlaneProbe` resource → без collision.
pub(crate) fn solve_frame(
    rapier: &ReadRapierContext<'_, '_>,
    planes: Option<&PlaneProbe>,
    arm_entity: Entity,
    arm: &SpringArm,
    target: Entity,
    state: &SpringArmState,
    frame: &ArmFrame,
    delta: f32,
) -> SpringArmSolution {
    match rapier.single() {
        Ok(context) => {
            let probe = RapierSphereProbe::new(&context).excluding([arm_entity, target]);
            solve(&arm.settings, state, frame.arm, frame.socket, delta, &probe)
        }
        Err(_) => match planes {
            Some(planes) => solve(&arm.settings, state, frame.arm, frame.socket, delta, planes),
            None => solve(&arm.settings, state, frame.arm, frame.socket, delta, &NoCollision),
        },
    }
}

/// Записать world pose в локальный Transform socket'а (scale не трогаем)
pub(crate) fn write_socket_pose(transform: &mut Transform, pose: Pose, parent: Option<&GlobalTransform>) {
    match parent {
        Some(parent) => {
            let world = GlobalTransform::from(
                Transform::from_translation(pose.translation).with_rotation(pose.rotation),
            );
            let local = world.reparented_to(parent);
            transform.translation = local.translation;
            transform.rotation = local.rotation;
        }
        None => {
            transform.translation = pose.translation;
            transform.rotation = pose.rotation;
        }
    }
}

/// Система: runtime update всех spring arm'ов
///
/// Порядок внутри arm'а: position, затем rotation (в `solve`).
/// Без target — no-op. Arm/target без Transform — warning один раз на arm,
/// пока transform снова не найдётся.
pub fn update_spring_arms(
    time: Res<Time>,
    rapier: ReadRapierContext<'_, '_>,
    planes: Option<Res<PlaneProbe>>,
    mut arms: Query<(Entity, &SpringArm, &mut SpringArmState)>,
    parents: Query<&ChildOf>,
    mut transforms: ParamSet<(TransformHelper, Query<&mut Transform>)>,
    mut warned: Local<HashSet<Entity>>,
) {
    let delta = time.delta_secs();

    // Despawned arm'ы (или снявшие SpringArm) больше не помним
    warned.retain(|entity| arms.contains(*entity));

    for (arm_entity, arm, mut state) in arms.iter_mut() {
        let Some(target) = arm.target else {
            continue;
        };

        let frame = match read_arm_frame(&transforms.p0(), &parents, arm_entity, target) {
            Ok(frame) => frame,
            Err(missing) => {
                if warned.insert(arm_entity) {
                    match missing {
                        MissingTransform::Arm => log_warning(&format!(
                            "SpringArm {:?}: arm has no transform, skipping",
                            arm_entity
                        )),
                        MissingTransform::Target => log_warning(&format!(
                            "SpringArm {:?}: target {:?} has no transform, skipping",
                            arm_entity, target
                        )),
                    }
                }
                continue;
            }
        };
        warned.remove(&arm_entity);

        let solution = solve_frame(&rapier, planes.as_deref(), arm_entity, arm, target, &state, &frame, delta);

        if solution.collision_started {
            log(&format!(
                "SpringArm {:?}: collision started, socket snapped to {:?}",
                arm_entity, solution.socket.translation
            ));
        }

        // Trigger change detection только при реальном изменении
        if *state != solution.state {
            *state = solution.state;
        }

        let mut sockets = transforms.p1();
        let Ok(mut socket_transform) = sockets.get_mut(target) else {
            continue;
        };
        write_socket_pose(&mut socket_transform, solution.socket, frame.socket_parent.as_ref());
    }
}

/// Система: реакция на смену SpringArmPlayback
///
/// Старые preview markers сбрасываются, чтобы не рисовать устаревшее.
pub fn on_playback_changed(playback: Res<SpringArmPlayback>, mut previews: ResMut<SpringArmPreviews>) {
    if !playback.is_changed() || playback.is_added() {
        return;
    }

    previews.clear();
    log_info(&format!("Spring arm playback → {:?}", *playback));
}
