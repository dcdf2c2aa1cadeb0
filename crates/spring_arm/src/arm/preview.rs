//! Authoring preview (SpringArmPlayback::Authoring)
//!
//! Тот же `solve`, что и в runtime, но результат никуда не пишется:
//! ни Transform socket'а, ни SpringArmState. Только debug markers
//! в `SpringArmPreviews` + gizmos, если host их подключил.

use std::collections::HashMap;

use bevy::color::palettes::css::{BLUE, MAGENTA, RED};
use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;
use bevy_rapier3d::plugin::ReadRapierContext;

use super::systems::{read_arm_frame, solve_frame};
use super::{SpringArm, SpringArmState};
use crate::probe::PlaneProbe;
use crate::solver::Pose;

/// Радиус marker-сферы вокруг socket'а
pub const PREVIEW_SPHERE_RADIUS: f32 = 0.125;

/// Debug примитив для отрисовки
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewMarker {
    Sphere { center: Vec3, radius: f32, color: Color },
    Line { start: Vec3, end: Vec3, color: Color },
}

/// Результат preview solve одного arm'а
#[derive(Debug, Clone, PartialEq)]
pub struct SpringArmPreview {
    /// World позиция arm'а
    pub arm: Vec3,
    /// Куда socket встал бы в этом frame'е
    pub socket: Pose,
    pub markers: Vec<PreviewMarker>,
}

impl SpringArmPreview {
    pub fn new(arm: Vec3, socket: Pose) -> Self {
        let markers = vec![
            PreviewMarker::Sphere {
                center: socket.translation,
                radius: PREVIEW_SPHERE_RADIUS,
                color: BLUE.into(),
            },
            PreviewMarker::Line {
                start: arm,
                end: socket.translation,
                color: RED.into(),
            },
            PreviewMarker::Sphere {
                center: socket.translation,
                radius: PREVIEW_SPHERE_RADIUS,
                color: MAGENTA.into(),
            },
        ];

        Self { arm, socket, markers }
    }
}

/// Preview всех arm'ов (arm entity → preview), пересобирается каждый frame
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct SpringArmPreviews(pub HashMap<Entity, SpringArmPreview>);

/// Система: preview solve (read-only по отношению к arm/socket)
pub fn preview_spring_arms(
    time: Res<Time>,
    rapier: ReadRapierContext<'_, '_>,
    planes: Option<Res<PlaneProbe>>,
    arms: Query<(Entity, &SpringArm, &SpringArmState)>,
    parents: Query<&ChildOf>,
    helper: TransformHelper,
    mut previews: ResMut<SpringArmPreviews>,
) {
    let delta = time.delta_secs();
    previews.clear();

    for (arm_entity, arm, state) in arms.iter() {
        let Some(target) = arm.target else {
            continue;
        };

        let Ok(frame) = read_arm_frame(&helper, &parents, arm_entity, target) else {
            continue;
        };

        // state передаётся по ссылке, solve возвращает новый — мы его выбрасываем
        let solution = solve_frame(&rapier, planes.as_deref(), arm_entity, arm, target, state, &frame, delta);

        previews.insert(arm_entity, SpringArmPreview::new(frame.arm.translation, solution.socket));
    }
}

/// Система: отрисовка preview markers через gizmos
pub fn draw_spring_arm_previews(previews: Res<SpringArmPreviews>, mut gizmos: Gizmos) {
    for preview in previews.values() {
        for marker in &preview.markers {
            match *marker {
                PreviewMarker::Sphere { center, radius, color } => {
                    gizmos.sphere(Isometry3d::from_translation(center), radius, color);
                }
                PreviewMarker::Line { start, end, color } => {
                    gizmos.line(start, end, color);
                }
            }
        }
    }
}
