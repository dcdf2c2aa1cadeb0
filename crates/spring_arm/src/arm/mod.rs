//! Spring arm domain (camera socket rig)
//!
//! ECS ответственность:
//! - Config: SpringArm (target + settings) на arm entity
//! - Transient state: SpringArmState (lag, collision edge)
//! - Systems: runtime update (пишет Transform socket'а) + authoring preview
//!
//! Математика — в `crate::solver` (чистые функции), collision — через `crate::probe`.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;

pub mod components;
pub mod preview;
pub mod systems;

// Re-export основных типов
pub use components::{
    InheritRotation, LagMode, PositionLag, RotationLag, SpringArm, SpringArmSettings, SpringArmState,
};
pub use preview::{draw_spring_arm_previews, preview_spring_arms, PreviewMarker, SpringArmPreview, SpringArmPreviews};
pub use systems::{on_playback_changed, update_spring_arms};

/// Режим работы spring arm'ов
///
/// - `Running` — runtime: solve + запись Transform socket'а каждый frame
/// - `Authoring` — editor/preview: solve без записи, только debug markers
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Resource)]
pub enum SpringArmPlayback {
    #[default]
    Running,
    Authoring,
}

/// SystemSet всех spring arm систем (PostUpdate)
///
/// После physics writeback (arm уже подвинут), до transform propagation
/// (socket GlobalTransform обновится в этом же frame'е).
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpringArmSystems;

/// Spring Arm Plugin
///
/// Порядок выполнения (PostUpdate, SpringArmSystems):
/// 1. on_playback_changed — лог + сброс preview при смене режима
/// 2. update_spring_arms — только в `Running`
/// 3. preview_spring_arms → draw_spring_arm_previews — только в `Authoring`
///    (draw — только если host подключил gizmos)
pub struct SpringArmPlugin;

impl Plugin for SpringArmPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SpringArm>()
            .register_type::<SpringArmState>()
            .register_type::<SpringArmSettings>()
            .register_type::<PositionLag>()
            .register_type::<RotationLag>()
            .register_type::<InheritRotation>()
            .register_type::<LagMode>()
            .register_type::<SpringArmPlayback>()
            .init_resource::<SpringArmPlayback>()
            .init_resource::<SpringArmPreviews>();

        app.configure_sets(
            PostUpdate,
            SpringArmSystems
                .after(PhysicsSet::Writeback)
                .before(bevy::transform::TransformSystem::TransformPropagate),
        );

        app.add_systems(
            PostUpdate,
            (
                on_playback_changed,
                update_spring_arms.run_if(resource_equals(SpringArmPlayback::Running)),
                (
                    preview_spring_arms,
                    draw_spring_arm_previews
                        .run_if(resource_exists::<bevy::gizmos::config::GizmoConfigStore>),
                )
                    .chain()
                    .run_if(resource_equals(SpringArmPlayback::Authoring)),
            )
                .chain() // Последовательное выполнение
                .in_set(SpringArmSystems),
        );
    }
}
