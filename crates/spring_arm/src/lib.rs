//! Spring Arm
//!
//! Camera socket rig на Bevy 0.16: каждый frame двигает socket (камеру)
//! за arm'ом на заданной дистанции, с collision probe (Rapier sphere-cast),
//! position lag и rotation lag.
//!
//! Слои:
//! - `solver` — чистая математика (position → rotation), без ECS
//! - `probe` — sphere-cast seam (Rapier / аналитические плоскости / ничего)
//! - `arm` — ECS: компоненты, runtime system, authoring preview, plugin

use bevy::prelude::*;

// Публичные модули
pub mod arm;
pub mod collision_layers;
pub mod logger;
pub mod probe;
pub mod solver;

// Re-export для удобства
pub use arm::{
    InheritRotation, LagMode, PositionLag, RotationLag, SpringArm, SpringArmPlayback, SpringArmPlugin,
    SpringArmPreview, SpringArmPreviews, SpringArmSettings, SpringArmState, SpringArmSystems,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use probe::{NoCollision, PlaneProbe, ProbeHit, ProbePlane, SphereProbe};
pub use solver::{solve, Pose, SpringArmSolution};

/// Создаёт minimal Bevy App для headless прогона (без рендера и physics)
///
/// Frame delta фиксированная (`frame_hz`), чтобы lag был детерминированным.
pub fn create_headless_app(frame_hz: f64) -> App {
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, bevy::transform::TransformPlugin, SpringArmPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / frame_hz,
        )));

    app
}
