//! Headless прогон spring arm
//!
//! Arm ездит по кругу, socket догоняет его с lag'ом; на полпути
//! за arm'ом появляется стена (PlaneProbe) и socket прижимается к ней.

use bevy::prelude::*;
use spring_arm::{
    create_headless_app, log_info, LagMode, PlaneProbe, PositionLag, ProbePlane, SpringArm,
};

const FRAME_HZ: f64 = 60.0;
const TICKS: u32 = 600;

/// Маркер arm entity для demo движения
#[derive(Component)]
struct DemoArm;

/// Система: arm ездит по кругу радиуса 3 м, смотрит по касательной
fn drive_arm(mut arms: Query<&mut Transform, With<DemoArm>>, time: Res<Time>) {
    let t = time.elapsed_secs() * 0.5;

    for mut transform in arms.iter_mut() {
        transform.translation = Vec3::new(t.cos() * 3.0, 1.6, t.sin() * 3.0);
        transform.rotation = Quat::from_rotation_y(-t);
    }
}

fn main() {
    let mut app = create_headless_app(FRAME_HZ);
    app.add_systems(Update, drive_arm);

    let socket = app.world_mut().spawn(Transform::default()).id();
    let arm = app
        .world_mut()
        .spawn((
            DemoArm,
            Transform::from_xyz(3.0, 1.6, 0.0),
            SpringArm::new(socket)
                .with_target_offset(Vec3::new(0.0, 0.5, 0.0))
                .with_position_lag(PositionLag::new(LagMode::TargetMovement, 4.0).with_max_distance(1.0))
                .with_auto_focus(true),
        ))
        .id();

    log_info(&format!("Spring arm headless run: arm {:?}, socket {:?}", arm, socket));

    for tick in 0..TICKS {
        if tick == TICKS / 2 {
            // Стена в плоскости x = 4, лицом к центру круга
            if let Some(wall) = ProbePlane::new(Vec3::new(4.0, 0.0, 0.0), Vec3::NEG_X) {
                app.insert_resource(PlaneProbe::new([wall]));
                log_info("Wall spawned at x = 4");
            }
        }

        app.update();

        if tick % 60 == 0 {
            let Some(transform) = app.world().get::<Transform>(socket) else {
                continue;
            };
            log_info(&format!(
                "Tick {}: socket at {:.2}, forward {:.2}",
                tick,
                transform.translation,
                transform.forward().as_vec3()
            ));
        }
    }

    log_info("Spring arm run complete");
}
