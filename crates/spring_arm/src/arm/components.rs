//! Spring arm компоненты: SpringArm (config), SpringArmState (transient)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision_layers::COLLISION_MASK_CAMERA_PROBE;

/// Spring arm — ставится на arm entity (player, pivot и т.п.)
///
/// Каждый frame двигает `target` (socket, обычно камеру) за arm'ом
/// на `arm_length` с учётом offset'ов, collision probe и lag'а.
///
/// # Usage
/// ```ignore
/// let camera = commands.spawn((Camera3d::default(), Transform::default())).id();
///
/// commands.spawn((
///     Transform::from_xyz(0.0, 1.6, 0.0),
///     SpringArm::new(camera).with_arm_length(6.0),
/// ));
/// ```
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(SpringArmState)]
pub struct SpringArm {
    /// Socket entity (None → update no-op)
    pub target: Option<Entity>,
    pub settings: SpringArmSettings,
}

impl SpringArm {
    pub fn new(target: Entity) -> Self {
        Self {
            target: Some(target),
            settings: SpringArmSettings::default(),
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_settings(mut self, settings: SpringArmSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_arm_length(mut self, arm_length: f32) -> Self {
        self.settings.arm_length = arm_length;
        self
    }

    pub fn with_target_offset(mut self, offset: Vec3) -> Self {
        self.settings.target_offset = offset;
        self
    }

    pub fn with_socket_offset(mut self, offset: Vec3) -> Self {
        self.settings.socket_offset = offset;
        self
    }

    pub fn with_position_lag(mut self, lag: PositionLag) -> Self {
        self.settings.position_lag = lag;
        self
    }

    pub fn with_rotation_lag(mut self, lag: RotationLag) -> Self {
        self.settings.rotation_lag = lag;
        self
    }

    pub fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.settings.auto_focus = auto_focus;
        self
    }

    pub fn with_inherit_rotation(mut self, inherit: InheritRotation) -> Self {
        self.settings.inherit_rotation = inherit;
        self
    }

    pub fn without_collision(mut self) -> Self {
        self.settings.collision_test = false;
        self
    }
}

/// Настройки spring arm (меняются между frame'ами, не внутри)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringArmSettings {
    /// Длина arm'а вдоль -forward (метры)
    pub arm_length: f32,
    /// Постоянный world-space offset
    pub target_offset: Vec3,
    /// Offset в локальных осях arm'а
    pub socket_offset: Vec3,

    /// Sphere-cast от arm к socket
    pub collision_test: bool,
    /// Радиус probe (метры)
    pub probe_size: f32,
    /// Маска слоёв probe (см. `collision_layers`)
    pub probe_mask: u32,

    /// Socket смотрит на arm
    pub auto_focus: bool,
    pub inherit_rotation: InheritRotation,

    pub position_lag: PositionLag,
    pub rotation_lag: RotationLag,
}

impl Default for SpringArmSettings {
    fn default() -> Self {
        Self {
            arm_length: 4.0,
            target_offset: Vec3::ZERO,
            socket_offset: Vec3::ZERO,
            collision_test: true,
            probe_size: 0.16,
            probe_mask: COLLISION_MASK_CAMERA_PROBE,
            auto_focus: false,
            inherit_rotation: InheritRotation::default(),
            position_lag: PositionLag::default(),
            rotation_lag: RotationLag::default(),
        }
    }
}

/// Стратегия position lag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum LagMode {
    /// Сглаживается позиция самого arm'а, offset'ы и probe — от сглаженной
    #[default]
    TransformPosition,

    /// Сглаживается движение socket'а к (collided) target позиции
    TargetMovement,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionLag {
    pub enabled: bool,
    pub mode: LagMode,
    /// Interpolation factor = speed × delta
    pub speed: f32,
    /// 0 = без ограничения
    pub max_distance: f32,
}

impl Default for PositionLag {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: LagMode::TransformPosition,
            speed: 2.0,
            max_distance: 0.0,
        }
    }
}

impl PositionLag {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn new(mode: LagMode, speed: f32) -> Self {
        Self {
            enabled: true,
            mode,
            speed,
            max_distance: 0.0,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationLag {
    pub enabled: bool,
    pub speed: f32,
}

impl Default for RotationLag {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 2.0,
        }
    }
}

impl RotationLag {
    pub fn new(speed: f32) -> Self {
        Self { enabled: true, speed }
    }
}

/// Какие Euler-компоненты socket берёт у arm'а
///
/// Per-axis флаги работают только при `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct InheritRotation {
    pub enabled: bool,
    pub pitch: bool,
    pub yaw: bool,
    pub roll: bool,
}

impl InheritRotation {
    pub fn all() -> Self {
        Self {
            enabled: true,
            pitch: true,
            yaw: true,
            roll: true,
        }
    }

    pub fn yaw_only() -> Self {
        Self {
            enabled: true,
            yaw: true,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled && (self.pitch || self.yaw || self.roll)
    }
}

/// Transient состояние между frame'ами
///
/// Добавляется автоматически вместе с `SpringArm` (required component).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpringArmState {
    /// Сглаженная позиция arm'а (LagMode::TransformPosition)
    ///
    /// None до первого solve — тогда берётся текущая позиция arm'а.
    pub desired_position: Option<Vec3>,

    /// Был ли probe hit в прошлом frame'е (LagMode::TargetMovement, rising edge)
    pub collision_previously_triggered: bool,
}

impl SpringArmState {
    /// Сбросить lag (телепорт arm'а, смена target)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_configuration_surface() {
        let settings = SpringArmSettings::default();

        assert_eq!(settings.arm_length, 4.0);
        assert_eq!(settings.probe_size, 0.16);
        assert!(settings.collision_test);
        assert!(settings.position_lag.enabled);
        assert_eq!(settings.position_lag.mode, LagMode::TransformPosition);
        assert_eq!(settings.position_lag.speed, 2.0);
        assert_eq!(settings.position_lag.max_distance, 0.0);
        assert!(!settings.rotation_lag.enabled);
        assert_eq!(settings.rotation_lag.speed, 2.0);
        assert!(!settings.auto_focus);
        assert!(!settings.inherit_rotation.is_active());
    }

    #[test]
    fn test_state_reset_clears_lag_and_edge() {
        let mut state = SpringArmState {
            desired_position: Some(Vec3::new(1.0, 2.0, 3.0)),
            collision_previously_triggered: true,
        };

        state.reset();
        assert_eq!(state, SpringArmState::default());
    }

    #[test]
    fn test_inherit_rotation_needs_enabled_and_axis() {
        assert!(InheritRotation::yaw_only().is_active());
        assert!(InheritRotation::all().is_active());

        let no_axes = InheritRotation {
            enabled: true,
            ..Default::default()
        };
        assert!(!no_axes.is_active());

        let disabled = InheritRotation {
            enabled: false,
            ..InheritRotation::all()
        };
        assert!(!disabled.is_active());
    }
}
