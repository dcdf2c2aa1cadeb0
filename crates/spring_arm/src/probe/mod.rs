//! Collision probe — sphere-cast seam между solver и scene geometry
//!
//! Solver не знает про физический движок: ему нужен только
//! `sphere_cast(origin, radius, direction, max_distance, mask)`.
//!
//! Реализации:
//! - `NoCollision` — никогда не попадает (нет physics context)
//! - `PlaneProbe` — аналитические плоскости (headless demo, тесты)
//! - `RapierSphereProbe` — Rapier query pipeline (runtime)

use bevy::prelude::*;

pub mod plane;
pub mod rapier;

pub use plane::{PlaneProbe, ProbePlane};
pub use rapier::RapierSphereProbe;

/// Минимальный радиус probe (radius <= 0 → практически raycast)
pub const MIN_PROBE_RADIUS: f32 = 1e-4;

/// Короче этого cast direction считается нулевой
pub const MIN_CAST_DISTANCE: f32 = 1e-6;

/// Результат sphere-cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Точка контакта на поверхности препятствия (world space)
    pub point: Vec3,
    /// Нормаль поверхности в точке контакта (unit, направлена к probe)
    pub normal: Vec3,
    /// Пройденная дистанция центра сферы до контакта
    pub distance: f32,
}

impl ProbeHit {
    /// Позиция центра сферы в момент контакта
    pub fn resting_position(&self, radius: f32) -> Vec3 {
        self.point + self.normal * radius
    }
}

/// Spatial query primitive, предоставляемый host'ом
pub trait SphereProbe {
    /// Swept sphere от `origin` вдоль `direction` (unit) до `max_distance`.
    ///
    /// `mask` — битовая маска слоёв (см. `collision_layers`).
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Option<ProbeHit>;
}

/// Probe без геометрии: cast никогда не попадает
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollision;

impl SphereProbe for NoCollision {
    fn sphere_cast(&self, _: Vec3, _: f32, _: Vec3, _: f32, _: u32) -> Option<ProbeHit> {
        None
    }
}

impl<P: SphereProbe + ?Sized> SphereProbe for &P {
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Option<ProbeHit> {
        (**self).sphere_cast(origin, radius, direction, max_distance, mask)
    }
}

/// Cast из `origin` в сторону `target` с guard'ами на вырожденный ввод
///
/// Нулевая длина / NaN → None (probe не вызывается вообще).
pub fn cast_towards(
    probe: &impl SphereProbe,
    origin: Vec3,
    target: Vec3,
    radius: f32,
    mask: u32,
) -> Option<ProbeHit> {
    let offset = target - origin;
    let distance = offset.length();

    if !distance.is_finite() || distance < MIN_CAST_DISTANCE {
        return None;
    }

    probe.sphere_cast(origin, probe_radius(radius), offset / distance, distance, mask)
}

/// Радиус, с которым реально идёт cast
///
/// NaN / ∞ / <= 0 → `MIN_PROBE_RADIUS`. Тот же радиус нужен и для
/// `ProbeHit::resting_position`, иначе socket окажется за стеной.
pub fn probe_radius(radius: f32) -> f32 {
    if radius.is_finite() {
        radius.max(MIN_PROBE_RADIUS)
    } else {
        MIN_PROBE_RADIUS
    }
}
