//! Аналитический probe: набор бесконечных плоскостей
//!
//! Используется headless demo и тестами, где Rapier не нужен.
//! Сфера попадает в плоскость только подлетая с лицевой стороны (по нормали);
//! сфера, уже пересекающая плоскость в origin, её игнорирует.

use bevy::prelude::*;

use super::{ProbeHit, SphereProbe};
use crate::collision_layers::{layers_intersect, COLLISION_LAYER_DEFAULT};

/// Плоскость `normal · p = offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbePlane {
    /// Лицевая нормаль (unit)
    pub normal: Vec3,
    pub offset: f32,
    /// Слои плоскости (см. `collision_layers`)
    pub layers: u32,
}

impl ProbePlane {
    /// Плоскость через точку `point` с нормалью `normal`
    ///
    /// Нулевая нормаль → `None`.
    pub fn new(point: Vec3, normal: Vec3) -> Option<Self> {
        let normal = normal.try_normalize()?;
        Some(Self {
            normal,
            offset: normal.dot(point),
            layers: COLLISION_LAYER_DEFAULT,
        })
    }

    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }

    /// Signed distance от точки до плоскости (> 0 — лицевая сторона)
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }

    fn sphere_cast(&self, origin: Vec3, radius: f32, direction: Vec3, max_distance: f32) -> Option<ProbeHit> {
        const EPSILON: f32 = 1e-8;

        let approach = -self.normal.dot(direction);
        if approach <= EPSILON {
            // Летим параллельно или от плоскости
            return None;
        }

        let start_gap = self.signed_distance(origin) - radius;
        if start_gap < 0.0 {
            // Уже пересекаем в origin
            return None;
        }

        let distance = start_gap / approach;
        if distance > max_distance {
            return None;
        }

        let center = origin + direction * distance;
        Some(ProbeHit {
            point: center - self.normal * radius,
            normal: self.normal,
            distance,
        })
    }
}

/// Набор плоскостей; возвращает ближайшее попадание
///
/// Как Resource — fallback геометрия для spring arm систем,
/// когда Rapier context в мире отсутствует (headless, тесты).
#[derive(Resource, Debug, Clone, Default)]
pub struct PlaneProbe {
    pub planes: Vec<ProbePlane>,
}

impl PlaneProbe {
    pub fn new(planes: impl IntoIterator<Item = ProbePlane>) -> Self {
        Self {
            planes: planes.into_iter().collect(),
        }
    }

    pub fn push(&mut self, plane: ProbePlane) {
        self.planes.push(plane);
    }
}

impl SphereProbe for PlaneProbe {
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Option<ProbeHit> {
        self.planes
            .iter()
            .filter(|plane| layers_intersect(plane.layers, mask))
            .filter_map(|plane| plane.sphere_cast(origin, radius, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
