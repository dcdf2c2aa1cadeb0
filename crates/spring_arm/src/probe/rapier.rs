//! Rapier sphere-cast probe
//!
//! Ball collider сдвигается вдоль direction через `RapierContext::cast_shape`.
//! Фильтрация:
//! - `CollisionGroups(ALL, mask)` — только colliders на слоях из маски
//! - arm и socket entities исключены (камера не должна упираться в себя)
//!
//! Colliders, пересекающие сферу уже в origin, игнорируются
//! (`stop_at_penetration = false`, time_of_impact == 0 отбрасываем).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{ProbeHit, SphereProbe};
use crate::collision_layers::layer_group;

pub struct RapierSphereProbe<'a> {
    context: &'a RapierContext<'a>,
    excluded: Vec<Entity>,
}

impl<'a> RapierSphereProbe<'a> {
    pub fn new(context: &'a RapierContext<'a>) -> Self {
        Self {
            context,
            excluded: Vec::new(),
        }
    }

    /// Исключить entities из cast (arm, socket, их colliders)
    pub fn excluding(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.excluded.extend(entities);
        self
    }
}

impl SphereProbe for RapierSphereProbe<'_> {
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Option<ProbeHit> {
        let shape = Collider::ball(radius);
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            target_distance: 0.0,
            stop_at_penetration: false,
            compute_impact_geometry_on_penetration: true,
        };

        let excluded = &self.excluded;
        let predicate = |entity: Entity| !excluded.contains(&entity);
        let filter = QueryFilter::default()
            .groups(CollisionGroups::new(Group::ALL, layer_group(mask)))
            .predicate(&predicate);

        // direction unit → time_of_impact == пройденная дистанция
        // cast_shape принимает parry shape, не Collider
        let (_entity, hit) =
            self.context
                .cast_shape(origin, Quat::IDENTITY, direction, &*shape.raw, options, filter)?;

        if hit.time_of_impact <= 0.0 {
            return None;
        }

        let distance = hit.time_of_impact;
        let center = origin + direction * distance;

        // normal1 — outward нормаль задетого collider'а (world space)
        let normal = hit
            .details
            .and_then(|details| details.normal1.try_normalize())
            .unwrap_or(-direction);

        Some(ProbeHit {
            point: center - normal * radius,
            normal,
            distance,
        })
    }
}
