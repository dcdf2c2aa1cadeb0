//! Collision Layers Constants
//!
//! Rapier collision groups — centralised constants для spring arm probe.
//!
//! ## Архитектура:
//! - **Layers (битовая маска):** На каком слое находится collider (`CollisionGroups::memberships`)
//! - **Mask (битовая маска):** С какими слоями probe пересекается (`CollisionGroups::filters`)
//!
//! ## Layers (1-32):
//! - Layer 1 (0b1 = 1): Default (collider без явных `CollisionGroups` = все слои)
//! - Layer 2 (0b10 = 2): Actors (player, NPC)
//! - Layer 3 (0b100 = 4): Environment (walls, obstacles, terrain)
//! - Layer 4 (0b1000 = 8): Camera-transparent (foliage, glass — probe игнорирует)
//!
//! ## Использование:
//! ```ignore
//! use spring_arm::collision_layers::*;
//!
//! // Wall setup
//! commands.spawn((
//!     Collider::cuboid(5.0, 3.0, 0.2),
//!     CollisionGroups::new(layer_group(COLLISION_LAYER_ENVIRONMENT), Group::ALL),
//! ));
//!
//! // Spring arm probe (только environment)
//! settings.probe_mask = COLLISION_LAYER_ENVIRONMENT;
//! ```

use bevy_rapier3d::prelude::Group;

// ============================================================================
// Layer битовые маски (на каком слое collider находится)
// ============================================================================

/// Layer 1: Default (всё, что не размечено)
pub const COLLISION_LAYER_DEFAULT: u32 = 0b1; // 1

/// Layer 2: Actors (player, NPC — обычно не должны отталкивать камеру)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 3: Environment (walls, obstacles, terrain)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer 4: Camera-transparent geometry (foliage, glass)
pub const COLLISION_LAYER_CAMERA_TRANSPARENT: u32 = 0b1000; // 8

// ============================================================================
// Mask битовые маски (с чем probe пересекается)
// ============================================================================

/// Mask: Spring arm probe (Default + Environment)
///
/// Actors и camera-transparent слои НЕ блокируют камеру.
pub const COLLISION_MASK_CAMERA_PROBE: u32 = COLLISION_LAYER_DEFAULT | COLLISION_LAYER_ENVIRONMENT;

/// Mask: probe пересекается со всем
pub const COLLISION_MASK_ALL: u32 = u32::MAX;

/// Mask → Rapier `Group` (лишние биты отбрасываются)
pub fn layer_group(mask: u32) -> Group {
    Group::from_bits_truncate(mask)
}

/// Пересекаются ли слои collider'а с маской probe
pub fn layers_intersect(layers: u32, mask: u32) -> bool {
    layers & mask != 0
}
