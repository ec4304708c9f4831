// src/ground.rs
//! Ground probe: one downward ray per presentation step.

use glam::Vec3;
use rapier3d::prelude::RigidBodyHandle;

use crate::physics::PhysicsWorld;

/// The ray starts this far above the mesh origin; at rest the origin can sit
/// exactly on (or fractionally inside) the surface, which would otherwise
/// start the ray inside the ground collider.
const RAY_LIFT: f32 = 0.25;

/// Per-step ground contact sample. Recomputed every step, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSample {
    pub grounded: bool,
    /// Surface normal at the contact point; `None` while airborne.
    pub normal: Option<Vec3>,
}

impl GroundSample {
    pub const AIRBORNE: Self = Self {
        grounded: false,
        normal: None,
    };
}

/// Casts a fixed-length ray straight down from the visual mesh origin.
/// The controller's own body is excluded from the hit set; the exclusion is
/// fixed at construction, not chosen per call. A miss means airborne.
#[derive(Debug, Clone, Copy)]
pub struct GroundProbe {
    exclude: RigidBodyHandle,
    ray_length: f32,
}

impl GroundProbe {
    pub fn new(exclude: RigidBodyHandle, ray_length: f32) -> Self {
        Self {
            exclude,
            ray_length,
        }
    }

    pub fn sample(&self, world: &PhysicsWorld, origin: Vec3) -> GroundSample {
        let lifted = origin + Vec3::Y * RAY_LIFT;
        match world.cast_ray(lifted, -Vec3::Y, self.ray_length + RAY_LIFT, Some(self.exclude)) {
            Some(hit) => GroundSample {
                grounded: true,
                normal: Some(hit.normal),
            },
            None => GroundSample::AIRBORNE,
        }
    }
}
