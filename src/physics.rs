// src/physics.rs
//! Thin wrapper around the Rapier 3D pipeline.
//!
//! The controller treats the dynamics solver as a black box: it spawns a
//! sphere, hands it a force each fixed step, and reads position and speed
//! back. This module owns all Rapier state and does the glam <-> nalgebra
//! conversions at the boundary so the rest of the crate stays in glam.

use glam::{Quat, Vec3};
use nalgebra::Quaternion;
use rapier3d::prelude::*;

use crate::config::CarTuning;

/// Result of a ray query against the world.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Surface normal at the hit point, unit length.
    pub normal: Vec3,
    /// Distance along the ray to the hit.
    pub toi: f32,
}

#[inline]
fn na_vec(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[inline]
fn glam_vec(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Owns the full Rapier state for one simulation.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    pipeline: PhysicsPipeline,
    integration_params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: na_vec(gravity),
            pipeline: PhysicsPipeline::new(),
            integration_params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Advance the simulation by one fixed step.
    pub fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;

        // Refresh queries for colliders spawned since the last step; the
        // pipeline keeps it in sync with the stepped state afterwards.
        self.query_pipeline.update(&self.bodies, &self.colliders);

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    // -------------------------------------------------------------------------
    // Body Management
    // -------------------------------------------------------------------------

    /// Spawn the car's rolling sphere. Damping, friction, and restitution are
    /// configuration handed to the solver here, never touched afterwards.
    pub fn spawn_sphere(&mut self, position: Vec3, tuning: &CarTuning) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(na_vec(position))
            .linear_damping(tuning.linear_damping)
            .angular_damping(tuning.angular_damping)
            .build();
        let collider = ColliderBuilder::ball(tuning.sphere_radius)
            .friction(tuning.friction)
            .restitution(tuning.restitution)
            .build();

        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Spawn a static cuboid (ground slab, ramp).
    pub fn spawn_fixed_cuboid(
        &mut self,
        position: Vec3,
        half_extents: Vec3,
        rotation: Quat,
    ) -> RigidBodyHandle {
        let rot = Rotation::from_quaternion(Quaternion::new(
            rotation.w, rotation.x, rotation.y, rotation.z,
        ));
        let body = RigidBodyBuilder::fixed()
            .position(Isometry::from_parts(na_vec(position).into(), rot))
            .build();
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .friction(1.0)
            .build();

        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Replace the body's continuous force for the current step. Reset + add,
    /// so the force never accumulates across steps; the solver integrates it
    /// against damping and gravity.
    pub fn set_drive_force(&mut self, handle: RigidBodyHandle, force: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.reset_forces(true);
            body.add_force(na_vec(force), true);
        }
    }

    /// Current body translation.
    #[inline]
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| glam_vec(b.translation()))
    }

    /// Current linear speed (velocity magnitude). Zero for unknown handles.
    #[inline]
    pub fn body_speed(&self, handle: RigidBodyHandle) -> f32 {
        self.bodies.get(handle).map_or(0.0, |b| b.linvel().norm())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Cast a ray and return the first hit with its surface normal.
    /// `exclude` removes one rigid body (and its colliders) from the hit set.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        dir: Vec3,
        max_toi: f32,
        exclude: Option<RigidBodyHandle>,
    ) -> Option<RayHit> {
        let ray = Ray::new(point![origin.x, origin.y, origin.z], na_vec(dir));
        let mut filter = QueryFilter::default();
        if let Some(handle) = exclude {
            filter = filter.exclude_rigid_body(handle);
        }

        self.query_pipeline
            .cast_ray_and_get_normal(&self.bodies, &self.colliders, &ray, max_toi, true, filter)
            .map(|(_, intersection)| RayHit {
                normal: glam_vec(&intersection.normal),
                toi: intersection.toi,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_world() -> (PhysicsWorld, RigidBodyHandle) {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0));
        world.spawn_fixed_cuboid(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(50.0, 1.0, 50.0),
            Quat::IDENTITY,
        );
        let sphere = world.spawn_sphere(Vec3::new(0.0, 3.0, 0.0), &CarTuning::default());
        (world, sphere)
    }

    fn settle(world: &mut PhysicsWorld, steps: usize) {
        for _ in 0..steps {
            world.step(1.0 / 60.0);
        }
    }

    #[test]
    fn sphere_falls_and_comes_to_rest_on_the_ground() {
        let (mut world, sphere) = flat_world();
        settle(&mut world, 400);
        let pos = world.body_position(sphere).unwrap();
        // resting center sits one radius above the slab top (y = 0)
        assert!((pos.y - 1.0).abs() < 0.2, "rest height {}", pos.y);
        assert!(world.body_speed(sphere) < 0.2);
    }

    #[test]
    fn ray_exclusion_skips_the_cars_own_body() {
        let (mut world, sphere) = flat_world();
        settle(&mut world, 400);
        let center = world.body_position(sphere).unwrap();
        let origin = center + Vec3::new(0.0, -0.5, 0.0);

        // without exclusion the ray starts inside the sphere's own collider
        let self_hit = world.cast_ray(origin, -Vec3::Y, 2.0, None).unwrap();
        assert_eq!(self_hit.toi, 0.0);

        // with exclusion it reaches the ground and reports an upward normal
        let ground_hit = world.cast_ray(origin, -Vec3::Y, 2.0, Some(sphere)).unwrap();
        assert!(ground_hit.toi > 0.1);
        assert!(ground_hit.normal.y > 0.99);
    }

    #[test]
    fn drive_force_moves_the_sphere() {
        let (mut world, sphere) = flat_world();
        settle(&mut world, 400);
        for _ in 0..120 {
            world.set_drive_force(sphere, Vec3::new(0.0, 0.0, -35.0));
            world.step(1.0 / 60.0);
        }
        assert!(world.body_speed(sphere) > 1.0);
        let pos = world.body_position(sphere).unwrap();
        assert!(pos.z < -1.0, "sphere did not travel: {pos}");
    }
}
