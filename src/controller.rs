// src/controller.rs
//! The car controller: couples the rolling physics sphere to the visual car
//! body across the two host clocks.
//!
//! The host invokes two entry points in a documented order:
//!
//! - [`CarController::on_physics_step`] on the fixed tick: re-assert the
//!   mesh position from the body, then hand the solver the drive force along
//!   the current visual facing.
//! - [`CarController::on_presentation_step`] on the variable tick: probe the
//!   ground, resample controls, blend orientation, update the cosmetic rig,
//!   in that order within the tick.
//!
//! Fixed ticks may interleave between presentation ticks at the host's
//! discretion; they always read the most recently committed control state
//! and facing. All shared state lives in this struct and is mutated on one
//! thread only.

use glam::{Mat3, Vec3};
use log::debug;
use rapier3d::prelude::RigidBodyHandle;

use crate::config::CarTuning;
use crate::controls::{ControlState, RawControls};
use crate::effects::EffectsRig;
use crate::ground::{GroundProbe, GroundSample};
use crate::orientation;
use crate::physics::PhysicsWorld;
use crate::transform::Transform;

/// Front wheel mount points in body-local space (forward is -Z).
const LEFT_WHEEL_OFFSET: Vec3 = Vec3::new(-0.9, 0.15, -1.3);
const RIGHT_WHEEL_OFFSET: Vec3 = Vec3::new(0.9, 0.15, -1.3);

/// Cheap copyable state readout for logging and HUDs.
#[derive(Debug, Clone, Copy)]
pub struct Telemetry {
    pub speed: f32,
    pub grounded: bool,
    pub drive: f32,
    pub steer: f32,
    pub tilt: f32,
}

/// Continuous drive force for one fixed step: along the mesh's travel
/// direction, scaled by the signed drive scalar. Pure so the force
/// contract stays testable in isolation.
#[inline]
pub fn drive_force(mesh: &Transform, state: &ControlState) -> Vec3 {
    mesh.forward() * state.drive
}

pub struct CarController {
    tuning: CarTuning,
    body: RigidBodyHandle,
    mesh: Transform,
    probe: GroundProbe,
    controls: ControlState,
    effects: EffectsRig,
    ground: GroundSample,
}

impl CarController {
    /// Spawn the physical sphere and wire the controller around it. The
    /// probe excludes the freshly spawned body from its query here, once.
    pub fn spawn(world: &mut PhysicsWorld, tuning: CarTuning, position: Vec3) -> Self {
        let body = world.spawn_sphere(position, &tuning);
        let probe = GroundProbe::new(body, tuning.ground_ray_length);
        let mesh = Transform::from_position(position + tuning.sphere_offset);
        Self {
            body,
            mesh,
            probe,
            controls: ControlState::default(),
            effects: EffectsRig::new(LEFT_WHEEL_OFFSET, RIGHT_WHEEL_OFFSET),
            ground: GroundSample::AIRBORNE,
            tuning,
        }
    }

    /// Fixed physics tick: position sync, then force hand-off. The position
    /// is re-asserted before the travel axis is read so the force always
    /// follows the current visual facing.
    pub fn on_physics_step(&mut self, world: &mut PhysicsWorld) {
        let Some(pos) = world.body_position(self.body) else {
            return;
        };
        self.mesh.position = pos + self.tuning.sphere_offset;
        world.set_drive_force(self.body, drive_force(&self.mesh, &self.controls));
    }

    /// Variable presentation tick: probe -> controls -> orientation ->
    /// effects. While airborne the controls freeze and the orientation stays
    /// exactly as last computed on the ground.
    pub fn on_presentation_step(&mut self, world: &PhysicsWorld, raw: &RawControls, dt: f32) {
        let ground = self.probe.sample(world, self.mesh.position);
        if ground.grounded != self.ground.grounded {
            debug!(
                "car {}",
                if ground.grounded { "landed" } else { "airborne" }
            );
        }

        self.controls.sample(ground.grounded, raw, &self.tuning);

        let speed = world.body_speed(self.body);
        if let Some(normal) = ground.normal {
            orientation::update(&mut self.mesh, &self.controls, normal, speed, dt, &self.tuning);
        }
        self.effects.update(&self.controls, speed, dt, &self.tuning);
        self.ground = ground;
    }

    // -------------------------------------------------------------------------
    // Render outputs
    // -------------------------------------------------------------------------

    /// World transform of the car body with the cosmetic lean applied as a
    /// local roll about the travel axis.
    pub fn body_transform(&self) -> Transform {
        Transform {
            position: self.mesh.position,
            basis: self.mesh.basis * Mat3::from_rotation_z(self.effects.tilt()),
        }
    }

    /// World transforms of the front wheels. Wheels are parented to the
    /// un-leaned mesh, not the tilted body shell.
    pub fn wheel_transforms(&self) -> (Transform, Transform) {
        (
            self.effects.left_wheel.world_transform(&self.mesh),
            self.effects.right_wheel.world_transform(&self.mesh),
        )
    }

    /// Un-leaned mesh transform (facing direction proxy).
    #[inline]
    pub fn mesh(&self) -> &Transform {
        &self.mesh
    }

    #[inline]
    pub fn controls(&self) -> ControlState {
        self.controls
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.ground.grounded
    }

    #[inline]
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn telemetry(&self, world: &PhysicsWorld) -> Telemetry {
        Telemetry {
            speed: world.body_speed(self.body),
            grounded: self.ground.grounded,
            drive: self.controls.drive,
            steer: self.controls.steer,
            tilt: self.effects.tilt(),
        }
    }
}
