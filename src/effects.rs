// src/effects.rs
//! Cosmetic rig: front-wheel yaw and body roll tilt.
//!
//! Nothing here feeds back into steering or physics. Wheel yaw mirrors the
//! steering scalar directly every step; the tilt leans the body into turns
//! proportionally to steer x speed and is the only smoothed quantity.

use glam::{Mat3, Vec3};

use crate::config::CarTuning;
use crate::controls::ControlState;
use crate::transform::Transform;

/// A front-wheel child transform: constant local offset, local yaw set
/// directly each presentation step.
#[derive(Debug, Clone, Copy)]
pub struct Wheel {
    pub offset: Vec3,
    pub yaw: f32,
}

impl Wheel {
    pub fn new(offset: Vec3) -> Self {
        Self { offset, yaw: 0.0 }
    }

    /// World transform for rendering, derived from the body transform.
    pub fn world_transform(&self, body: &Transform) -> Transform {
        Transform {
            position: body.position + body.basis * self.offset,
            basis: body.basis * Mat3::from_rotation_y(self.yaw),
        }
    }
}

/// Wheel pair plus the smoothed tilt angle.
#[derive(Debug, Clone, Copy)]
pub struct EffectsRig {
    pub left_wheel: Wheel,
    pub right_wheel: Wheel,
    tilt: f32,
}

impl EffectsRig {
    pub fn new(left_offset: Vec3, right_offset: Vec3) -> Self {
        Self {
            left_wheel: Wheel::new(left_offset),
            right_wheel: Wheel::new(right_offset),
            tilt: 0.0,
        }
    }

    /// Runs once per presentation step, after the control state is known.
    pub fn update(&mut self, state: &ControlState, speed: f32, dt: f32, tuning: &CarTuning) {
        // wheels mirror the steering scalar with zero lag
        self.left_wheel.yaw = state.steer;
        self.right_wheel.yaw = state.steer;

        // tilt approaches steer x speed exponentially; no clamp on the angle
        let target = -state.steer * speed / tuning.tilt_divisor;
        let t = (tuning.tilt_blend_rate * dt).min(1.0);
        self.tilt += (target - self.tilt) * t;
    }

    /// Current body roll angle, radians, applied as a local roll about the
    /// travel axis.
    #[inline]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }
}
