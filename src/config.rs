// src/config.rs
//! Tuning parameters for the car controller.
//!
//! Everything that shapes the driving feel lives here: how hard the drive
//! signal pushes, how fast the body turns toward the steering target, how
//! aggressively it leans, and the physical parameters of the rolling sphere.
//! Defaults are the tuned demo values; a JSON file with any subset of the
//! fields overrides them.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// All controller tuning in one serde-able struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarTuning {
    /// Offset of the visual body mesh relative to the physical sphere center.
    pub sphere_offset: Vec3,
    /// Scales the [-1, 1] drive signal into force magnitude.
    pub acceleration: f32,
    /// Scales the [-1, 1] steer signal into a target rotation angle, radians.
    pub max_steer_angle: f32,
    /// Rate of approach toward the steering target, per second.
    pub turn_speed: f32,
    /// Minimum body speed before steering rotation applies. The gate is
    /// exclusive: at exactly this speed the body does not rotate.
    pub turn_stop_limit: f32,
    /// Inverse sensitivity of the body roll tilt to steer x speed.
    /// Smaller values lean harder. Tilt itself is unclamped.
    pub tilt_divisor: f32,
    /// Blend rate toward the ground-normal-aligned frame, per second.
    pub slope_align_rate: f32,
    /// Blend rate toward the target tilt angle, per second.
    pub tilt_blend_rate: f32,
    /// Length of the downward ground-probe ray.
    pub ground_ray_length: f32,

    // Sphere body parameters. These are configuration handed to the solver
    // at spawn time, never computed state.
    pub sphere_radius: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            sphere_offset: Vec3::new(0.0, -1.0, 0.0),
            acceleration: 35.0,
            max_steer_angle: 21.0_f32.to_radians(),
            turn_speed: 5.0,
            turn_stop_limit: 0.75,
            tilt_divisor: 35.0,
            slope_align_rate: 10.0,
            tilt_blend_rate: 10.0,
            ground_ray_length: 1.5,
            sphere_radius: 1.0,
            linear_damping: 1.5,
            angular_damping: 5.0,
            friction: 0.7,
            restitution: 0.1,
        }
    }
}

impl CarTuning {
    /// Load tuning from a JSON file. Missing fields fall back to defaults;
    /// the result is validated before being returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let tuning: Self = serde_json::from_str(&text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.acceleration <= 0.0 {
            return Err(Error::tuning("acceleration must be positive"));
        }
        if self.turn_speed <= 0.0 || self.slope_align_rate <= 0.0 || self.tilt_blend_rate <= 0.0 {
            return Err(Error::tuning("blend rates must be positive"));
        }
        if self.tilt_divisor == 0.0 {
            return Err(Error::tuning("tilt_divisor must be non-zero"));
        }
        if self.turn_stop_limit < 0.0 {
            return Err(Error::tuning("turn_stop_limit must be non-negative"));
        }
        if self.sphere_radius <= 0.0 || self.ground_ray_length <= 0.0 {
            return Err(Error::tuning("sphere_radius and ground_ray_length must be positive"));
        }
        Ok(())
    }
}
