// src/orientation.rs
//! Per-presentation-step orientation blending for the visual body.
//!
//! Two competing rotational targets are folded into the mesh basis each
//! step: the steering target (yaw about the mesh's own up axis) and the
//! ground-slope target (frame whose up axis is the probed surface normal).
//! Both are rate-based exponential approaches; the basis is
//! re-orthonormalized after each blend because slerp plus repeated
//! composition drifts over thousands of steps.
//!
//! Callers gate the whole update on the car being grounded at the start of
//! the frame; airborne steps leave the orientation exactly as last computed.

use glam::Vec3;

use crate::config::CarTuning;
use crate::controls::ControlState;
use crate::transform::{basis_with_up, slerp_basis, Transform};

/// Blend the mesh basis toward the steering and slope targets.
///
/// `speed` is the physical body's linear speed; at or below
/// `turn_stop_limit` the steering rotation is skipped entirely so the car
/// cannot spin in place. Slope alignment still applies so the body keeps
/// hugging the surface while stationary.
pub fn update(
    mesh: &mut Transform,
    state: &ControlState,
    normal: Vec3,
    speed: f32,
    dt: f32,
    tuning: &CarTuning,
) {
    if speed > tuning.turn_stop_limit {
        let target = mesh.yawed(state.steer);
        mesh.basis = slerp_basis(mesh.basis, target, tuning.turn_speed * dt);
        mesh.orthonormalize();
    }

    // Degenerate cross product (normal parallel to the travel axis) leaves
    // no stable heading; skip alignment for the step.
    if let Some(aligned) = basis_with_up(mesh.basis, normal) {
        mesh.basis = slerp_basis(mesh.basis, aligned, tuning.slope_align_rate * dt);
        mesh.orthonormalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn upright_mesh() -> Transform {
        Transform::from_position(Vec3::ZERO)
    }

    fn steer(angle: f32) -> ControlState {
        ControlState {
            drive: 0.0,
            steer: angle,
        }
    }

    #[test]
    fn no_rotation_at_the_turn_stop_limit_exactly() {
        let tuning = CarTuning::default();
        let mut mesh = upright_mesh();
        let before = mesh.basis;
        update(
            &mut mesh,
            &steer(0.3),
            Vec3::Y,
            tuning.turn_stop_limit,
            DT,
            &tuning,
        );
        // the gate is exclusive, and flat-ground alignment is a no-op here
        assert!((mesh.basis.x_axis - before.x_axis).length() < 1e-5);
        assert!((mesh.basis.z_axis - before.z_axis).length() < 1e-5);
    }

    #[test]
    fn rotates_toward_the_steer_target_above_the_limit() {
        let tuning = CarTuning::default();
        let mut mesh = upright_mesh();
        let initial_right = mesh.right();
        update(
            &mut mesh,
            &steer(0.3),
            Vec3::Y,
            tuning.turn_stop_limit + 1.0,
            DT,
            &tuning,
        );
        // positive steer swings the travel direction toward the left
        assert!(mesh.forward().dot(initial_right) < 0.0);
        assert!(mesh.orthonormality_error() < 1e-4);
    }

    #[test]
    fn aligns_to_a_sloped_normal_without_overshoot() {
        let tuning = CarTuning::default();
        let normal = Vec3::new(0.3, 1.0, 0.0).normalize();
        let mut mesh = upright_mesh();
        let mut last_angle = mesh.up().angle_between(normal);
        // stationary: only the slope blend runs
        for _ in 0..240 {
            update(&mut mesh, &steer(0.0), normal, 0.0, DT, &tuning);
            let angle = mesh.up().angle_between(normal);
            assert!(angle <= last_angle + 1e-5, "alignment overshot");
            last_angle = angle;
        }
        assert!(last_angle < 0.01, "did not converge: {last_angle}");
    }

    #[test]
    fn vertical_normal_parallel_to_travel_axis_is_skipped() {
        let tuning = CarTuning::default();
        let mut mesh = upright_mesh();
        // a wall-like normal straight along the travel axis
        let before = mesh.basis;
        update(&mut mesh, &steer(0.0), Vec3::Z, 0.0, DT, &tuning);
        assert_eq!(mesh.basis, before);
    }
}
