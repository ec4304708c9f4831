// src/controls.rs
//! Reduction of the four raw analog signals into the two control scalars the
//! rest of the controller consumes.

use crate::config::CarTuning;

/// Raw analog signals as delivered by the input-mapping layer, each already
/// clamped to [0, 1] upstream. Not validated here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawControls {
    pub accelerate: f32,
    pub brake: f32,
    pub steer_left: f32,
    pub steer_right: f32,
}

/// The two reduced control scalars. These persist across steps: while the
/// car is airborne they stop being recomputed, so the last grounded values
/// keep feeding the drive actuator until it lands.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    /// Signed force magnitude along the travel axis.
    pub drive: f32,
    /// Signed steering angle target, radians. Positive steers left.
    pub steer: f32,
}

impl ControlState {
    /// Recompute the scalars from the raw signals, or keep the previous
    /// values untouched while ungrounded.
    pub fn sample(&mut self, grounded: bool, raw: &RawControls, tuning: &CarTuning) {
        if !grounded {
            return;
        }
        self.drive = (raw.accelerate - raw.brake) * tuning.acceleration;
        self.steer = (raw.steer_left - raw.steer_right) * tuning.max_steer_angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_sampling_reduces_the_four_signals() {
        let tuning = CarTuning::default();
        let mut state = ControlState::default();
        let raw = RawControls {
            accelerate: 1.0,
            brake: 0.25,
            steer_left: 0.5,
            steer_right: 0.0,
        };
        state.sample(true, &raw, &tuning);
        assert_eq!(state.drive, 0.75 * tuning.acceleration);
        assert_eq!(state.steer, 0.5 * tuning.max_steer_angle);
    }

    #[test]
    fn opposing_signals_cancel() {
        let tuning = CarTuning::default();
        let mut state = ControlState::default();
        let raw = RawControls {
            accelerate: 0.6,
            brake: 0.6,
            steer_left: 0.3,
            steer_right: 0.3,
        };
        state.sample(true, &raw, &tuning);
        assert_eq!(state.drive, 0.0);
        assert_eq!(state.steer, 0.0);
    }

    #[test]
    fn airborne_steps_freeze_the_last_grounded_values() {
        let tuning = CarTuning::default();
        let mut state = ControlState {
            drive: 5.0,
            steer: 0.2,
        };
        // arbitrary raw signals must be ignored for every airborne step
        for i in 0..64 {
            let raw = RawControls {
                accelerate: (i % 2) as f32,
                brake: 1.0 - (i % 2) as f32,
                steer_left: 0.9,
                steer_right: 0.1,
            };
            state.sample(false, &raw, &tuning);
            assert_eq!(state.drive, 5.0);
            assert_eq!(state.steer, 0.2);
        }
        // first grounded step picks sampling back up
        state.sample(
            true,
            &RawControls {
                accelerate: 1.0,
                ..Default::default()
            },
            &tuning,
        );
        assert_eq!(state.drive, tuning.acceleration);
        assert_eq!(state.steer, 0.0);
    }
}
