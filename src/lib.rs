// src/lib.rs
//! Arcade sphere-based car controller on top of Rapier 3D.
//!
//! The physical car is a rolling sphere the solver integrates like any other
//! dynamic body; the visible car body is a separate transform the controller
//! re-positions and re-orients every step so it *looks* like the thing doing
//! the driving. Fun-first feel: no suspension, no per-wheel contact, no
//! torque curves.
//!
//! The host owns the loop and calls two entry points on [`CarController`]:
//! `on_physics_step` at a fixed rate and `on_presentation_step` at the
//! render rate, with [`time::FixedStep`] bridging the two clocks. See
//! `src/main.rs` for a headless example of the full wiring.

pub mod config;
pub mod controller;
pub mod controls;
pub mod effects;
pub mod error;
pub mod ground;
pub mod orientation;
pub mod physics;
pub mod time;
pub mod transform;

pub use config::CarTuning;
pub use controller::{CarController, Telemetry};
pub use controls::{ControlState, RawControls};
pub use error::{Error, Result};
pub use ground::{GroundProbe, GroundSample};
pub use physics::PhysicsWorld;
pub use time::FixedStep;
pub use transform::Transform;
