// src/main.rs
//! Headless demo: builds a small test track, spawns the car, and drives a
//! scripted sequence (accelerate, turn both ways, brake, coast) while
//! logging telemetry.

use anyhow::Result;
use glam::{Quat, Vec3};
use log::{info, LevelFilter};

use sphere_drive::{CarController, CarTuning, FixedStep, PhysicsWorld, RawControls};

const PRESENT_DT: f32 = 1.0 / 60.0;
const PHYSICS_DT: f32 = 1.0 / 120.0;
const DEMO_SECONDS: f32 = 12.0;

fn main() -> Result<()> {
    setup_logging();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading tuning from {path}");
            CarTuning::load(&path)?
        }
        None => CarTuning::default(),
    };

    let mut world = build_track();
    let mut car = CarController::spawn(&mut world, tuning, Vec3::new(0.0, 1.5, 0.0));
    let mut clock = FixedStep::new(PHYSICS_DT);

    info!("driving for {DEMO_SECONDS} simulated seconds");
    let frames = (DEMO_SECONDS / PRESENT_DT) as u32;
    for frame in 0..frames {
        let t = frame as f32 * PRESENT_DT;
        let raw = script(t);

        car.on_presentation_step(&world, &raw, PRESENT_DT);
        for _ in clock.advance(PRESENT_DT) {
            car.on_physics_step(&mut world);
            world.step(PHYSICS_DT);
        }

        if frame % 30 == 0 {
            let tele = car.telemetry(&world);
            info!(
                "t={t:5.2}s  speed={:5.2}  grounded={}  drive={:6.1}  steer={:5.2}  tilt={:5.2}",
                tele.speed, tele.grounded, tele.drive, tele.steer, tele.tilt
            );
        }
    }

    let body = car.body_transform();
    let (left, right) = car.wheel_transforms();
    info!(
        "final body position {:.2}, facing {:.2}",
        body.position,
        car.mesh().forward()
    );
    info!(
        "wheels at {:.2} / {:.2}, yaw {:.2}",
        left.position, right.position, car.controls().steer
    );
    Ok(())
}

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format_timestamp_millis()
        .format_target(false)
        .parse_default_env()
        .init();
}

/// Flat slab with a gentle ramp across the first straight.
fn build_track() -> PhysicsWorld {
    let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0));
    world.spawn_fixed_cuboid(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(60.0, 1.0, 120.0),
        Quat::IDENTITY,
    );
    world.spawn_fixed_cuboid(
        Vec3::new(0.0, -0.4, -12.0),
        Vec3::new(10.0, 0.5, 8.0),
        Quat::from_rotation_x(8.0_f32.to_radians()),
    );
    world
}

/// Scripted control inputs over the demo timeline.
fn script(t: f32) -> RawControls {
    match t {
        t if t < 3.0 => RawControls {
            accelerate: 1.0,
            ..Default::default()
        },
        t if t < 6.0 => RawControls {
            accelerate: 1.0,
            steer_left: 1.0,
            ..Default::default()
        },
        t if t < 8.0 => RawControls {
            accelerate: 0.6,
            steer_right: 1.0,
            ..Default::default()
        },
        t if t < 9.5 => RawControls {
            brake: 1.0,
            ..Default::default()
        },
        _ => RawControls::default(),
    }
}
