//! Headless factory demo.
//!
//! Drives the render core from the mock simulation for a fixed number of
//! frames at a simulated refresh rate. The camera orbits the yard and
//! swings in and out so that machine classes cross their cull radii.
//!
//! Run with `cargo run -p gristmill-app -- --frames 1200 --acceleration 3600`.

use clap::Parser;
use glam::Vec3;
use gristmill_app::{EnvironmentNodes, FactoryFrame, GameLoop, MockSimulation};
use gristmill_config::{CliArgs, Config};
use tracing::{error, info};

/// Hours the simulation clock jumps forward halfway through the run.
const TIME_JUMP_HOURS: f64 = 6.0;

/// Distant lights spawned around the yard.
const CITY_LIGHTS: usize = 40;

/// Camera orbit: angular speed in rad/s, and the near/far swing in world units.
const ORBIT_SPEED: f32 = 0.15;
const ORBIT_NEAR: f32 = 40.0;
const ORBIT_FAR: f32 = 260.0;

fn camera_at(elapsed: f32) -> Vec3 {
    let swing = 0.5 - 0.5 * (elapsed * ORBIT_SPEED * 0.5).cos();
    let radius = ORBIT_NEAR + (ORBIT_FAR - ORBIT_NEAR) * swing;
    let (sin, cos) = (elapsed * ORBIT_SPEED).sin_cos();
    Vec3::new(cos * radius, 25.0, sin * radius)
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}, using ./gristmill");
            std::path::PathBuf::from("gristmill")
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    gristmill_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(
        "Gristmill demo: {} frames at {} Hz, quality {}",
        config.demo.frames, config.demo.refresh_hz, config.render.quality
    );

    let mut sim = MockSimulation::new(&config.demo, &config.time);
    let mut frame = FactoryFrame::new(&config);
    let environment = match EnvironmentNodes::mount(frame.scheduler_mut(), CITY_LIGHTS) {
        Ok(nodes) => nodes,
        Err(e) => {
            error!("Failed to mount environment: {e}");
            return;
        }
    };
    info!(
        "Mounted {} animated environment nodes",
        environment.registered()
    );
    frame.initialize(sim.machines());

    let frame_time = 1.0 / config.demo.refresh_hz.max(1.0);
    let log_every = config.demo.refresh_hz.max(1.0) as u64;
    let mut game_loop = GameLoop::new();
    let mut totals = (0u64, 0u64, 0u64);

    let jump_frame = config.demo.frames / 2;

    for index in 0..config.demo.frames {
        if index == jump_frame && index > 0 {
            sim.jump_to(sim.hour() + TIME_JUMP_HOURS);
            info!("Simulation jumped to {:.2}", sim.published_hour());
        }

        let mut rendered = None;
        game_loop.tick(frame_time, |dt, _| sim.step(dt), |dt| rendered = Some(dt));
        let Some(dt) = rendered else { continue };

        let elapsed = frame.clock().elapsed() as f32;
        let inputs = sim.inputs(config.render.quality, camera_at(elapsed));
        let report = frame.frame(dt, &inputs, sim.machines());

        if let Some(step) = report.time
            && step.snapped
            && index == jump_frame
        {
            info!(
                "Smooth time snapped from {:.2} to {:.2}",
                step.predicted, step.hour
            );
        }

        totals.0 += u64::from(report.animation.updated);
        for stats in report.machines.iter().flatten() {
            totals.1 += u64::from(stats.slots_written);
            totals.2 += u64::from(stats.culled);
        }

        if game_loop.frame_count() % log_every == 0
            && let Some(step) = report.time
        {
            info!(
                "frame {:>5}  hour {:>5.2}  published {:>5.2}  {:?}  anim {}  stale {}",
                game_loop.frame_count(),
                step.hour,
                sim.published_hour(),
                inputs.weather,
                report.animation.updated,
                report.animation.stale,
            );
        }
    }

    info!(
        "Finished {} frames, {} sim steps, {} block updates",
        game_loop.frame_count(),
        game_loop.update_count(),
        totals.0
    );
    info!(
        "{} instance slots written, {} culled machine-frames",
        totals.1,
        totals.2
    );

    environment.unmount(frame.scheduler_mut());
    info!(
        "Registry holds {} descriptors after unmount",
        frame.scheduler().registry().len()
    );
}
