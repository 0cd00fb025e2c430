//! End-to-end frames through `FactoryFrame` with the yard mounted.

use glam::Vec3;
use gristmill_app::{EnvironmentNodes, FactoryFrame, FactoryMachines, MachineKind, MockSimulation};
use gristmill_config::Config;
use gristmill_instancing::classes::machine_transform;
use gristmill_instancing::{MachineClass, RollerMill};
use gristmill_scene::{FrameInputs, MachineDescriptor, MachineMetrics, QualityTier, Weather};

fn inputs(hour: f64, acceleration: f64) -> FrameInputs {
    FrameInputs {
        authoritative_hour: hour,
        acceleration,
        paused: false,
        weather: Weather::Clear,
        quality: QualityTier::Medium,
        view_visible: true,
        camera_position: Vec3::ZERO,
    }
}

fn plant() -> FactoryMachines {
    let metrics = MachineMetrics {
        load_percent: 60.0,
        vibration: 1.0,
        rpm: 600.0,
    };
    FactoryMachines {
        silos: vec![MachineDescriptor::new("silo-0", Vec3::new(0.0, 0.0, -20.0), 0.0)],
        mills: vec![
            MachineDescriptor::new("mill-0", Vec3::new(10.0, 0.0, 0.0), 0.0).with_metrics(metrics),
            MachineDescriptor::new("mill-1", Vec3::new(-10.0, 0.0, 0.0), 0.0).with_metrics(metrics),
        ],
        sifters: vec![MachineDescriptor::new("sifter-0", Vec3::new(0.0, 0.0, 15.0), 0.0)],
        packers: vec![MachineDescriptor::new("packer-0", Vec3::new(5.0, 0.0, 25.0), 0.0)],
    }
}

#[test]
fn hidden_view_skips_whole_frame() {
    let mut frame = FactoryFrame::new(&Config::default());
    let nodes = EnvironmentNodes::mount(frame.scheduler_mut(), 4).unwrap();
    let machines = plant();
    frame.initialize(&machines);

    let mut hidden = inputs(6.0, 60.0);
    hidden.view_visible = false;
    let report = frame.frame(1.0 / 60.0, &hidden, &machines);

    assert!(!report.ran);
    assert_eq!(report.animation.updated, 0);
    assert!(report.machines.iter().all(Option::is_none));
    assert_eq!(frame.clock().frame(), 0);
    assert_eq!(nodes.sky.borrow().time, 0.0);
}

#[test]
fn paused_snaps_time_and_skips_passes() {
    let mut frame = FactoryFrame::new(&Config::default());
    let _nodes = EnvironmentNodes::mount(frame.scheduler_mut(), 4).unwrap();
    let machines = plant();
    frame.initialize(&machines);

    let mut paused = inputs(14.5, 60.0);
    paused.paused = true;
    let report = frame.frame(1.0 / 60.0, &paused, &machines);

    assert!(report.ran);
    let step = report.time.unwrap();
    assert!(step.snapped);
    assert_eq!(step.hour, 14.5);
    assert_eq!(report.animation.categories_run, 0);
    assert!(report.machines.iter().all(Option::is_none));
}

#[test]
fn smooth_time_advances_between_publications() {
    let mut config = Config::default();
    config.time.start_hour = 6.0;
    config.time.acceleration = 3600.0;
    // Wide threshold so the half-hour lead is not snapped away.
    config.time.drift_threshold_hours = 1.0;
    let mut frame = FactoryFrame::new(&config);
    let machines = FactoryMachines::default();

    let published = inputs(6.0, 3600.0);
    let mut last = None;
    for _ in 0..25 {
        last = frame.frame(0.02, &published, &machines).time;
    }
    let step = last.unwrap();
    assert!(!step.snapped);
    assert!((step.hour - 6.5).abs() < 1e-6, "hour {}", step.hour);
}

#[test]
fn drift_past_threshold_snaps_to_published_hour() {
    let mut config = Config::default();
    config.time.start_hour = 6.0;
    config.time.acceleration = 3600.0;
    let mut frame = FactoryFrame::new(&config);
    let machines = FactoryMachines::default();

    // 0.2 s at 3600x is 0.2 h, beyond the default 0.1 h threshold.
    let step = frame.frame(0.2, &inputs(6.0, 3600.0), &machines).time.unwrap();
    assert!(step.snapped);
    assert_eq!(step.hour, 6.0);
}

#[test]
fn silo_class_runs_every_fourth_frame() {
    let mut frame = FactoryFrame::new(&Config::default());
    let machines = plant();
    frame.initialize(&machines);

    let ran: Vec<bool> = (0..8)
        .map(|_| {
            frame.frame(1.0 / 60.0, &inputs(6.0, 60.0), &machines).machines
                [MachineKind::Silo.index()]
            .is_some()
        })
        .collect();
    assert_eq!(ran, [true, false, false, false, true, false, false, false]);

    // Mills are on the every-frame tier.
    let report = frame.frame(1.0 / 60.0, &inputs(6.0, 60.0), &machines);
    assert!(report.machines[MachineKind::Mill.index()].is_some());
}

fn mill_returns_to_true_pose(quality: QualityTier) {
    let mut config = Config::default();
    config.render.mill_cull_radius = 40.0;
    config.render.quality = quality;
    let mut frame = FactoryFrame::new(&config);

    let machines = FactoryMachines {
        mills: vec![
            MachineDescriptor::new("mill-0", Vec3::new(50.0, 0.0, 0.0), 0.0).with_metrics(
                MachineMetrics {
                    load_percent: 60.0,
                    vibration: 1.0,
                    rpm: 600.0,
                },
            ),
        ],
        ..Default::default()
    };
    frame.initialize(&machines);

    let mut away = inputs(6.0, 60.0);
    away.quality = quality;
    let report = frame.frame(1.0 / 60.0, &away, &machines);
    let stats = report.machines[MachineKind::Mill.index()].unwrap();
    assert_eq!(stats.culled, 1);
    let rolls = frame.mills().buffer(RollerMill::ROLLS).unwrap();
    assert!(rolls.get(0).unwrap().is_zero_scaled());

    // Camera moves to within 30 units; the machine stays put.
    let near = FrameInputs {
        camera_position: Vec3::new(20.0, 0.0, 0.0),
        ..away
    };
    let report = frame.frame(1.0 / 60.0, &near, &machines);
    let stats = report.machines[MachineKind::Mill.index()].unwrap();
    assert_eq!(stats.visible, 1);
    assert!(!stats.reinitialized);

    let mill = &machines.mills[0];
    let elapsed = frame.clock().elapsed();
    let world = machine_transform(mill);
    for part in [RollerMill::ROLLS, RollerMill::DRIVE_PULLEY] {
        let layout = frame.mills().layout(part).unwrap();
        for k in 0..layout.parts_per_machine {
            let expected = world * RollerMill.animate(part, k, mill, elapsed);
            let actual = frame
                .mills()
                .buffer(part)
                .unwrap()
                .transform(layout.slot(0, k))
                .unwrap();
            assert!(
                actual.abs_diff_eq(expected, 1e-5),
                "{quality} part {part} copy {k}"
            );
        }
    }
}

#[test]
fn mill_culled_then_restored_by_camera_move() {
    mill_returns_to_true_pose(QualityTier::Medium);
}

#[test]
fn mill_restored_with_cosmetic_parts_at_lowest_tier() {
    mill_returns_to_true_pose(QualityTier::Low);
}

#[test]
fn environment_blocks_follow_time_of_day() {
    let mut frame = FactoryFrame::new(&Config::default());
    let nodes = EnvironmentNodes::mount(frame.scheduler_mut(), 5).unwrap();
    let machines = FactoryMachines::default();

    frame.frame(1.0 / 60.0, &inputs(12.0, 60.0), &machines);
    let noon_sun = nodes.sun.borrow().intensity;
    let noon_stars = nodes.stars.borrow().visibility;

    let mut night = FactoryFrame::new(&Config::default());
    let night_nodes = EnvironmentNodes::mount(night.scheduler_mut(), 5).unwrap();
    night.frame(1.0 / 60.0, &inputs(0.0, 60.0), &machines);

    assert!(noon_sun > night_nodes.sun.borrow().intensity);
    assert!(noon_stars < night_nodes.stars.borrow().visibility);
}

#[test]
fn unmount_returns_registry_to_empty() {
    let mut frame = FactoryFrame::new(&Config::default());
    let nodes = EnvironmentNodes::mount(frame.scheduler_mut(), 10).unwrap();
    assert_eq!(frame.scheduler().registry().len(), nodes.registered());

    let machines = FactoryMachines::default();
    let report = frame.frame(1.0 / 60.0, &inputs(20.0, 60.0), &machines);
    assert!(report.animation.updated > 0);
    assert_eq!(report.animation.stale, 0);

    nodes.unmount(frame.scheduler_mut());
    assert!(frame.scheduler().registry().is_empty());
    let report = frame.frame(1.0 / 60.0, &inputs(20.0, 60.0), &machines);
    assert_eq!(report.animation.updated, 0);
}

#[test]
fn dropped_nodes_are_skipped_as_stale() {
    let mut frame = FactoryFrame::new(&Config::default());
    let nodes = EnvironmentNodes::mount(frame.scheduler_mut(), 2).unwrap();
    let registered = nodes.registered() as u32;
    drop(nodes);

    // First frame runs every category, so every entry is visited once.
    let report = frame.frame(1.0 / 60.0, &inputs(20.0, 60.0), &machines_none());
    assert_eq!(report.animation.updated, 0);
    assert_eq!(report.animation.stale, registered);
}

fn machines_none() -> FactoryMachines {
    FactoryMachines::default()
}

#[test]
fn simulation_jump_snaps_smooth_time() {
    let config = Config::default();
    let mut sim = MockSimulation::new(&config.demo, &config.time);
    let mut frame = FactoryFrame::new(&config);
    frame.initialize(sim.machines());

    sim.step(1.0 / 20.0);
    let inputs = sim.inputs(QualityTier::Medium, Vec3::ZERO);
    let step = frame.frame(1.0 / 60.0, &inputs, sim.machines()).time.unwrap();
    assert!(!step.snapped);

    sim.jump_to(sim.hour() + 6.0);
    let inputs = sim.inputs(QualityTier::Medium, Vec3::ZERO);
    let step = frame.frame(1.0 / 60.0, &inputs, sim.machines()).time.unwrap();
    assert!(step.snapped);
    assert_eq!(step.hour, sim.published_hour());
}
