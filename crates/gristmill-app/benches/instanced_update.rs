use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use gristmill_app::{EnvironmentNodes, FactoryFrame, MockSimulation};
use gristmill_config::{Config, DemoConfig, TimeConfig};
use gristmill_instancing::{InstanceContext, InstancedRenderer, RollerMill};
use gristmill_scene::{MachineDescriptor, MachineMetrics, QualityTier};

fn mill_grid(count: usize) -> Vec<MachineDescriptor> {
    (0..count)
        .map(|i| {
            let position = Vec3::new((i % 32) as f32 * 6.0, 0.0, (i / 32) as f32 * 6.0);
            MachineDescriptor::new(format!("mill-{i:04}"), position, 0.0).with_metrics(
                MachineMetrics {
                    load_percent: 70.0,
                    vibration: 2.0,
                    rpm: 600.0,
                },
            )
        })
        .collect()
}

fn ctx(elapsed: f64, camera_position: Vec3) -> InstanceContext {
    InstanceContext {
        elapsed,
        camera_position,
        quality: QualityTier::Medium,
        view_visible: true,
    }
}

fn bench_mill_update_1000(c: &mut Criterion) {
    let machines = mill_grid(1000);
    let mut renderer = InstancedRenderer::new(RollerMill).with_cull_radius(1.0e6);
    renderer.initialize(&machines);
    let mut elapsed = 0.0;
    c.bench_function("mill_update_1000", |bencher| {
        bencher.iter(|| {
            elapsed += 1.0 / 60.0;
            black_box(renderer.update(&machines, &ctx(elapsed, Vec3::ZERO)))
        })
    });
}

fn bench_mill_update_1000_mostly_culled(c: &mut Criterion) {
    let machines = mill_grid(1000);
    let mut renderer = InstancedRenderer::new(RollerMill).with_cull_radius(40.0);
    renderer.initialize(&machines);
    let mut elapsed = 0.0;
    c.bench_function("mill_update_1000_mostly_culled", |bencher| {
        bencher.iter(|| {
            elapsed += 1.0 / 60.0;
            black_box(renderer.update(&machines, &ctx(elapsed, Vec3::ZERO)))
        })
    });
}

fn bench_full_frame(c: &mut Criterion) {
    let config = Config::default();
    let mut sim = MockSimulation::new(&DemoConfig::default(), &TimeConfig::default());
    let mut frame = FactoryFrame::new(&config);
    let _nodes = EnvironmentNodes::mount(frame.scheduler_mut(), 40).unwrap();
    frame.initialize(sim.machines());
    c.bench_function("factory_frame", |bencher| {
        bencher.iter(|| {
            sim.step(1.0 / 60.0);
            let inputs = sim.inputs(QualityTier::Medium, Vec3::new(0.0, 25.0, 80.0));
            black_box(frame.frame(1.0 / 60.0, &inputs, sim.machines()))
        })
    });
}

criterion_group!(
    benches,
    bench_mill_update_1000,
    bench_mill_update_1000_mostly_culled,
    bench_full_frame,
);
criterion_main!(benches);
