//! Stand-in for the plant simulation used by the headless demo.
//!
//! Runs its own clock at a fixed step and publishes the authoritative hour
//! only every `publish_interval_ms`, so the render core sees the same
//! stepped, rate-limited time source it gets from the real simulation.

use std::hash::{Hash, Hasher};

use glam::Vec3;
use gristmill_config::{DemoConfig, TimeConfig};
use gristmill_scene::{
    FrameInputs, MachineDescriptor, MachineMetrics, MachineStatus, QualityTier, Weather,
};
use gristmill_time::wrap_hour;
use rustc_hash::FxHasher;
use tracing::{debug, info};

use crate::frame::{FactoryMachines, MachineKind};

/// Simulated seconds between status reshuffles.
const STATUS_EPOCH_SECS: f64 = 30.0;
/// Real seconds between weather changes.
const WEATHER_PERIOD_SECS: f64 = 120.0;
const WEATHER_CYCLE: [Weather; 7] = [
    Weather::Clear,
    Weather::PartlyCloudy,
    Weather::Overcast,
    Weather::Rain,
    Weather::Storm,
    Weather::Fog,
    Weather::Snow,
];

pub struct MockSimulation {
    hour: f64,
    acceleration: f64,
    paused: bool,
    published_hour: f64,
    since_publish: f64,
    publish_interval: f64,
    sim_time: f64,
    status_epoch: u64,
    machines: FactoryMachines,
}

impl MockSimulation {
    pub fn new(demo: &DemoConfig, time: &TimeConfig) -> Self {
        let hour = wrap_hour(time.start_hour);
        let machines = FactoryMachines {
            silos: row(MachineKind::Silo, demo.silos, 12.0, -60.0, 12),
            mills: row(MachineKind::Mill, demo.mills, 8.0, -20.0, 8),
            sifters: row(MachineKind::Sifter, demo.sifters, 6.0, 10.0, 8),
            packers: row(MachineKind::Packer, demo.packers, 9.0, 35.0, 4),
        };
        info!(
            "Mock simulation: {} machines, start hour {:.2}, {}x",
            machines.total(),
            hour,
            time.acceleration
        );
        let mut sim = Self {
            hour,
            acceleration: time.acceleration,
            paused: false,
            published_hour: hour,
            since_publish: 0.0,
            publish_interval: f64::from(demo.publish_interval_ms) / 1000.0,
            sim_time: 0.0,
            status_epoch: 0,
            machines,
        };
        sim.refresh_machines();
        sim
    }

    /// Advance by `dt` real seconds.
    pub fn step(&mut self, dt: f64) {
        if !self.paused {
            self.hour = wrap_hour(self.hour + dt * self.acceleration / 3600.0);
            self.sim_time += dt;
            self.refresh_machines();
        }
        self.since_publish += dt;
        if self.since_publish >= self.publish_interval {
            self.since_publish = 0.0;
            self.published_hour = self.hour;
        }
    }

    /// Jump the simulation clock, publishing immediately.
    pub fn jump_to(&mut self, hour: f64) {
        self.hour = wrap_hour(hour);
        self.published_hour = self.hour;
        self.since_publish = 0.0;
        debug!("Simulation jumped to {:.2}", self.hour);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Internal (unpublished) hour.
    pub fn hour(&self) -> f64 {
        self.hour
    }

    /// Last hour published to the render core.
    pub fn published_hour(&self) -> f64 {
        self.published_hour
    }

    pub fn weather(&self) -> Weather {
        let index = (self.sim_time / WEATHER_PERIOD_SECS) as usize % WEATHER_CYCLE.len();
        WEATHER_CYCLE[index]
    }

    pub fn machines(&self) -> &FactoryMachines {
        &self.machines
    }

    /// Frame inputs as the render core would read them this frame.
    pub fn inputs(&self, quality: QualityTier, camera_position: Vec3) -> FrameInputs {
        FrameInputs {
            authoritative_hour: self.published_hour,
            acceleration: self.acceleration,
            paused: self.paused,
            weather: self.weather(),
            quality,
            view_visible: true,
            camera_position,
        }
    }

    fn refresh_machines(&mut self) {
        let epoch = (self.sim_time / STATUS_EPOCH_SECS) as u64;
        let reshuffle = epoch != self.status_epoch || self.sim_time == 0.0;
        self.status_epoch = epoch;
        let t = self.sim_time;

        for kind in MachineKind::ALL {
            let list = match kind {
                MachineKind::Silo => &mut self.machines.silos,
                MachineKind::Mill => &mut self.machines.mills,
                MachineKind::Sifter => &mut self.machines.sifters,
                MachineKind::Packer => &mut self.machines.packers,
            };
            for (i, machine) in list.iter_mut().enumerate() {
                let phase = i as f64 * 0.7 + kind.index() as f64;
                machine.metrics = MachineMetrics {
                    load_percent: (50.0 + 45.0 * (t * 0.02 + phase).sin()) as f32,
                    vibration: (2.0 + 1.5 * (t * 0.3 + phase).sin()) as f32,
                    rpm: (600.0 * (0.9 + 0.1 * (t * 0.1 + phase).cos())) as f32,
                };
                if reshuffle {
                    machine.status = status_for(kind, i, epoch);
                }
            }
        }
    }
}

fn status_for(kind: MachineKind, index: usize, epoch: u64) -> MachineStatus {
    let mut hasher = FxHasher::default();
    (kind.index(), index, epoch).hash(&mut hasher);
    match hasher.finish() % 40 {
        0 => MachineStatus::Critical,
        1 | 2 => MachineStatus::Warning,
        3 | 4 => MachineStatus::Idle,
        5 => MachineStatus::Offline,
        _ => MachineStatus::Running,
    }
}

fn row(
    kind: MachineKind,
    count: u32,
    spacing: f32,
    z: f32,
    per_row: u32,
) -> Vec<MachineDescriptor> {
    let prefix = match kind {
        MachineKind::Silo => "silo",
        MachineKind::Mill => "mill",
        MachineKind::Sifter => "sifter",
        MachineKind::Packer => "packer",
    };
    let per_row = per_row.max(1);
    (0..count)
        .map(|i| {
            let column = (i % per_row) as f32 - (per_row.min(count) as f32 - 1.0) * 0.5;
            let rank = (i / per_row) as f32;
            MachineDescriptor::new(
                format!("{prefix}-{i:03}"),
                Vec3::new(column * spacing, 0.0, z - rank * spacing),
                0.0,
            )
        })
        .collect()
}
