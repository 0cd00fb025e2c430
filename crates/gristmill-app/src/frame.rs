//! The per-frame driver.

use gristmill_anim::{
    AnimationCategory, AnimationReport, AnimationScheduler, CategoryDivisors, FrameContext,
};
use gristmill_config::{Config, ScheduleConfig};
use gristmill_instancing::{
    CulledSelection, InstanceContext, InstancedRenderer, PackingStation, PlanSifter, RenderStats,
    RollerMill, StorageSilo,
};
use gristmill_lod::LodGeometrySelector;
use gristmill_scene::{FrameInputs, MachineDescriptor, QualityTier};
use gristmill_time::{
    FrameClock, FrameThrottle, KeyframeTable, SkyPalette, TimeSimulation, TimeStep,
    default_day_cycle,
};
use tracing::{debug, trace};

/// Machine populations, keyed for the per-class throttle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MachineKind {
    Silo,
    Mill,
    Sifter,
    Packer,
}

impl MachineKind {
    pub const ALL: [MachineKind; 4] = [
        MachineKind::Silo,
        MachineKind::Mill,
        MachineKind::Sifter,
        MachineKind::Packer,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// The ordered machine lists published by the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FactoryMachines {
    pub silos: Vec<MachineDescriptor>,
    pub mills: Vec<MachineDescriptor>,
    pub sifters: Vec<MachineDescriptor>,
    pub packers: Vec<MachineDescriptor>,
}

impl FactoryMachines {
    pub fn of(&self, kind: MachineKind) -> &[MachineDescriptor] {
        match kind {
            MachineKind::Silo => &self.silos,
            MachineKind::Mill => &self.mills,
            MachineKind::Sifter => &self.sifters,
            MachineKind::Packer => &self.packers,
        }
    }

    pub fn total(&self) -> usize {
        MachineKind::ALL.iter().map(|&k| self.of(k).len()).sum()
    }
}

/// What one call to [`FactoryFrame::frame`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// False when the hidden view short-circuited the pass.
    pub ran: bool,
    pub time: Option<TimeStep>,
    pub animation: AnimationReport,
    /// Stats per [`MachineKind`], `None` when that class was throttled out.
    pub machines: [Option<RenderStats>; 4],
}

/// Map the `schedule` config section onto animation divisors.
pub fn category_divisors(schedule: &ScheduleConfig) -> CategoryDivisors {
    CategoryDivisors::default()
        .with(AnimationCategory::SkyDome, schedule.sky_dome)
        .with(AnimationCategory::Starfield, schedule.starfield)
        .with(AnimationCategory::BuildingFacade, schedule.building_facade)
        .with(AnimationCategory::CityLights, schedule.city_lights)
        .with(AnimationCategory::TerrainLayer, schedule.terrain_layer)
        .with(AnimationCategory::WaterSurface, schedule.water_surface)
        .with(
            AnimationCategory::DirectionalLighting,
            schedule.directional_lighting,
        )
}

/// Owns every per-frame system of the render core.
pub struct FactoryFrame {
    clock: FrameClock,
    time: TimeSimulation,
    day_cycle: KeyframeTable<SkyPalette>,
    scheduler: AnimationScheduler,
    selector: LodGeometrySelector,
    class_throttle: FrameThrottle<MachineKind>,
    class_divisors: [u32; 4],
    silos: InstancedRenderer<StorageSilo>,
    mills: InstancedRenderer<RollerMill>,
    sifters: InstancedRenderer<PlanSifter>,
    packers: InstancedRenderer<PackingStation>,
}

impl FactoryFrame {
    pub fn new(config: &Config) -> Self {
        let render = &config.render;
        let schedule = &config.schedule;
        let policy = CulledSelection::from_allow(render.select_culled);
        let variation = render.color_variation;

        let mut frame = Self {
            clock: FrameClock::new(),
            time: TimeSimulation::new(config.time.start_hour, config.time.acceleration)
                .with_drift_threshold(config.time.drift_threshold_hours),
            day_cycle: default_day_cycle(),
            scheduler: AnimationScheduler::new(category_divisors(schedule)),
            selector: LodGeometrySelector::new(),
            class_throttle: FrameThrottle::new(),
            class_divisors: [
                schedule.silos,
                schedule.mills,
                schedule.sifters,
                schedule.packers,
            ],
            silos: InstancedRenderer::new(StorageSilo)
                .with_cull_radius(render.silo_cull_radius)
                .with_color_variation(variation)
                .with_selection_policy(policy),
            mills: InstancedRenderer::new(RollerMill)
                .with_cull_radius(render.mill_cull_radius)
                .with_color_variation(variation)
                .with_selection_policy(policy),
            sifters: InstancedRenderer::new(PlanSifter)
                .with_cull_radius(render.sifter_cull_radius)
                .with_color_variation(variation)
                .with_selection_policy(policy),
            packers: InstancedRenderer::new(PackingStation)
                .with_cull_radius(render.packer_cull_radius)
                .with_color_variation(variation)
                .with_selection_policy(policy),
        };
        frame.set_quality(render.quality);
        frame
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Scene nodes register and unregister their animated state here.
    pub fn scheduler_mut(&mut self) -> &mut AnimationScheduler {
        &mut self.scheduler
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn time(&self) -> &TimeSimulation {
        &self.time
    }

    pub fn selector(&self) -> &LodGeometrySelector {
        &self.selector
    }

    pub fn silos(&self) -> &InstancedRenderer<StorageSilo> {
        &self.silos
    }

    pub fn mills(&self) -> &InstancedRenderer<RollerMill> {
        &self.mills
    }

    pub fn sifters(&self) -> &InstancedRenderer<PlanSifter> {
        &self.sifters
    }

    pub fn packers(&self) -> &InstancedRenderer<PackingStation> {
        &self.packers
    }

    /// Switch every class to `tier`'s geometry. Returns how many changed.
    pub fn set_quality(&mut self, tier: QualityTier) -> usize {
        let selector = &mut self.selector;
        [
            self.silos.set_quality(tier, selector),
            self.mills.set_quality(tier, selector),
            self.sifters.set_quality(tier, selector),
            self.packers.set_quality(tier, selector),
        ]
        .into_iter()
        .filter(|&changed| changed)
        .count()
    }

    /// Static pass for every class.
    pub fn initialize(&mut self, machines: &FactoryMachines) {
        self.silos.initialize(&machines.silos);
        self.mills.initialize(&machines.mills);
        self.sifters.initialize(&machines.sifters);
        self.packers.initialize(&machines.packers);
    }

    /// Run one displayed frame.
    ///
    /// A hidden view skips everything. A paused simulation snaps time to
    /// the authoritative hour and then skips the animation and machine passes.
    pub fn frame(
        &mut self,
        real_dt: f64,
        inputs: &FrameInputs,
        machines: &FactoryMachines,
    ) -> FrameReport {
        if !inputs.view_visible {
            trace!("View hidden, skipping frame");
            return FrameReport::default();
        }

        let dt = self.clock.tick(real_dt);
        self.time
            .set_authoritative(inputs.authoritative_hour, inputs.acceleration, inputs.paused);
        let step = self.time.step(dt);
        let mut report = FrameReport {
            ran: true,
            time: Some(step),
            ..Default::default()
        };
        if inputs.paused {
            return report;
        }

        if self.set_quality(inputs.quality) > 0 {
            debug!("Quality tier now {}", inputs.quality);
        }

        let palette = self.day_cycle.sample(step.hour);
        let elapsed = self.clock.elapsed();
        let anim_ctx = FrameContext::new(step.hour, elapsed, palette, inputs.weather);
        report.animation = self.scheduler.run(&anim_ctx);

        let instance_ctx = InstanceContext::from_inputs(inputs, elapsed);
        for kind in MachineKind::ALL {
            if !self
                .class_throttle
                .should_run(kind, self.class_divisors[kind.index()])
            {
                continue;
            }
            let list = machines.of(kind);
            let stats = match kind {
                MachineKind::Silo => self.silos.update(list, &instance_ctx),
                MachineKind::Mill => self.mills.update(list, &instance_ctx),
                MachineKind::Sifter => self.sifters.update(list, &instance_ctx),
                MachineKind::Packer => self.packers.update(list, &instance_ctx),
            };
            report.machines[kind.index()] = Some(stats);
        }
        report
    }
}
