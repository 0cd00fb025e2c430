//! The per-frame animation pass.

use std::cell::RefCell;
use std::rc::Weak;

use gristmill_time::FrameThrottle;
use tracing::{debug, warn};

use crate::category::AnimationCategory;
use crate::descriptor::AnimationDescriptor;
use crate::error::AnimationError;
use crate::frame::FrameContext;
use crate::registry::{AnimationRegistry, Entry};
use crate::update;

/// Frame divisor for each category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryDivisors([u32; AnimationCategory::ALL.len()]);

impl Default for CategoryDivisors {
    fn default() -> Self {
        Self(AnimationCategory::ALL.map(|c| c.default_tier().divisor()))
    }
}

impl CategoryDivisors {
    pub fn get(&self, category: AnimationCategory) -> u32 {
        self.0[category.index()]
    }

    /// Set the divisor for `category`. Zero is treated as one.
    pub fn set(&mut self, category: AnimationCategory, divisor: u32) {
        self.0[category.index()] = divisor.max(1);
    }

    pub fn with(mut self, category: AnimationCategory, divisor: u32) -> Self {
        self.set(category, divisor);
        self
    }
}

/// Outcome of one [`AnimationScheduler::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationReport {
    /// Categories whose divisor fired.
    pub categories_run: u32,
    /// Descriptors whose block was rewritten.
    pub updated: u32,
    /// Descriptors skipped because their owner is gone.
    pub stale: u32,
    /// Categories abandoned part-way after an update error.
    pub failed: u32,
}

/// Owns the registry and runs the throttled per-category passes.
///
/// Construct one per application and hand it by reference to the code
/// that mounts scene nodes.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    registry: AnimationRegistry,
    throttle: FrameThrottle<AnimationCategory>,
    divisors: CategoryDivisors,
}

impl AnimationScheduler {
    pub fn new(divisors: CategoryDivisors) -> Self {
        Self {
            registry: AnimationRegistry::new(),
            throttle: FrameThrottle::new(),
            divisors,
        }
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AnimationRegistry {
        &mut self.registry
    }

    pub fn divisors(&self) -> &CategoryDivisors {
        &self.divisors
    }

    /// Shorthand for [`AnimationRegistry::register`].
    pub fn register(
        &mut self,
        category: AnimationCategory,
        id: impl Into<String>,
        descriptor: AnimationDescriptor,
    ) -> Result<Option<AnimationDescriptor>, AnimationError> {
        self.registry.register(category, id, descriptor)
    }

    /// Shorthand for [`AnimationRegistry::unregister`].
    pub fn unregister(
        &mut self,
        category: AnimationCategory,
        id: &str,
    ) -> Option<AnimationDescriptor> {
        self.registry.unregister(category, id)
    }

    /// Run every category whose divisor fires this frame.
    ///
    /// A failure inside one category stops that category for this frame and
    /// is counted in the report; the remaining categories still run.
    pub fn run(&mut self, frame: &FrameContext) -> AnimationReport {
        let mut report = AnimationReport::default();
        for category in AnimationCategory::ALL {
            if !self
                .throttle
                .should_run(category, self.divisors.get(category))
            {
                continue;
            }
            report.categories_run += 1;
            if let Err(err) = run_category(&mut self.registry, category, frame, &mut report) {
                warn!("Animation pass for {category} skipped: {err}");
                report.failed += 1;
            }
        }
        report
    }
}

fn run_category(
    registry: &mut AnimationRegistry,
    category: AnimationCategory,
    frame: &FrameContext,
    report: &mut AnimationReport,
) -> Result<(), AnimationError> {
    for (id, entry) in registry.entries_mut(category) {
        match apply(&entry.descriptor, frame) {
            Applied::Updated => report.updated += 1,
            Applied::Stale => {
                report.stale += 1;
                report_stale_once(category, id, entry);
            }
            Applied::Busy => {
                return Err(AnimationError::StateBusy {
                    category,
                    id: id.clone(),
                });
            }
        }
    }
    Ok(())
}

fn report_stale_once(category: AnimationCategory, id: &str, entry: &mut Entry) {
    if cfg!(debug_assertions) && !entry.stale_reported {
        debug!("Skipping stale {category} entity '{id}': owner dropped without unregistering");
    }
    entry.stale_reported = true;
}

enum Applied {
    Updated,
    Stale,
    Busy,
}

fn with_block<T>(block: &Weak<RefCell<T>>, f: impl FnOnce(&mut T)) -> Applied {
    let Some(block) = block.upgrade() else {
        return Applied::Stale;
    };
    match block.try_borrow_mut() {
        Ok(mut params) => {
            f(&mut params);
            Applied::Updated
        }
        Err(_) => Applied::Busy,
    }
}

fn apply(descriptor: &AnimationDescriptor, frame: &FrameContext) -> Applied {
    match descriptor {
        AnimationDescriptor::SkyDome { dome, cloud_speed } => {
            with_block(dome, |p| update::sky_dome(p, frame, *cloud_speed))
        }
        AnimationDescriptor::Starfield {
            stars,
            twinkle_phase,
        } => with_block(stars, |p| update::starfield(p, frame, *twinkle_phase)),
        AnimationDescriptor::BuildingFacade {
            facade,
            window_color,
            lit_fraction,
        } => with_block(facade, |p| {
            update::building_facade(p, frame, *window_color, *lit_fraction)
        }),
        AnimationDescriptor::CityLights {
            light,
            base_color,
            blink,
            active,
        } => with_block(light, |p| {
            update::city_light(p, frame, *base_color, blink, *active)
        }),
        AnimationDescriptor::TerrainLayer {
            layer,
            base_color,
            sky_blend,
        } => with_block(layer, |p| {
            update::terrain_layer(p, frame, *base_color, *sky_blend)
        }),
        AnimationDescriptor::WaterSurface { water, wave_speed } => {
            with_block(water, |p| update::water_surface(p, frame, *wave_speed))
        }
        AnimationDescriptor::DirectionalLighting { light, source } => {
            with_block(light, |p| update::directional_light(p, frame, *source))
        }
    }
}
