//! The generic instanced renderer.

use std::hash::{Hash, Hasher};

use glam::Vec3;
use gristmill_lod::{GeometrySet, LodGeometrySelector, UnitShape};
use gristmill_render::{InstanceBuffer, variation_from_hash, vary_color, zero_scale_at};
use gristmill_scene::{FrameInputs, MachineDescriptor, MachineId, QualityTier};
use rustc_hash::FxHasher;
use tracing::{debug, trace};

use crate::classes::{MachineClass, machine_transform};
use crate::layout::{SubPartLayout, SubPartSpec};
use crate::selection::CulledSelection;

/// Per-frame inputs for the update pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceContext {
    /// Render seconds since start.
    pub elapsed: f64,
    pub camera_position: Vec3,
    pub quality: QualityTier,
    pub view_visible: bool,
}

impl InstanceContext {
    pub fn from_inputs(inputs: &FrameInputs, elapsed: f64) -> Self {
        Self {
            elapsed,
            camera_position: inputs.camera_position,
            quality: inputs.quality,
            view_visible: inputs.view_visible,
        }
    }
}

/// Counters from the most recent pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub machines: u32,
    pub visible: u32,
    pub culled: u32,
    pub slots_written: u32,
    /// Buffers flagged for upload.
    pub buffers_dirtied: u32,
    /// Whether the pass began with a full static reinitialization.
    pub reinitialized: bool,
}

/// Draws every machine of class `C` through one instance buffer per sub-part.
pub struct InstancedRenderer<C: MachineClass> {
    class: C,
    layouts: Vec<SubPartLayout>,
    shapes: Vec<UnitShape>,
    buffers: Vec<InstanceBuffer>,
    touched: Vec<bool>,
    ids: Vec<MachineId>,
    culled: Vec<bool>,
    cull_radius: f32,
    color_variation: bool,
    selection: CulledSelection,
    geometry: Option<GeometrySet>,
    stats: RenderStats,
}

impl<C: MachineClass> InstancedRenderer<C> {
    pub fn new(class: C) -> Self {
        let parts = class.parts();
        let layouts = parts
            .iter()
            .map(|p| SubPartLayout::new(p.parts_per_machine))
            .collect();
        let shapes = parts.iter().map(|p| p.shape).collect();
        let buffers = parts
            .iter()
            .map(|p| InstanceBuffer::new(format!("{}-{}", C::NAME, p.name), 0))
            .collect();
        let touched = vec![false; parts.len()];
        let cull_radius = class.default_cull_radius();
        Self {
            class,
            layouts,
            shapes,
            buffers,
            touched,
            ids: Vec::new(),
            culled: Vec::new(),
            cull_radius,
            color_variation: true,
            selection: CulledSelection::default(),
            geometry: None,
            stats: RenderStats::default(),
        }
    }

    pub fn with_cull_radius(mut self, radius: f32) -> Self {
        self.cull_radius = radius.max(0.0);
        self
    }

    pub fn with_color_variation(mut self, enabled: bool) -> Self {
        self.color_variation = enabled;
        self
    }

    pub fn with_selection_policy(mut self, policy: CulledSelection) -> Self {
        self.selection = policy;
        self
    }

    pub fn class(&self) -> &C {
        &self.class
    }

    pub fn parts(&self) -> &[SubPartSpec] {
        self.class.parts()
    }

    pub fn cull_radius(&self) -> f32 {
        self.cull_radius
    }

    pub fn buffer(&self, part: usize) -> Option<&InstanceBuffer> {
        self.buffers.get(part)
    }

    /// Instance buffers in sub-part order, for GPU upload.
    pub fn buffers_mut(&mut self) -> &mut [InstanceBuffer] {
        &mut self.buffers
    }

    pub fn layout(&self, part: usize) -> Option<SubPartLayout> {
        self.layouts.get(part).copied()
    }

    pub fn machine_count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_culled(&self, machine: usize) -> bool {
        self.culled.get(machine).copied().unwrap_or(false)
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Geometry for the current quality tier, once [`set_quality`](Self::set_quality) has run.
    pub fn geometry(&self) -> Option<&GeometrySet> {
        self.geometry.as_ref()
    }

    /// Swap sub-part geometry for `tier`. Returns true when the set changed.
    pub fn set_quality(&mut self, tier: QualityTier, selector: &mut LodGeometrySelector) -> bool {
        let changed = selector.reselect(&mut self.geometry, tier, &self.shapes);
        if changed {
            debug!("{} geometry switched to {} tier", C::NAME, tier);
        }
        changed
    }

    /// Whether `machines` no longer matches the list the buffers were built for.
    pub fn needs_reinit(&self, machines: &[MachineDescriptor]) -> bool {
        machines.len() != self.ids.len()
            || machines.iter().zip(&self.ids).any(|(m, id)| &m.id != id)
    }

    /// Static pass: size every buffer and write every slot.
    ///
    /// Dynamic parts start at their rest pose; colours get a deterministic
    /// per-machine variation.
    pub fn initialize(&mut self, machines: &[MachineDescriptor]) -> RenderStats {
        let parts = self.class.parts();
        let mut slots_written = 0u32;

        for (part, (spec, layout)) in parts.iter().zip(&self.layouts).enumerate() {
            let buffer = &mut self.buffers[part];
            buffer.resize(layout.slot_count(machines.len()));
            for (i, machine) in machines.iter().enumerate() {
                let world = machine_transform(machine);
                let color = if self.color_variation {
                    let (hue, lightness) = variation_from_hash(id_hash(&machine.id));
                    vary_color(spec.base_color, hue, lightness)
                } else {
                    spec.base_color
                };
                for k in 0..layout.parts_per_machine {
                    let slot = layout.slot(i, k);
                    buffer.set_transform(slot, world * self.class.rest_transform(part, k, machine));
                    buffer.set_color(slot, color);
                    slots_written += 1;
                }
            }
            buffer.mark_dirty();
        }

        self.ids.clear();
        self.ids.extend(machines.iter().map(|m| m.id.clone()));
        self.culled.clear();
        self.culled.resize(machines.len(), false);

        debug!(
            "Initialized {} {} instances across {} sub-parts",
            machines.len(),
            C::NAME,
            parts.len()
        );

        self.stats = RenderStats {
            machines: machines.len() as u32,
            visible: machines.len() as u32,
            culled: 0,
            slots_written,
            buffers_dirtied: parts.len() as u32,
            reinitialized: true,
        };
        self.stats
    }

    /// Dynamic pass.
    ///
    /// Does nothing while the view is hidden. Reinitializes first if the
    /// machine list changed length or order. Each touched buffer is marked
    /// dirty once.
    pub fn update(&mut self, machines: &[MachineDescriptor], ctx: &InstanceContext) -> RenderStats {
        if !ctx.view_visible {
            return RenderStats::default();
        }
        let reinitialized = self.needs_reinit(machines);
        if reinitialized {
            debug!(
                "{} list changed ({} -> {} machines), rebuilding static instances",
                C::NAME,
                self.ids.len(),
                machines.len()
            );
            self.initialize(machines);
        }

        let parts = self.class.parts();
        let radius_sq = self.cull_radius * self.cull_radius;
        let skip_cosmetic = ctx.quality.is_lowest();
        self.touched.fill(false);
        let mut stats = RenderStats {
            machines: machines.len() as u32,
            reinitialized,
            ..Default::default()
        };

        for (i, machine) in machines.iter().enumerate() {
            let culled = machine.position.distance_squared(ctx.camera_position) > radius_sq;
            let was_culled = std::mem::replace(&mut self.culled[i], culled);
            if culled {
                stats.culled += 1;
            } else {
                stats.visible += 1;
            }
            // Culled slots stay collapsed until the machine comes back in range.
            if culled && was_culled {
                continue;
            }
            let world = machine_transform(machine);

            // Entering or leaving the cull radius rewrites every dynamic part,
            // cosmetic ones included, whatever the tier.
            let transition = culled != was_culled;
            for (part, (spec, layout)) in parts.iter().zip(&self.layouts).enumerate() {
                if !spec.is_dynamic() || (skip_cosmetic && !spec.essential && !transition) {
                    continue;
                }
                let buffer = &mut self.buffers[part];
                for k in 0..layout.parts_per_machine {
                    let transform = if culled {
                        zero_scale_at(machine.position)
                    } else {
                        world * self.class.animate(part, k, machine, ctx.elapsed)
                    };
                    buffer.set_transform(layout.slot(i, k), transform);
                    stats.slots_written += 1;
                }
                self.touched[part] = true;
            }
            if transition {
                trace!("{} '{}' culled: {}", C::NAME, machine.id, culled);
            }
        }

        for (buffer, touched) in self.buffers.iter_mut().zip(&self.touched) {
            if *touched {
                buffer.mark_dirty();
                stats.buffers_dirtied += 1;
            }
        }

        self.stats = stats;
        stats
    }

    /// Map a picked `(part, instance)` back to its machine and hand it to `on_select`.
    ///
    /// Returns the machine index, or `None` when the pick is out of range,
    /// refers to a list the buffers were not built from, or lands on a
    /// culled slot under [`CulledSelection::Ignore`].
    pub fn resolve_selection<F>(
        &self,
        part: usize,
        instance: u32,
        machines: &[MachineDescriptor],
        mut on_select: F,
    ) -> Option<usize>
    where
        F: FnMut(&MachineDescriptor),
    {
        let spec = self.class.parts().get(part)?;
        let index = self.layouts[part].machine_index(instance)?;
        let machine = machines.get(index)?;
        if self.ids.get(index) != Some(&machine.id) {
            return None;
        }
        if self.selection == CulledSelection::Ignore && spec.is_dynamic() {
            let slot = self.buffers[part].get(instance as usize)?;
            if slot.is_zero_scaled() {
                return None;
            }
        }
        on_select(machine);
        Some(index)
    }
}

fn id_hash(id: &MachineId) -> u64 {
    let mut hasher = FxHasher::default();
    id.as_str().hash(&mut hasher);
    hasher.finish()
}
