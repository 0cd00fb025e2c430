//! Sub-part tables and slot addressing.

use gristmill_lod::UnitShape;

/// Whether a sub-part moves after initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubPartKind {
    /// Written once by the static pass.
    Static,
    /// Rewritten on every update and zero-scaled when culled.
    Dynamic,
}

/// One sub-part of a machine class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubPartSpec {
    pub name: &'static str,
    pub shape: UnitShape,
    /// Instances of this part per machine (e.g. two rollers per mill).
    pub parts_per_machine: u32,
    pub kind: SubPartKind,
    /// Non-essential dynamic parts are left untouched at the lowest quality tier.
    pub essential: bool,
    /// Linear RGBA before per-instance variation.
    pub base_color: [f32; 4],
}

impl SubPartSpec {
    pub const fn new(
        name: &'static str,
        shape: UnitShape,
        parts_per_machine: u32,
        kind: SubPartKind,
    ) -> Self {
        Self {
            name,
            shape,
            parts_per_machine,
            kind,
            essential: true,
            base_color: [0.8, 0.8, 0.8, 1.0],
        }
    }

    pub const fn cosmetic(mut self) -> Self {
        self.essential = false;
        self
    }

    pub const fn color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, 1.0];
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == SubPartKind::Dynamic
    }
}

/// Maps between buffer slots and machine-list indices for one sub-part.
///
/// Slot `base_offset + i * parts_per_machine + k` holds copy `k` of the
/// part for `machines[i]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubPartLayout {
    pub parts_per_machine: u32,
    pub base_offset: u32,
}

impl SubPartLayout {
    pub fn new(parts_per_machine: u32) -> Self {
        Self {
            parts_per_machine: parts_per_machine.max(1),
            base_offset: 0,
        }
    }

    /// Buffer slot of copy `k` for machine `machine`.
    pub fn slot(&self, machine: usize, k: u32) -> usize {
        self.base_offset as usize + machine * self.parts_per_machine as usize + k as usize
    }

    /// Slots needed for `machine_count` machines.
    pub fn slot_count(&self, machine_count: usize) -> usize {
        self.base_offset as usize + machine_count * self.parts_per_machine as usize
    }

    /// Machine index owning `instance`, or `None` below `base_offset`.
    pub fn machine_index(&self, instance: u32) -> Option<usize> {
        let local = instance.checked_sub(self.base_offset)?;
        Some((local / self.parts_per_machine.max(1)) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_index_round_trips_slots() {
        let layout = SubPartLayout::new(2);
        for machine in 0..5 {
            for k in 0..2 {
                let slot = layout.slot(machine, k) as u32;
                assert_eq!(layout.machine_index(slot), Some(machine));
            }
        }
        assert_eq!(layout.slot_count(5), 10);
    }

    #[test]
    fn test_base_offset() {
        let layout = SubPartLayout {
            parts_per_machine: 6,
            base_offset: 12,
        };
        assert_eq!(layout.machine_index(11), None);
        assert_eq!(layout.machine_index(12), Some(0));
        assert_eq!(layout.machine_index(23), Some(1));
        assert_eq!(layout.slot(1, 0), 18);
    }

    #[test]
    fn test_zero_parts_per_machine_clamped() {
        assert_eq!(SubPartLayout::new(0).parts_per_machine, 1);
    }
}
