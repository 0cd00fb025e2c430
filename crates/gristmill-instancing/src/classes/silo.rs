use std::f32::consts::PI;

use glam::{Mat4, Vec3};
use gristmill_lod::UnitShape;
use gristmill_scene::{MachineDescriptor, MachineStatus};

use super::{MachineClass, placed};
use crate::layout::{SubPartKind, SubPartSpec};

const SHELL_DIAMETER: f32 = 8.0;
const SHELL_HEIGHT: f32 = 18.0;
const LEG_HEIGHT: f32 = 4.0;
const HOPPER_HEIGHT: f32 = 3.0;
/// Grain column never shrinks below this, so an empty silo still shows a floor.
const MIN_FILL: f32 = 0.02;

const PARTS: [SubPartSpec; 5] = [
    SubPartSpec::new("shell", UnitShape::Cylinder, 1, SubPartKind::Static).color(0.72, 0.74, 0.76),
    SubPartSpec::new("hopper", UnitShape::Cone, 1, SubPartKind::Static).color(0.62, 0.64, 0.66),
    SubPartSpec::new("legs", UnitShape::Cuboid, 4, SubPartKind::Static)
        .cosmetic()
        .color(0.35, 0.36, 0.38),
    SubPartSpec::new("grain", UnitShape::Cylinder, 1, SubPartKind::Dynamic).color(0.86, 0.76, 0.52),
    SubPartSpec::new("status-lamp", UnitShape::Sphere, 1, SubPartKind::Dynamic)
        .cosmetic()
        .color(1.0, 0.55, 0.1),
];

/// Storage silo: a tall shell on legs whose grain column tracks the load.
#[derive(Clone, Copy, Debug, Default)]
pub struct StorageSilo;

impl StorageSilo {
    pub const SHELL: usize = 0;
    pub const HOPPER: usize = 1;
    pub const LEGS: usize = 2;
    pub const GRAIN: usize = 3;
    pub const STATUS_LAMP: usize = 4;

    fn grain(fill: f32) -> Mat4 {
        let fill = fill.clamp(MIN_FILL, 1.0);
        placed(
            Vec3::new(0.0, LEG_HEIGHT, 0.0),
            Vec3::new(SHELL_DIAMETER * 0.96, SHELL_HEIGHT * fill, SHELL_DIAMETER * 0.96),
        )
    }

    fn lamp(scale: f32) -> Mat4 {
        placed(
            Vec3::new(0.0, LEG_HEIGHT + SHELL_HEIGHT, 0.0),
            Vec3::splat(0.8 * scale),
        )
    }
}

impl MachineClass for StorageSilo {
    const NAME: &'static str = "silo";

    fn parts(&self) -> &[SubPartSpec] {
        &PARTS
    }

    fn default_cull_radius(&self) -> f32 {
        220.0
    }

    fn rest_transform(&self, part: usize, k: u32, machine: &MachineDescriptor) -> Mat4 {
        match part {
            Self::SHELL => placed(
                Vec3::new(0.0, LEG_HEIGHT, 0.0),
                Vec3::new(SHELL_DIAMETER, SHELL_HEIGHT, SHELL_DIAMETER),
            ),
            // Cone flipped so the apex points down into the outlet.
            Self::HOPPER => {
                Mat4::from_translation(Vec3::new(0.0, LEG_HEIGHT, 0.0))
                    * Mat4::from_rotation_x(PI)
                    * Mat4::from_scale(Vec3::new(SHELL_DIAMETER, HOPPER_HEIGHT, SHELL_DIAMETER))
            }
            Self::LEGS => {
                let corner = SHELL_DIAMETER * 0.35;
                let (x, z) = match k {
                    0 => (corner, corner),
                    1 => (-corner, corner),
                    2 => (-corner, -corner),
                    _ => (corner, -corner),
                };
                placed(Vec3::new(x, 0.0, z), Vec3::new(0.4, LEG_HEIGHT, 0.4))
            }
            Self::GRAIN => Self::grain(machine.metrics.load_fraction()),
            _ => Self::lamp(1.0),
        }
    }

    fn animate(&self, part: usize, k: u32, machine: &MachineDescriptor, elapsed: f64) -> Mat4 {
        match part {
            Self::GRAIN => Self::grain(machine.metrics.load_fraction()),
            Self::STATUS_LAMP => {
                let pulse = match machine.status {
                    MachineStatus::Warning => 0.85 + 0.15 * (elapsed * 4.0).sin() as f32,
                    MachineStatus::Critical => 0.75 + 0.25 * (elapsed * 9.0).sin() as f32,
                    _ => 0.6,
                };
                Self::lamp(pulse)
            }
            _ => self.rest_transform(part, k, machine),
        }
    }
}
