use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use gristmill_lod::UnitShape;
use gristmill_scene::MachineDescriptor;

use super::{MachineClass, placed};
use crate::layout::{SubPartKind, SubPartSpec};

/// Gyration frequency at full speed, in Hz.
const GYRATION_HZ: f32 = 2.2;
/// Radius of the sieve stack's circular path, in world units.
const GYRATION_RADIUS: f32 = 0.12;

const BOX: Vec3 = Vec3::new(2.4, 1.8, 2.4);
const HANG_HEIGHT: f32 = 1.0;

const PARTS: [SubPartSpec; 3] = [
    SubPartSpec::new("posts", UnitShape::Cuboid, 4, SubPartKind::Static).color(0.30, 0.32, 0.36),
    SubPartSpec::new("sieve-stack", UnitShape::Cuboid, 1, SubPartKind::Dynamic)
        .color(0.88, 0.86, 0.80),
    SubPartSpec::new("inlet", UnitShape::Cylinder, 1, SubPartKind::Static)
        .cosmetic()
        .color(0.66, 0.68, 0.70),
];

/// Plan sifter: a suspended sieve stack gyrating in a horizontal circle.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanSifter;

impl PlanSifter {
    pub const POSTS: usize = 0;
    pub const SIEVE_STACK: usize = 1;
    pub const INLET: usize = 2;

    /// Horizontal offset of the sieve stack from its rest position.
    pub fn gyration(machine: &MachineDescriptor, elapsed: f64) -> Vec3 {
        let speed = machine.status.speed_factor();
        if speed <= 0.0 {
            return Vec3::ZERO;
        }
        let phase = ((elapsed * f64::from(GYRATION_HZ)).rem_euclid(1.0) as f32) * TAU;
        // Throw shrinks with speed: a struggling drive cannot hold full amplitude.
        Vec3::new(phase.cos(), 0.0, phase.sin()) * GYRATION_RADIUS * speed
    }

    fn stack(offset: Vec3) -> Mat4 {
        placed(Vec3::new(0.0, HANG_HEIGHT, 0.0) + offset, BOX)
    }
}

impl MachineClass for PlanSifter {
    const NAME: &'static str = "sifter";

    fn parts(&self) -> &[SubPartSpec] {
        &PARTS
    }

    fn default_cull_radius(&self) -> f32 {
        90.0
    }

    fn rest_transform(&self, part: usize, k: u32, _machine: &MachineDescriptor) -> Mat4 {
        match part {
            Self::POSTS => {
                let half = BOX.x * 0.5 + 0.3;
                let x = if k % 2 == 0 { half } else { -half };
                let z = if k < 2 { half } else { -half };
                placed(
                    Vec3::new(x, 0.0, z),
                    Vec3::new(0.2, HANG_HEIGHT + BOX.y + 1.5, 0.2),
                )
            }
            Self::SIEVE_STACK => Self::stack(Vec3::ZERO),
            _ => placed(
                Vec3::new(0.0, HANG_HEIGHT + BOX.y, 0.0),
                Vec3::new(0.4, 1.5, 0.4),
            ),
        }
    }

    fn animate(&self, part: usize, k: u32, machine: &MachineDescriptor, elapsed: f64) -> Mat4 {
        match part {
            Self::SIEVE_STACK => Self::stack(Self::gyration(machine, elapsed)),
            _ => self.rest_transform(part, k, machine),
        }
    }
}
