use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};
use gristmill_lod::UnitShape;
use gristmill_scene::MachineDescriptor;

use super::{MachineClass, placed, roller, vibration_offset};
use crate::layout::{SubPartKind, SubPartSpec};

/// Roll speed reported by a mill running at its nameplate rating.
pub const RATED_RPM: f32 = 600.0;

/// Visual roller speed at rated rpm, in revolutions per second. Real roll
/// speeds alias badly at display rates.
const VISUAL_REV_PER_SEC: f32 = 0.75;

const HOUSING: Vec3 = Vec3::new(4.0, 3.0, 2.5);
const ROLL_LENGTH: f32 = 3.2;
const ROLL_DIAMETER: f32 = 0.7;

const PARTS: [SubPartSpec; 4] = [
    SubPartSpec::new("housing", UnitShape::Cuboid, 1, SubPartKind::Static).color(0.82, 0.80, 0.74),
    SubPartSpec::new("feed-hopper", UnitShape::Cone, 1, SubPartKind::Static)
        .cosmetic()
        .color(0.70, 0.70, 0.72),
    SubPartSpec::new("rolls", UnitShape::Cylinder, 2, SubPartKind::Dynamic).color(0.55, 0.57, 0.60),
    SubPartSpec::new("drive-pulley", UnitShape::Cylinder, 1, SubPartKind::Dynamic)
        .cosmetic()
        .color(0.20, 0.22, 0.25),
];

/// Roller mill: a pair of counter-rotating rolls above a closed housing.
#[derive(Clone, Copy, Debug, Default)]
pub struct RollerMill;

impl RollerMill {
    pub const HOUSING: usize = 0;
    pub const FEED_HOPPER: usize = 1;
    pub const ROLLS: usize = 2;
    pub const DRIVE_PULLEY: usize = 3;

    /// Roll angle in radians after `elapsed` seconds.
    ///
    /// Rate is the status speed factor times the rpm ratio to [`RATED_RPM`].
    pub fn roll_angle(machine: &MachineDescriptor, elapsed: f64) -> f32 {
        let rpm_ratio = (machine.metrics.rpm / RATED_RPM).clamp(0.0, 2.0);
        let rate = VISUAL_REV_PER_SEC * machine.status.speed_factor() * rpm_ratio;
        ((elapsed * f64::from(rate)).rem_euclid(1.0) as f32) * TAU
    }

    fn roll(k: u32, angle: f32, shake: Vec3) -> Mat4 {
        // The second roll turns the opposite way to draw stock into the nip.
        let (z, angle) = if k == 0 {
            (-ROLL_DIAMETER * 0.52, angle)
        } else {
            (ROLL_DIAMETER * 0.52, -angle)
        };
        roller(
            Vec3::new(0.0, HOUSING.y + ROLL_DIAMETER * 0.5, z) + shake,
            ROLL_LENGTH,
            ROLL_DIAMETER,
            angle,
        )
    }

    fn pulley(angle: f32) -> Mat4 {
        roller(
            Vec3::new(HOUSING.x * 0.5 + 0.15, HOUSING.y * 0.6, 0.0),
            0.3,
            1.4,
            angle,
        )
    }
}

impl MachineClass for RollerMill {
    const NAME: &'static str = "mill";

    fn parts(&self) -> &[SubPartSpec] {
        &PARTS
    }

    fn default_cull_radius(&self) -> f32 {
        120.0
    }

    fn rest_transform(&self, part: usize, k: u32, _machine: &MachineDescriptor) -> Mat4 {
        match part {
            Self::HOUSING => placed(Vec3::ZERO, HOUSING),
            Self::FEED_HOPPER => {
                Mat4::from_translation(Vec3::new(0.0, HOUSING.y + 2.6, 0.0))
                    * Mat4::from_rotation_x(PI)
                    * Mat4::from_scale(Vec3::new(1.6, 1.2, 1.6))
            }
            Self::ROLLS => Self::roll(k, 0.0, Vec3::ZERO),
            _ => Self::pulley(0.0),
        }
    }

    fn animate(&self, part: usize, k: u32, machine: &MachineDescriptor, elapsed: f64) -> Mat4 {
        match part {
            Self::ROLLS => {
                let shake = vibration_offset(machine, elapsed, k);
                Self::roll(k, Self::roll_angle(machine, elapsed), shake)
            }
            // Belt drive ratio: the pulley turns at half the roll speed.
            Self::DRIVE_PULLEY => Self::pulley(Self::roll_angle(machine, elapsed * 0.5)),
            _ => self.rest_transform(part, k, machine),
        }
    }
}
