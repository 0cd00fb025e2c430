use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use gristmill_lod::UnitShape;
use gristmill_scene::MachineDescriptor;

use super::{MachineClass, placed, roller};
use crate::layout::{SubPartKind, SubPartSpec};

const CONVEYOR_ROLLERS: u32 = 6;
const CONVEYOR_LENGTH: f32 = 5.0;
const CONVEYOR_HEIGHT: f32 = 0.9;
const ROLLER_DIAMETER: f32 = 0.18;
/// Belt speed at full machine speed, world units per second.
const BELT_SPEED: f32 = 0.8;

const PARTS: [SubPartSpec; 4] = [
    SubPartSpec::new("frame", UnitShape::Cuboid, 1, SubPartKind::Static).color(0.25, 0.40, 0.62),
    SubPartSpec::new(
        "conveyor-rollers",
        UnitShape::Cylinder,
        CONVEYOR_ROLLERS,
        SubPartKind::Dynamic,
    )
    .cosmetic()
    .color(0.60, 0.62, 0.64),
    SubPartSpec::new("bag", UnitShape::Cuboid, 1, SubPartKind::Dynamic).color(0.93, 0.90, 0.82),
    SubPartSpec::new("filling-spout", UnitShape::Cone, 1, SubPartKind::Static)
        .cosmetic()
        .color(0.70, 0.70, 0.72),
];

/// Packing station: a roller conveyor carrying filled bags from the spout.
#[derive(Clone, Copy, Debug, Default)]
pub struct PackingStation;

impl PackingStation {
    pub const FRAME: usize = 0;
    pub const CONVEYOR_ROLLERS: usize = 1;
    pub const BAG: usize = 2;
    pub const FILLING_SPOUT: usize = 3;

    /// Distance travelled along the belt, wrapped to the conveyor length.
    pub fn belt_travel(machine: &MachineDescriptor, elapsed: f64) -> f32 {
        let speed = f64::from(BELT_SPEED * machine.status.speed_factor());
        (elapsed * speed).rem_euclid(f64::from(CONVEYOR_LENGTH)) as f32
    }

    fn roller_x(k: u32) -> f32 {
        let spacing = CONVEYOR_LENGTH / CONVEYOR_ROLLERS as f32;
        -CONVEYOR_LENGTH * 0.5 + spacing * (k as f32 + 0.5)
    }

    fn conveyor_roller(k: u32, travel: f32) -> Mat4 {
        let angle = (travel / (ROLLER_DIAMETER * 0.5)).rem_euclid(TAU);
        roller(
            Vec3::new(Self::roller_x(k), CONVEYOR_HEIGHT, 0.0),
            0.9,
            ROLLER_DIAMETER,
            angle,
        )
    }

    fn bag(travel: f32) -> Mat4 {
        placed(
            Vec3::new(
                -CONVEYOR_LENGTH * 0.5 + travel,
                CONVEYOR_HEIGHT + ROLLER_DIAMETER * 0.5,
                0.0,
            ),
            Vec3::new(0.6, 0.35, 0.45),
        )
    }
}

impl MachineClass for PackingStation {
    const NAME: &'static str = "packer";

    fn parts(&self) -> &[SubPartSpec] {
        &PARTS
    }

    fn default_cull_radius(&self) -> f32 {
        90.0
    }

    fn rest_transform(&self, part: usize, k: u32, _machine: &MachineDescriptor) -> Mat4 {
        match part {
            Self::FRAME => placed(
                Vec3::ZERO,
                Vec3::new(CONVEYOR_LENGTH + 0.3, CONVEYOR_HEIGHT - ROLLER_DIAMETER * 0.5, 1.0),
            ),
            Self::CONVEYOR_ROLLERS => Self::conveyor_roller(k, 0.0),
            Self::BAG => Self::bag(0.0),
            _ => {
                Mat4::from_translation(Vec3::new(-CONVEYOR_LENGTH * 0.5, 2.6, 0.0))
                    * Mat4::from_rotation_x(std::f32::consts::PI)
                    * Mat4::from_scale(Vec3::new(0.7, 1.0, 0.7))
            }
        }
    }

    fn animate(&self, part: usize, k: u32, machine: &MachineDescriptor, elapsed: f64) -> Mat4 {
        match part {
            Self::CONVEYOR_ROLLERS => Self::conveyor_roller(k, Self::belt_travel(machine, elapsed)),
            Self::BAG => Self::bag(Self::belt_travel(machine, elapsed)),
            _ => self.rest_transform(part, k, machine),
        }
    }
}

#[cfg(test)]
mod tests {
    use gristmill_scene::MachineStatus;

    use super::*;

    #[test]
    fn test_rollers_evenly_spaced_within_conveyor() {
        let xs: Vec<f32> = (0..CONVEYOR_ROLLERS).map(PackingStation::roller_x).collect();
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert!(xs[0] > -CONVEYOR_LENGTH * 0.5);
        assert!(xs[xs.len() - 1] < CONVEYOR_LENGTH * 0.5);
    }

    #[test]
    fn test_bag_wraps_to_start() {
        let machine = MachineDescriptor::new("packer-1", Vec3::ZERO, 0.0);
        let lap = f64::from(CONVEYOR_LENGTH / BELT_SPEED);
        let travel = PackingStation::belt_travel(&machine, lap + 1.0);
        assert!((travel - BELT_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_idle_belt_stands_still() {
        let machine =
            MachineDescriptor::new("packer-2", Vec3::ZERO, 0.0).with_status(MachineStatus::Idle);
        assert_eq!(PackingStation::belt_travel(&machine, 30.0), 0.0);
        assert_eq!(
            PackingStation.animate(PackingStation::BAG, 0, &machine, 30.0),
            PackingStation.rest_transform(PackingStation::BAG, 0, &machine)
        );
    }
}
