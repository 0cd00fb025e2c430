//! The machine classes drawn by the factory scene.
//!
//! Part transforms are in machine space: origin at the footprint center,
//! +Y up, unit shapes scaled into place. The renderer composes them with
//! each machine's position and yaw.

mod mill;
mod packer;
mod sifter;
mod silo;

use glam::{Mat4, Quat, Vec3};
use gristmill_scene::MachineDescriptor;

use crate::layout::SubPartSpec;

pub use mill::RollerMill;
pub use packer::PackingStation;
pub use sifter::PlanSifter;
pub use silo::StorageSilo;

/// A homogeneous population of machines drawn through shared instance buffers.
pub trait MachineClass {
    /// Label used for buffers and logs.
    const NAME: &'static str;

    /// Sub-part table, in buffer order.
    fn parts(&self) -> &[SubPartSpec];

    /// Distance beyond which dynamic parts are zero-scaled.
    fn default_cull_radius(&self) -> f32;

    /// Machine-space transform of copy `k` of `part` at rest.
    fn rest_transform(&self, part: usize, k: u32, machine: &MachineDescriptor) -> Mat4;

    /// Machine-space transform of a dynamic part at `elapsed` seconds.
    ///
    /// Static parts never reach this; the default keeps the rest pose.
    fn animate(&self, part: usize, k: u32, machine: &MachineDescriptor, elapsed: f64) -> Mat4 {
        let _ = elapsed;
        self.rest_transform(part, k, machine)
    }
}

/// World transform of a machine's footprint.
pub fn machine_transform(machine: &MachineDescriptor) -> Mat4 {
    Mat4::from_rotation_translation(Quat::from_rotation_y(machine.rotation), machine.position)
}

/// Unit shape scaled to `size` with its base centered at `base`.
pub(crate) fn placed(base: Vec3, size: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(size, Quat::IDENTITY, base)
}

/// Unit cylinder lying along X, centered at `center`, rolled by `angle`.
pub(crate) fn roller(center: Vec3, length: f32, diameter: f32, angle: f32) -> Mat4 {
    // Lay the Y-up cylinder along +X, spin it about its own axis, then
    // shift so the unit shape's base-center origin ends up at `center`.
    Mat4::from_translation(center)
        * Mat4::from_rotation_x(angle)
        * Mat4::from_rotation_z(-std::f32::consts::FRAC_PI_2)
        * Mat4::from_scale(Vec3::new(diameter, length, diameter))
        * Mat4::from_translation(Vec3::new(0.0, -0.5, 0.0))
}

/// Sinusoidal shake from the machine's vibration reading.
pub(crate) fn vibration_offset(machine: &MachineDescriptor, elapsed: f64, seed: u32) -> Vec3 {
    if !machine.status.is_operating() || machine.metrics.vibration <= 0.0 {
        return Vec3::ZERO;
    }
    // mm/s RMS reading to a visible world-space amplitude.
    let amplitude = (machine.metrics.vibration * 0.004).min(0.05);
    let t = elapsed * 47.0 + f64::from(seed) * 1.7;
    Vec3::new(t.sin() as f32, 0.0, (t * 1.3).cos() as f32) * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roller_lies_along_x() {
        let m = roller(Vec3::new(0.0, 2.0, 0.0), 3.0, 0.5, 0.0);
        let left = m.transform_point3(Vec3::new(0.0, 0.0, 0.0));
        let right = m.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!((left - Vec3::new(-1.5, 2.0, 0.0)).length() < 1e-5);
        assert!((right - Vec3::new(1.5, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_roller_spin_keeps_axis() {
        let still = roller(Vec3::Y, 2.0, 1.0, 0.0);
        let spun = roller(Vec3::Y, 2.0, 1.0, 1.2);
        let end = Vec3::new(0.0, 1.0, 0.0);
        assert!((still.transform_point3(end) - spun.transform_point3(end)).length() < 1e-5);
    }

    #[test]
    fn test_idle_machine_does_not_vibrate() {
        let mut machine = MachineDescriptor::new("m", Vec3::ZERO, 0.0)
            .with_status(gristmill_scene::MachineStatus::Idle);
        machine.metrics.vibration = 9.0;
        assert_eq!(vibration_offset(&machine, 3.0, 0), Vec3::ZERO);
    }
}
