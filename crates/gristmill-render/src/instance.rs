//! Per-instance data for shared part meshes.
//!
//! Each sub-part of a machine class owns one [`InstanceBuffer`] sized
//! `machine_count * parts_per_machine`. The CPU mirror is written in place
//! every throttled frame and uploaded by [`crate::GpuInstanceBuffer`] only
//! when it has been marked dirty.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// GPU layout of one instance slot: a column-major model matrix and a
/// linear RGBA colour.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(InstanceRaw, [u8; 80]);

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x4,
    ];

    pub fn new(transform: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
            color,
        }
    }

    /// Vertex buffer layout, stepped per instance. Matrix columns occupy
    /// locations 5-8, colour location 9.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Whether the slot has been collapsed to a point by culling.
    pub fn is_zero_scaled(&self) -> bool {
        let m = self.transform();
        m.x_axis.truncate() == Vec3::ZERO
            && m.y_axis.truncate() == Vec3::ZERO
            && m.z_axis.truncate() == Vec3::ZERO
    }
}

/// Transform that collapses a slot to a point at `position`.
///
/// The slot stays in the buffer; it just rasterises nothing.
pub fn zero_scale_at(position: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::ZERO, glam::Quat::IDENTITY, position)
}

/// CPU mirror of one sub-part's instance buffer.
#[derive(Clone, Debug, Default)]
pub struct InstanceBuffer {
    label: String,
    slots: Vec<InstanceRaw>,
    version: u64,
    uploaded_version: u64,
}

impl InstanceBuffer {
    /// Buffer with `len` slots at identity transform and white colour.
    pub fn new(label: impl Into<String>, len: usize) -> Self {
        Self {
            label: label.into(),
            slots: vec![InstanceRaw::new(Mat4::IDENTITY, [1.0; 4]); len],
            version: 0,
            uploaded_version: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resize to `len` slots. New slots start at identity; the buffer is
    /// marked dirty when the length changes.
    pub fn resize(&mut self, len: usize) {
        if len != self.slots.len() {
            self.slots
                .resize(len, InstanceRaw::new(Mat4::IDENTITY, [1.0; 4]));
            self.mark_dirty();
        }
    }

    /// Write slot `index`'s transform. Out-of-range writes are ignored and
    /// return false.
    pub fn set_transform(&mut self, index: usize, transform: Mat4) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.model = transform.to_cols_array_2d();
                true
            }
            None => false,
        }
    }

    pub fn set_color(&mut self, index: usize, color: [f32; 4]) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.color = color;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&InstanceRaw> {
        self.slots.get(index)
    }

    pub fn transform(&self, index: usize) -> Option<Mat4> {
        self.slots.get(index).map(InstanceRaw::transform)
    }

    /// Flag the contents as changed since the last upload.
    pub fn mark_dirty(&mut self) {
        self.version += 1;
    }

    pub fn is_dirty(&self) -> bool {
        self.version != self.uploaded_version
    }

    /// Number of times the buffer has been marked dirty.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.is_dirty();
        self.uploaded_version = self.version;
        dirty
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        let layout = InstanceRaw::layout();
        assert_eq!(layout.array_stride, 80);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        let locations: Vec<u32> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![5, 6, 7, 8, 9]);
        assert_eq!(layout.attributes[4].offset, 64);
    }

    #[test]
    fn test_zero_scale_keeps_position() {
        let raw = InstanceRaw::new(zero_scale_at(Vec3::new(3.0, 0.0, -2.0)), [1.0; 4]);
        assert!(raw.is_zero_scaled());
        assert_eq!(
            raw.transform().w_axis.truncate(),
            Vec3::new(3.0, 0.0, -2.0)
        );
        assert!(!InstanceRaw::new(Mat4::IDENTITY, [1.0; 4]).is_zero_scaled());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut buffer = InstanceBuffer::new("silo-shell", 4);
        assert!(!buffer.is_dirty());

        buffer.set_transform(2, Mat4::from_translation(Vec3::X));
        buffer.mark_dirty();
        assert!(buffer.is_dirty());
        assert_eq!(buffer.version(), 1);

        assert!(buffer.take_dirty());
        assert!(!buffer.is_dirty());
        assert!(!buffer.take_dirty());
    }

    #[test]
    fn test_out_of_range_write_is_ignored() {
        let mut buffer = InstanceBuffer::new("mill-roller", 2);
        assert!(!buffer.set_transform(2, Mat4::IDENTITY));
        assert!(!buffer.set_color(5, [0.0; 4]));
        assert!(buffer.transform(2).is_none());
    }

    #[test]
    fn test_resize_marks_dirty_only_on_change() {
        let mut buffer = InstanceBuffer::new("sifter-box", 3);
        buffer.resize(3);
        assert!(!buffer.is_dirty());
        buffer.resize(6);
        assert_eq!(buffer.len(), 6);
        assert!(buffer.is_dirty());
        assert_eq!(buffer.as_bytes().len(), 6 * 80);
    }
}
