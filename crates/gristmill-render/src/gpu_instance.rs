//! GPU side of an [`InstanceBuffer`].

use crate::instance::{InstanceBuffer, InstanceRaw};

const INSTANCE_STRIDE: u64 = std::mem::size_of::<InstanceRaw>() as u64;

/// Vertex buffer mirroring one [`InstanceBuffer`], regrown on demand.
pub struct GpuInstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    uploads: u64,
}

impl GpuInstanceBuffer {
    /// Allocate room for `capacity` instances (at least one).
    pub fn new(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Self::allocate(device, label, capacity),
            capacity,
            uploads: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64 * INSTANCE_STRIDE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of uploads performed so far.
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Upload `instances` if it changed since the last sync.
    ///
    /// Returns true when a write was queued.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &mut InstanceBuffer,
    ) -> bool {
        if !instances.take_dirty() || instances.is_empty() {
            return false;
        }
        if instances.len() > self.capacity {
            let capacity = instances.len().next_power_of_two();
            log::debug!(
                "Growing instance buffer '{}' from {} to {} slots",
                instances.label(),
                self.capacity,
                capacity
            );
            self.buffer = Self::allocate(device, instances.label(), capacity);
            self.capacity = capacity;
        }
        queue.write_buffer(&self.buffer, 0, instances.as_bytes());
        self.uploads += 1;
        true
    }

    /// Bind as the per-instance vertex stream at `slot`.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, slot: u32) {
        render_pass.set_vertex_buffer(slot, self.buffer.slice(..));
    }
}
