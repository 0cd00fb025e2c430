//! Vertex and index buffer upload for machine part meshes.

use gristmill_lod::{MeshGeometry, MeshVertex};

/// Shared mesh buffers drawn once per sub-part with an instance range.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Bind vertex and index buffers to slot 0 of a render pass.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw `instance_count` copies of the mesh.
    pub fn draw_instanced(&self, render_pass: &mut wgpu::RenderPass, instance_count: u32) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..instance_count);
    }
}

/// Index data that can be either u16 or u32 format.
pub enum IndexData<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl IndexData<'_> {
    /// The wgpu index format for this data.
    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn count(&self) -> u32 {
        match self {
            IndexData::U16(data) => data.len() as u32,
            IndexData::U32(data) => data.len() as u32,
        }
    }

    /// Raw bytes for buffer creation.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(data) => bytemuck::cast_slice(data),
            IndexData::U32(data) => bytemuck::cast_slice(data),
        }
    }
}

/// Vertex buffer layout for [`MeshVertex`]: position at location 0, normal at 1.
pub fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    use wgpu::{VertexAttribute, VertexFormat};

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: VertexFormat::Float32x3,
            },
            VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: VertexFormat::Float32x3,
            },
        ],
    }
}

/// GPU buffer allocator for mesh uploads.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Upload a procedural part mesh, narrowing indices to u16 when they fit.
    pub fn create_geometry(&self, label: &str, geometry: &MeshGeometry) -> MeshBuffer {
        let vertices = bytemuck::cast_slice(&geometry.vertices);
        if geometry.vertices.len() <= u16::MAX as usize {
            let narrow: Vec<u16> = geometry.indices.iter().map(|&i| i as u16).collect();
            self.create_mesh(label, vertices, IndexData::U16(&narrow))
        } else {
            self.create_mesh(label, vertices, IndexData::U32(&geometry.indices))
        }
    }

    /// Create a mesh buffer from raw vertex bytes and index data.
    pub fn create_mesh(&self, label: &str, vertices: &[u8], indices: IndexData) -> MeshBuffer {
        let vertex_buffer = self.create_buffer(
            &format!("{label}-vertices"),
            vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = self.create_buffer(
            &format!("{label}-indices"),
            indices.as_bytes(),
            wgpu::BufferUsages::INDEX,
        );
        log::debug!(
            "Uploaded mesh '{}': {} vertex bytes, {} indices",
            label,
            vertices.len(),
            indices.count()
        );

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: indices.count(),
            index_format: indices.format(),
        }
    }

    fn create_buffer(&self, label: &str, data: &[u8], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_device_queue;

    #[test]
    fn test_u16_vs_u32_format_selection() {
        let u16_data = IndexData::U16(&[0, 1, 2]);
        let u32_data = IndexData::U32(&[0, 1, 2]);

        assert_eq!(u16_data.format(), wgpu::IndexFormat::Uint16);
        assert_eq!(u32_data.format(), wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn test_index_data_as_bytes() {
        assert_eq!(IndexData::U16(&[0, 1, 2]).as_bytes().len(), 6);
        assert_eq!(IndexData::U32(&[0, 1, 2]).as_bytes().len(), 12);
    }

    #[test]
    fn test_mesh_vertex_layout() {
        let layout = mesh_vertex_layout();
        // position (f32×3) + normal (f32×3)
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[test]
    fn test_geometry_upload_uses_u16_indices() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let cylinder = MeshGeometry::cylinder(16);

        let mesh = allocator.create_geometry("mill-roller", &cylinder);

        assert_eq!(mesh.index_count as usize, cylinder.indices.len());
        assert_eq!(mesh.index_format, wgpu::IndexFormat::Uint16);
    }

    #[test]
    fn test_empty_mesh_creates_zero_index_count() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);

        let mesh = allocator.create_mesh("empty", &[], IndexData::U16(&[]));

        assert_eq!(mesh.index_count, 0);
    }
}
