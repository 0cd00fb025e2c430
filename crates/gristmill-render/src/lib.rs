//! GPU-facing state written by the render core: shared instance buffers,
//! shader parameter blocks for the animated environment, and mesh upload.

pub mod buffer;
pub mod color;
mod gpu_instance;
mod instance;
pub mod params;

pub use buffer::{BufferAllocator, IndexData, MeshBuffer, mesh_vertex_layout};
pub use color::{hsl_to_rgb, rgb_to_hsl, variation_from_hash, vary_color};
pub use gpu_instance::GpuInstanceBuffer;
pub use instance::{InstanceBuffer, InstanceRaw, zero_scale_at};
pub use params::{
    CityLightParams, DirectionalLightParams, FacadeParams, SkyDomeParams, StarfieldParams,
    TerrainLayerParams, WaterSurfaceParams,
};

/// Create a test GPU device and queue. Returns `None` if no GPU is available.
#[cfg(test)]
pub(crate) fn create_test_device_queue() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;

        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: Default::default(),
                ..Default::default()
            })
            .await
            .ok()
    })
}
