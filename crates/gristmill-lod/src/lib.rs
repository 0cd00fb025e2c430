//! Quality-tier level of detail for machine geometry.
//!
//! Machine sub-parts are drawn from a handful of unit shapes. Each shape is
//! tessellated once per [`QualityTier`](gristmill_scene::QualityTier) and
//! the resulting mesh is shared by every instance of every machine class.

pub mod geometry;
mod selector;

pub use geometry::{MeshGeometry, MeshVertex, Tessellation, UnitShape};
pub use selector::{GeometryHandle, GeometrySet, LodGeometrySelector};
