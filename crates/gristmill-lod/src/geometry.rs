//! Procedural unit shapes used by machine sub-parts.
//!
//! Every shape sits on the XZ plane with its footprint centered on the
//! origin and spans `y ∈ [0, 1]`, with a unit-diameter footprint. Instance
//! transforms scale and place them, so a silo shell is a cylinder scaled to
//! `(radius * 2, height, radius * 2)`.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use gristmill_scene::QualityTier;

/// Vertex with position and normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Unit shapes available to sub-parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitShape {
    /// Axis-aligned box.
    Cuboid,
    /// Capped cylinder.
    Cylinder,
    /// Capped cone, apex at `y = 1`.
    Cone,
    /// UV sphere.
    Sphere,
}

/// Tessellation density for a shape at a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tessellation {
    /// Subdivisions around the Y axis.
    pub segments: u32,
    /// Latitude bands (spheres only).
    pub rings: u32,
}

impl UnitShape {
    /// Tessellation used for this shape at `tier`.
    pub fn tessellation(self, tier: QualityTier) -> Tessellation {
        let (segments, rings) = match (self, tier) {
            (UnitShape::Cuboid, _) => (1, 0),
            (UnitShape::Cylinder | UnitShape::Cone, QualityTier::Low) => (8, 0),
            (UnitShape::Cylinder | UnitShape::Cone, QualityTier::Medium) => (16, 0),
            (UnitShape::Cylinder | UnitShape::Cone, QualityTier::High) => (32, 0),
            (UnitShape::Sphere, QualityTier::Low) => (8, 4),
            (UnitShape::Sphere, QualityTier::Medium) => (16, 8),
            (UnitShape::Sphere, QualityTier::High) => (32, 16),
        };
        Tessellation { segments, rings }
    }

    /// Build the mesh for this shape at `tier`.
    pub fn build(self, tier: QualityTier) -> MeshGeometry {
        let t = self.tessellation(tier);
        match self {
            UnitShape::Cuboid => MeshGeometry::cuboid(),
            UnitShape::Cylinder => MeshGeometry::cylinder(t.segments),
            UnitShape::Cone => MeshGeometry::cone(t.segments),
            UnitShape::Sphere => MeshGeometry::sphere(t.segments, t.rings),
        }
    }
}

/// CPU-side indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::new(position, normal));
        index
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Unit cube spanning `[-0.5, 0.5] x [0, 1] x [-0.5, 0.5]`.
    pub fn cuboid() -> Self {
        // (normal, u, v) with u x v = normal so corners wind counter-clockwise.
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        let center = Vec3::new(0.0, 0.5, 0.0);
        let mut mesh = Self::default();
        for (normal, u, v) in faces {
            let c = center + normal * 0.5;
            let (u, v) = (u * 0.5, v * 0.5);
            let a = mesh.push_vertex(c - u - v, normal);
            let b = mesh.push_vertex(c + u - v, normal);
            let d = mesh.push_vertex(c + u + v, normal);
            let e = mesh.push_vertex(c - u + v, normal);
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(a, d, e);
        }
        mesh
    }

    /// Capped cylinder, radius 0.5, `y ∈ [0, 1]`.
    pub fn cylinder(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::default();

        // Side: one bottom/top pair per seam position.
        let side_start = mesh.vertices.len() as u32;
        for i in 0..=segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            let normal = Vec3::new(cos, 0.0, sin);
            let rim = normal * 0.5;
            mesh.push_vertex(rim, normal);
            mesh.push_vertex(rim + Vec3::Y, normal);
        }
        for i in 0..segments {
            let b0 = side_start + i * 2;
            let t0 = b0 + 1;
            let b1 = b0 + 2;
            let t1 = b0 + 3;
            mesh.push_triangle(b0, t0, b1);
            mesh.push_triangle(b1, t0, t1);
        }

        mesh.push_cap(segments, 1.0, Vec3::Y);
        mesh.push_cap(segments, 0.0, Vec3::NEG_Y);
        mesh
    }

    /// Capped cone, base radius 0.5 at `y = 0`, apex at `y = 1`.
    pub fn cone(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::default();

        // Slope normal for a unit-height, 0.5-radius cone.
        let side_start = mesh.vertices.len() as u32;
        for i in 0..=segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            let normal = Vec3::new(cos, 0.5, sin).normalize();
            mesh.push_vertex(Vec3::new(cos, 0.0, sin) * 0.5, normal);
            mesh.push_vertex(Vec3::Y, normal);
        }
        for i in 0..segments {
            let b0 = side_start + i * 2;
            let apex = b0 + 1;
            let b1 = b0 + 2;
            mesh.push_triangle(b0, apex, b1);
        }

        mesh.push_cap(segments, 0.0, Vec3::NEG_Y);
        mesh
    }

    /// UV sphere of diameter 1 centered at `(0, 0.5, 0)`.
    pub fn sphere(segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let center = Vec3::new(0.0, 0.5, 0.0);
        let mut mesh = Self::default();

        for r in 0..=rings {
            let phi = r as f32 / rings as f32 * PI;
            for s in 0..=segments {
                let theta = s as f32 / segments as f32 * TAU;
                let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                mesh.push_vertex(center + normal * 0.5, normal);
            }
        }

        let stride = segments + 1;
        for r in 0..rings {
            for s in 0..segments {
                let upper = r * stride + s;
                let lower = upper + stride;
                mesh.push_triangle(lower, upper, lower + 1);
                mesh.push_triangle(lower + 1, upper, upper + 1);
            }
        }
        mesh
    }

    /// Flat disc at height `y` facing `normal` (±Y).
    fn push_cap(&mut self, segments: u32, y: f32, normal: Vec3) {
        let center = self.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let ring_start = self.vertices.len() as u32;
        for i in 0..=segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            self.push_vertex(Vec3::new(cos * 0.5, y, sin * 0.5), normal);
        }
        let facing_up = normal.y > 0.0;
        for i in 0..segments {
            let r0 = ring_start + i;
            let r1 = r0 + 1;
            if facing_up {
                self.push_triangle(center, r1, r0);
            } else {
                self.push_triangle(center, r0, r1);
            }
        }
    }
}
