//! Quality-tier geometry selection with a shared mesh cache.

use std::sync::Arc;

use gristmill_scene::QualityTier;
use rustc_hash::FxHashMap;

use crate::geometry::{MeshGeometry, UnitShape};

/// Shared, immutable mesh handle.
///
/// Cloning is a reference-count bump; every instance of a machine class
/// renders from the same handle.
#[derive(Clone, Debug)]
pub struct GeometryHandle(Arc<MeshGeometry>);

impl GeometryHandle {
    /// The underlying mesh.
    pub fn mesh(&self) -> &MeshGeometry {
        &self.0
    }

    /// Whether two handles point at the same cached mesh.
    pub fn same_mesh(&self, other: &GeometryHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// One geometry handle per sub-part, chosen for a single tier.
#[derive(Clone, Debug)]
pub struct GeometrySet {
    tier: QualityTier,
    handles: Vec<GeometryHandle>,
}

impl GeometrySet {
    /// Tier the set was built for.
    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    /// Handle for sub-part `part`.
    pub fn get(&self, part: usize) -> Option<&GeometryHandle> {
        self.handles.get(part)
    }

    /// All handles in sub-part order.
    pub fn handles(&self) -> &[GeometryHandle] {
        &self.handles
    }

    /// Total triangles drawn for one machine, given its per-part instance counts.
    pub fn triangles_per_machine(&self, parts_per_machine: &[u32]) -> usize {
        self.handles
            .iter()
            .zip(parts_per_machine)
            .map(|(h, &n)| h.mesh().triangle_count() * n as usize)
            .sum()
    }
}

/// Tessellates each `(shape, tier)` once and hands out shared handles.
#[derive(Default)]
pub struct LodGeometrySelector {
    cache: FxHashMap<(UnitShape, QualityTier), GeometryHandle>,
    meshes_built: u64,
}

impl LodGeometrySelector {
    /// Creates an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `shape` at `tier`, tessellating on first request.
    pub fn geometry(&mut self, shape: UnitShape, tier: QualityTier) -> GeometryHandle {
        if let Some(handle) = self.cache.get(&(shape, tier)) {
            return handle.clone();
        }
        let mesh = shape.build(tier);
        log::debug!(
            "Tessellated {:?} for {} tier: {} triangles",
            shape,
            tier,
            mesh.triangle_count()
        );
        let handle = GeometryHandle(Arc::new(mesh));
        self.cache.insert((shape, tier), handle.clone());
        self.meshes_built += 1;
        handle
    }

    /// Geometry for a list of sub-part shapes at `tier`.
    pub fn select(&mut self, tier: QualityTier, shapes: &[UnitShape]) -> GeometrySet {
        let handles = shapes
            .iter()
            .map(|&shape| self.geometry(shape, tier))
            .collect();
        GeometrySet { tier, handles }
    }

    /// Re-select only if `current` was built for a different tier.
    ///
    /// Returns true when `current` was replaced.
    pub fn reselect(
        &mut self,
        current: &mut Option<GeometrySet>,
        tier: QualityTier,
        shapes: &[UnitShape],
    ) -> bool {
        if current.as_ref().is_some_and(|set| set.tier == tier) {
            return false;
        }
        *current = Some(self.select(tier, shapes));
        true
    }

    /// Number of meshes tessellated so far.
    pub fn meshes_built(&self) -> u64 {
        self.meshes_built
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: [UnitShape; 4] = [
        UnitShape::Cuboid,
        UnitShape::Cylinder,
        UnitShape::Cylinder,
        UnitShape::Cone,
    ];

    #[test]
    fn test_repeated_requests_share_one_mesh() {
        let mut selector = LodGeometrySelector::new();
        let a = selector.geometry(UnitShape::Cylinder, QualityTier::Medium);
        let b = selector.geometry(UnitShape::Cylinder, QualityTier::Medium);
        assert!(a.same_mesh(&b));
        assert_eq!(selector.meshes_built(), 1);
    }

    #[test]
    fn test_parts_with_same_shape_share_handles() {
        let mut selector = LodGeometrySelector::new();
        let set = selector.select(QualityTier::High, &SHAPES);
        assert_eq!(set.handles().len(), 4);
        assert!(set.handles()[1].same_mesh(&set.handles()[2]));
        assert_eq!(selector.meshes_built(), 3);
    }

    #[test]
    fn test_tiers_produce_distinct_meshes() {
        let mut selector = LodGeometrySelector::new();
        let low = selector.geometry(UnitShape::Cone, QualityTier::Low);
        let high = selector.geometry(UnitShape::Cone, QualityTier::High);
        assert!(!low.same_mesh(&high));
        assert!(low.mesh().triangle_count() < high.mesh().triangle_count());
    }

    #[test]
    fn test_reselect_only_on_tier_change() {
        let mut selector = LodGeometrySelector::new();
        let mut current = None;

        assert!(selector.reselect(&mut current, QualityTier::Medium, &SHAPES));
        let built = selector.meshes_built();
        assert!(!selector.reselect(&mut current, QualityTier::Medium, &SHAPES));
        assert_eq!(selector.meshes_built(), built);

        assert!(selector.reselect(&mut current, QualityTier::Low, &SHAPES));
        assert_eq!(current.as_ref().unwrap().tier(), QualityTier::Low);

        // Returning to a cached tier swaps handles without tessellating again.
        let built = selector.meshes_built();
        assert!(selector.reselect(&mut current, QualityTier::Medium, &SHAPES));
        assert_eq!(selector.meshes_built(), built);
    }

    #[test]
    fn test_triangles_per_machine() {
        let mut selector = LodGeometrySelector::new();
        let set = selector.select(QualityTier::Low, &[UnitShape::Cuboid, UnitShape::Cylinder]);
        // 1 box (12 tris) + 2 cylinders at 8 segments (32 tris each).
        assert_eq!(set.triangles_per_machine(&[1, 2]), 12 + 64);
    }
}
