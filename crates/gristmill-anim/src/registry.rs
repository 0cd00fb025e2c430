//! Category-keyed maps from entity id to descriptor.

use rustc_hash::FxHashMap;

use crate::category::AnimationCategory;
use crate::descriptor::AnimationDescriptor;
use crate::error::AnimationError;

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) descriptor: AnimationDescriptor,
    /// Set once the scheduler has reported this entry as stale.
    pub(crate) stale_reported: bool,
}

/// Live animated entities, one map per [`AnimationCategory`].
///
/// Every `register` must be paired with exactly one `unregister`; a
/// duplicate id replaces the previous entry.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    maps: [FxHashMap<String, Entry>; AnimationCategory::ALL.len()],
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the descriptor for `id` in `category`.
    ///
    /// Returns the replaced descriptor, if any. A descriptor of another
    /// category is rejected.
    pub fn register(
        &mut self,
        category: AnimationCategory,
        id: impl Into<String>,
        descriptor: AnimationDescriptor,
    ) -> Result<Option<AnimationDescriptor>, AnimationError> {
        let found = descriptor.category();
        if found != category {
            return Err(AnimationError::CategoryMismatch {
                expected: category,
                found,
            });
        }
        let entry = Entry {
            descriptor,
            stale_reported: false,
        };
        Ok(self.maps[category.index()]
            .insert(id.into(), entry)
            .map(|old| old.descriptor))
    }

    /// Remove `id` from `category`, returning its descriptor.
    pub fn unregister(
        &mut self,
        category: AnimationCategory,
        id: &str,
    ) -> Option<AnimationDescriptor> {
        self.maps[category.index()]
            .remove(id)
            .map(|entry| entry.descriptor)
    }

    pub fn contains(&self, category: AnimationCategory, id: &str) -> bool {
        self.maps[category.index()].contains_key(id)
    }

    pub fn get(&self, category: AnimationCategory, id: &str) -> Option<&AnimationDescriptor> {
        self.maps[category.index()]
            .get(id)
            .map(|entry| &entry.descriptor)
    }

    /// Total entries across all categories.
    pub fn len(&self) -> usize {
        self.maps.iter().map(FxHashMap::len).sum()
    }

    pub fn len_of(&self, category: AnimationCategory) -> usize {
        self.maps[category.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(FxHashMap::is_empty)
    }

    /// Drop entries whose render state has been destroyed. Returns how many
    /// were removed.
    pub fn prune_stale(&mut self) -> usize {
        let before = self.len();
        for map in &mut self.maps {
            map.retain(|_, entry| entry.descriptor.is_live());
        }
        before - self.len()
    }

    pub(crate) fn entries_mut(
        &mut self,
        category: AnimationCategory,
    ) -> impl Iterator<Item = (&String, &mut Entry)> {
        self.maps[category.index()].iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gristmill_render::{CityLightParams, SkyDomeParams, StarfieldParams};
    use gristmill_time::Rgb8;

    use super::*;
    use crate::descriptor::BlinkPattern;

    fn light() -> Rc<RefCell<CityLightParams>> {
        Rc::new(RefCell::new(CityLightParams::default()))
    }

    #[test]
    fn test_register_unregister_returns_to_zero() {
        let mut registry = AnimationRegistry::new();
        let lights: Vec<_> = (0..5).map(|_| light()).collect();
        for (i, l) in lights.iter().enumerate() {
            let descriptor =
                AnimationDescriptor::city_light(l, Rgb8::new(255, 0, 0), BlinkPattern::STEADY);
            registry
                .register(AnimationCategory::CityLights, format!("beacon-{i}"), descriptor)
                .unwrap();
        }
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.len_of(AnimationCategory::CityLights), 5);

        for i in 0..5 {
            assert!(registry
                .unregister(AnimationCategory::CityLights, &format!("beacon-{i}"))
                .is_some());
        }
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_duplicate_id_overwrites() {
        let mut registry = AnimationRegistry::new();
        let first = Rc::new(RefCell::new(StarfieldParams::default()));
        let second = Rc::new(RefCell::new(StarfieldParams::default()));

        let replaced = registry
            .register(
                AnimationCategory::Starfield,
                "stars",
                AnimationDescriptor::starfield(&first, 0.1),
            )
            .unwrap();
        assert!(replaced.is_none());

        let replaced = registry
            .register(
                AnimationCategory::Starfield,
                "stars",
                AnimationDescriptor::starfield(&second, 0.9),
            )
            .unwrap();
        assert!(matches!(
            replaced,
            Some(AnimationDescriptor::Starfield { twinkle_phase, .. }) if twinkle_phase == 0.1
        ));
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.get(AnimationCategory::Starfield, "stars"),
            Some(AnimationDescriptor::Starfield { twinkle_phase, .. }) if *twinkle_phase == 0.9
        ));
    }

    #[test]
    fn test_category_mismatch_rejected() {
        let mut registry = AnimationRegistry::new();
        let dome = Rc::new(RefCell::new(SkyDomeParams::default()));
        let result = registry.register(
            AnimationCategory::WaterSurface,
            "sky",
            AnimationDescriptor::sky_dome(&dome, 0.01),
        );
        assert_eq!(
            result.unwrap_err(),
            AnimationError::CategoryMismatch {
                expected: AnimationCategory::WaterSurface,
                found: AnimationCategory::SkyDome,
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let mut registry = AnimationRegistry::new();
        assert!(registry.unregister(AnimationCategory::SkyDome, "missing").is_none());
    }

    #[test]
    fn test_prune_stale() {
        let mut registry = AnimationRegistry::new();
        let kept = light();
        let dropped = light();
        for (id, l) in [("kept", &kept), ("dropped", &dropped)] {
            registry
                .register(
                    AnimationCategory::CityLights,
                    id,
                    AnimationDescriptor::city_light(l, Rgb8::default(), BlinkPattern::STEADY),
                )
                .unwrap();
        }
        drop(dropped);

        assert_eq!(registry.prune_stale(), 1);
        assert!(registry.contains(AnimationCategory::CityLights, "kept"));
        assert!(!registry.contains(AnimationCategory::CityLights, "dropped"));
    }
}
