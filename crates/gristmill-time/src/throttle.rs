//! Per-category frame throttle.
//!
//! Each category keeps its own running counter, so a quarter-rate category
//! fires on every fourth call *for that category* regardless of how many
//! other categories share the throttle.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Named update frequencies used across the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateTier {
    /// Motion-critical: cloud drift, sun/moon position, water waves, rollers.
    Smooth,
    /// Half rate: particles, star twinkle, light blink.
    Medium,
    /// Third rate: slow mechanical motion.
    Slow,
    /// Quarter rate: colour and lighting state (windows, mountain tint).
    Ambient,
}

impl UpdateTier {
    /// Frame divisor for this tier.
    pub fn divisor(self) -> u32 {
        match self {
            UpdateTier::Smooth => 1,
            UpdateTier::Medium => 2,
            UpdateTier::Slow => 3,
            UpdateTier::Ambient => 4,
        }
    }
}

/// Modulo-counter throttle keyed by category.
#[derive(Clone, Debug)]
pub struct FrameThrottle<K> {
    counters: FxHashMap<K, u64>,
}

impl<K: Copy + Eq + Hash> Default for FrameThrottle<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> FrameThrottle<K> {
    /// Creates a throttle with no counters yet.
    pub fn new() -> Self {
        Self {
            counters: FxHashMap::default(),
        }
    }

    /// Returns true on roughly `1 / divisor` of calls for `key`.
    ///
    /// The first call for a key always returns true. A divisor of zero is
    /// treated as one.
    pub fn should_run(&mut self, key: K, divisor: u32) -> bool {
        let divisor = u64::from(divisor.max(1));
        let counter = self.counters.entry(key).or_insert(0);
        let run = *counter % divisor == 0;
        *counter = counter.wrapping_add(1);
        run
    }

    /// Number of times `key` has been queried.
    pub fn calls(&self, key: K) -> u64 {
        self.counters.get(&key).copied().unwrap_or(0)
    }

    /// Restart the counter for `key` so its next query fires.
    pub fn reset(&mut self, key: K) {
        self.counters.remove(&key);
    }
}
