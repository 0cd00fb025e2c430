//! Keyframe tables over the cyclic 24-hour domain.
//!
//! A [`KeyframeTable`] maps an hour of day to an interpolated value by
//! finding the bracketing pair of keyframes and blending linearly. The last
//! keyframe blends into the first one across midnight.

use crate::sim_time::{HOURS_PER_DAY, wrap_hour};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Clone {
    /// Blend from `self` (t = 0) to `other` (t = 1).
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// 8-bit sRGB-encoded colour, interpolated per channel in integer space.
///
/// Blending happens directly on the stored 0-255 values with rounding; no
/// conversion to a perceptual or linear space takes place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Build from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Channels scaled to `[0, 1]` for upload into a shader parameter block.
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let a = f32::from(a);
    let b = f32::from(b);
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

impl Lerp for Rgb8 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }
}

/// Errors detected when building a [`KeyframeTable`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KeyframeError {
    /// A table needs at least one keyframe to cover the day.
    #[error("keyframe table is empty")]
    Empty,

    /// A keyframe hour is NaN or infinite.
    #[error("keyframe {index} has a non-finite hour")]
    NonFinite { index: usize },

    /// A keyframe hour lies outside `[0, 24)`.
    #[error("keyframe {index} at hour {hour} is outside [0, 24)")]
    OutOfRange { index: usize, hour: f64 },

    /// Hours must be strictly increasing.
    #[error("keyframe {index} at hour {hour} does not follow previous hour {previous}")]
    NotIncreasing {
        index: usize,
        hour: f64,
        previous: f64,
    },
}

/// One `(hour, value)` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    pub hour: f64,
    pub value: T,
}

/// Bracketing pair found for a query hour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket {
    /// Index of the keyframe at or before the query.
    pub from: usize,
    /// Index of the keyframe after the query (0 for the wrap pair).
    pub to: usize,
    /// Blend factor in `[0, 1)`.
    pub factor: f64,
}

/// Sorted keyframes covering the whole day.
#[derive(Clone, Debug)]
pub struct KeyframeTable<T> {
    frames: Vec<Keyframe<T>>,
}

impl<T: Lerp> KeyframeTable<T> {
    /// Validate and build a table.
    ///
    /// Hours must be finite, within `[0, 24)` and strictly increasing. Any
    /// non-empty table that passes is total: hours after the last keyframe
    /// and before the first fall into the wrap pair.
    pub fn new(entries: Vec<(f64, T)>) -> Result<Self, KeyframeError> {
        if entries.is_empty() {
            return Err(KeyframeError::Empty);
        }

        let mut previous: Option<f64> = None;
        for (index, (hour, _)) in entries.iter().enumerate() {
            let hour = *hour;
            if !hour.is_finite() {
                return Err(KeyframeError::NonFinite { index });
            }
            if !(0.0..HOURS_PER_DAY).contains(&hour) {
                return Err(KeyframeError::OutOfRange { index, hour });
            }
            if let Some(previous) = previous
                && hour <= previous
            {
                return Err(KeyframeError::NotIncreasing {
                    index,
                    hour,
                    previous,
                });
            }
            previous = Some(hour);
        }

        let frames = entries
            .into_iter()
            .map(|(hour, value)| Keyframe { hour, value })
            .collect();
        Ok(Self { frames })
    }

    /// Build from keyframes already known to satisfy the table invariants.
    pub(crate) fn from_keyframes(frames: Vec<Keyframe<T>>) -> Self {
        debug_assert!(!frames.is_empty());
        debug_assert!(frames.windows(2).all(|w| w[0].hour < w[1].hour));
        Self { frames }
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Keyframes in hour order.
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.frames
    }

    /// Find the bracketing pair and blend factor for `hour`.
    pub fn bracket(&self, hour: f64) -> Bracket {
        let hour = wrap_hour(hour);
        let n = self.frames.len();
        let last = n - 1;
        let first_hour = self.frames[0].hour;

        // Index of the first keyframe strictly after `hour`.
        let after = self.frames.partition_point(|k| k.hour <= hour);

        let (from, to, t0, t1, h) = if after == 0 {
            // Before the first keyframe: inside the wrap pair, shifted by a day.
            (
                last,
                0,
                self.frames[last].hour,
                first_hour + HOURS_PER_DAY,
                hour + HOURS_PER_DAY,
            )
        } else if after == n {
            (
                last,
                0,
                self.frames[last].hour,
                first_hour + HOURS_PER_DAY,
                hour,
            )
        } else {
            (
                after - 1,
                after,
                self.frames[after - 1].hour,
                self.frames[after].hour,
                hour,
            )
        };

        let span = t1 - t0;
        let factor = if span > 0.0 {
            ((h - t0) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        // Rounding can land exactly on 1.0 just below t1; keep the range half-open.
        let factor = if factor >= 1.0 {
            1.0 - f64::EPSILON
        } else {
            factor
        };

        Bracket { from, to, factor }
    }

    /// Interpolated value at `hour`.
    pub fn sample(&self, hour: f64) -> T {
        let bracket = self.bracket(hour);
        let v0 = &self.frames[bracket.from].value;
        if bracket.factor == 0.0 {
            return v0.clone();
        }
        v0.lerp(&self.frames[bracket.to].value, bracket.factor as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb8 = Rgb8::new(255, 0, 0);
    const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

    fn red_blue() -> KeyframeTable<Rgb8> {
        KeyframeTable::new(vec![(6.0, RED), (8.0, BLUE)]).unwrap()
    }

    #[test]
    fn test_midpoint_blends_half_and_half() {
        let table = red_blue();
        assert_eq!(table.sample(7.0), Rgb8::new(128, 0, 128));
    }

    #[test]
    fn test_exact_keyframe_hours_return_keyframe_values() {
        let table = red_blue();
        assert_eq!(table.sample(6.0), RED);
        assert_eq!(table.sample(8.0), BLUE);
    }

    #[test]
    fn test_approaching_next_keyframe_converges() {
        let table = red_blue();
        let c = table.sample(8.0 - 1e-9);
        assert_eq!(c, BLUE);
    }

    #[test]
    fn test_wrap_pair_covers_midnight() {
        // 8:00 -> 6:00 next day is a 22 hour span; midnight is 16/22 through it.
        let table = red_blue();
        let b = table.bracket(0.0);
        assert_eq!((b.from, b.to), (1, 0));
        assert!((b.factor - 16.0 / 22.0).abs() < 1e-12);

        let late = table.bracket(23.0);
        assert_eq!((late.from, late.to), (1, 0));
        assert!((late.factor - 15.0 / 22.0).abs() < 1e-12);

        let early = table.bracket(5.0);
        assert!((early.factor - 21.0 / 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_factor_is_half_open_for_all_hours() {
        let table = red_blue();
        let mut h = 0.0;
        while h < 24.0 {
            let b = table.bracket(h);
            assert!((0.0..1.0).contains(&b.factor), "h={h} factor={}", b.factor);
            h += 0.01;
        }
    }

    #[test]
    fn test_values_stay_between_brackets() {
        let table = KeyframeTable::new(vec![
            (0.0, 10.0f32),
            (6.0, 40.0),
            (12.0, 100.0),
            (18.0, 30.0),
        ])
        .unwrap();
        let mut h = 0.0;
        while h < 24.0 {
            let b = table.bracket(h);
            let lo = table.keyframes()[b.from].value.min(table.keyframes()[b.to].value);
            let hi = table.keyframes()[b.from].value.max(table.keyframes()[b.to].value);
            let v = table.sample(h);
            assert!(v >= lo - 1e-4 && v <= hi + 1e-4, "h={h} v={v} not in [{lo}, {hi}]");
            h += 0.05;
        }
    }

    #[test]
    fn test_single_keyframe_is_constant() {
        let table = KeyframeTable::new(vec![(12.0, 0.5f32)]).unwrap();
        for h in [0.0, 3.5, 12.0, 23.99] {
            assert_eq!(table.sample(h), 0.5);
        }
    }

    #[test]
    fn test_query_outside_day_is_wrapped() {
        let table = red_blue();
        assert_eq!(table.sample(31.0), table.sample(7.0));
        assert_eq!(table.sample(-17.0), table.sample(7.0));
    }

    #[test]
    fn test_construction_rejects_invalid_tables() {
        assert_eq!(
            KeyframeTable::<f32>::new(vec![]).unwrap_err(),
            KeyframeError::Empty
        );
        assert!(matches!(
            KeyframeTable::new(vec![(6.0, 1.0f32), (6.0, 2.0)]),
            Err(KeyframeError::NotIncreasing { index: 1, .. })
        ));
        assert!(matches!(
            KeyframeTable::new(vec![(8.0, 1.0f32), (6.0, 2.0)]),
            Err(KeyframeError::NotIncreasing { .. })
        ));
        assert!(matches!(
            KeyframeTable::new(vec![(24.0, 1.0f32)]),
            Err(KeyframeError::OutOfRange { .. })
        ));
        assert!(matches!(
            KeyframeTable::new(vec![(-0.5, 1.0f32)]),
            Err(KeyframeError::OutOfRange { .. })
        ));
        assert!(matches!(
            KeyframeTable::new(vec![(f64::NAN, 1.0f32)]),
            Err(KeyframeError::NonFinite { index: 0 })
        ));
    }

    #[test]
    fn test_rgb_lerp_rounds_per_channel() {
        let a = Rgb8::new(0, 10, 200);
        let b = Rgb8::new(3, 11, 100);
        assert_eq!(a.lerp(&b, 0.5), Rgb8::new(2, 11, 150));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb8::from_hex(0x336699), Rgb8::new(0x33, 0x66, 0x99));
        assert_eq!(Rgb8::new(255, 0, 51).to_unit(), [1.0, 0.0, 0.2]);
    }
}
