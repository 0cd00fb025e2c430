//! Colour helpers for per-instance variation.

/// Largest hue shift applied by [`variation_from_hash`], in turns.
pub const MAX_HUE_SHIFT: f32 = 0.03;

/// Largest lightness shift applied by [`variation_from_hash`].
pub const MAX_LIGHTNESS_SHIFT: f32 = 0.08;

/// Convert linear RGB in `[0, 1]` to `(hue, saturation, lightness)`, hue in turns.
pub fn rgb_to_hsl([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) * 0.5;
    let d = max - min;
    if d <= f32::EPSILON {
        return [0.0, 0.0, l];
    }
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    [h / 6.0, s, l]
}

pub fn hsl_to_rgb([h, s, l]: [f32; 3]) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

/// Shift `base` by `hue_shift` turns and `lightness_shift`, keeping alpha.
pub fn vary_color(base: [f32; 4], hue_shift: f32, lightness_shift: f32) -> [f32; 4] {
    let [h, s, l] = rgb_to_hsl([base[0], base[1], base[2]]);
    let [r, g, b] = hsl_to_rgb([
        (h + hue_shift).rem_euclid(1.0),
        s,
        (l + lightness_shift).clamp(0.0, 1.0),
    ]);
    [r, g, b, base[3]]
}

/// Map a hash to a `(hue_shift, lightness_shift)` pair in the variation range.
pub fn variation_from_hash(hash: u64) -> (f32, f32) {
    let unit = |bits: u64| (bits & 0xFFFF) as f32 / 65535.0 * 2.0 - 1.0;
    (
        unit(hash) * MAX_HUE_SHIFT,
        unit(hash >> 16) * MAX_LIGHTNESS_SHIFT,
    )
}
