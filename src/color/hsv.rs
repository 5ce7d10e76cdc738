//! RGB↔HSV conversion with the classic `colorsys` semantics.
//!
//! Hue and saturation are in `[0, 1]`. Value is `max(r, g, b)` and therefore carries whatever
//! unit the channels use: the pipeline feeds 8-bit samples as `0.0..=255.0`, but channels in
//! `0.0..=1.0` work the same way.

/// A color in hue/saturation/value form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// Hue as a fraction of a full turn.
    pub h: f64,
    /// Saturation in `[0, 1]`.
    pub s: f64,
    /// Value, in channel units.
    pub v: f64,
}

/// Convert RGB channels to HSV.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if minc == maxc {
        return Hsv { h: 0.0, s: 0.0, v };
    }

    let range = maxc - minc;
    let s = range / maxc;
    let rc = (maxc - r) / range;
    let gc = (maxc - g) / range;
    let bc = (maxc - b) / range;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Hsv {
        h: (h / 6.0).rem_euclid(1.0),
        s,
        v,
    }
}

/// Convert HSV back to RGB channels.
///
/// Hue outside `[0, 1)` lands in the sector `floor(h * 6) mod 6`, so whole turns are ignored.
pub fn hsv_to_rgb(hsv: Hsv) -> [f64; 3] {
    let Hsv { h, s, v } = hsv;
    if s == 0.0 {
        return [v, v, v];
    }

    let scaled = h * 6.0;
    let i = scaled.trunc();
    let f = scaled - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (i as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Wrap a hue into `[0, 1)`.
pub fn wrap_hue(h: f64) -> f64 {
    let w = h.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

#[cfg(test)]
#[path = "../../tests/unit/color/hsv.rs"]
mod tests;
