use image::{Rgba, RgbaImage};

use crate::{
    color::hsv::{Hsv, hsv_to_rgb, rgb_to_hsv, wrap_hue},
    foundation::error::{HueloopError, HueloopResult},
};

/// Zero green and blue, then round-trip the pixel through HSV. Alpha is untouched.
pub fn isolate_red_px(px: Rgba<u8>) -> Rgba<u8> {
    let [r, _, _, a] = px.0;
    let hsv = rgb_to_hsv(f64::from(r), 0.0, 0.0);
    let [r, g, b] = hsv_to_rgb(hsv);
    Rgba([sample_to_u8(r), sample_to_u8(g), sample_to_u8(b), a])
}

/// Replace the pixel's hue with `hue`, scale its value by `factor` and keep its saturation.
///
/// `hue` is wrapped into `[0, 1)` first. Alpha is untouched.
pub fn shift_hue_px(px: Rgba<u8>, hue: f64, factor: f64) -> Rgba<u8> {
    let [r, g, b, a] = px.0;
    let Hsv { s, v, .. } = rgb_to_hsv(f64::from(r), f64::from(g), f64::from(b));
    let [r, g, b] = hsv_to_rgb(Hsv {
        h: wrap_hue(hue),
        s,
        v: v * factor,
    });
    Rgba([sample_to_u8(r), sample_to_u8(g), sample_to_u8(b), a])
}

/// Apply [`isolate_red_px`] to every pixel of `src`.
pub fn isolate_red(src: &RgbaImage) -> RgbaImage {
    map_pixels(src, isolate_red_px)
}

/// Apply [`shift_hue_px`] to every pixel of `src`.
///
/// `factor` must be finite and `>= 0`; `hue` must be finite.
pub fn shift_hue_and_scale_brightness(
    src: &RgbaImage,
    hue: f64,
    factor: f64,
) -> HueloopResult<RgbaImage> {
    validate_params(hue, factor)?;
    Ok(map_pixels(src, |px| shift_hue_px(px, hue, factor)))
}

pub(crate) fn validate_params(hue: f64, factor: f64) -> HueloopResult<()> {
    if !hue.is_finite() {
        return Err(HueloopError::validation(format!(
            "hue must be finite, got {hue}"
        )));
    }
    if !factor.is_finite() || factor < 0.0 {
        return Err(HueloopError::validation(format!(
            "brightness factor must be finite and >= 0, got {factor}"
        )));
    }
    Ok(())
}

fn map_pixels(src: &RgbaImage, f: impl Fn(Rgba<u8>) -> Rgba<u8>) -> RgbaImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        *px = f(*px);
    }
    out
}

/// Convert a computed channel back to 8-bit storage: clamp to `[0, 255]`, truncate toward zero.
pub(crate) fn sample_to_u8(x: f64) -> u8 {
    // `as` saturates and maps NaN to 0.
    x.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/color/transform.rs"]
mod tests;
