//! Color-space math and raster transforms.

/// Scalar RGB↔HSV conversion.
pub mod hsv;
/// Per-pixel transforms lifted over RGBA rasters.
pub mod transform;
