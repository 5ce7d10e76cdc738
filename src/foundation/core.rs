use crate::foundation::error::{HueloopError, HueloopResult};

/// Absolute 0-based frame index in animation timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> HueloopResult<Self> {
        if start.0 > end.0 {
            return Err(HueloopError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Iterate the frame indices of the range in increasing order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> HueloopResult<Self> {
        if den == 0 {
            return Err(HueloopError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(HueloopError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole frames per second.
    pub fn integer(frames_per_sec: u32) -> HueloopResult<Self> {
        Self::new(frames_per_sec, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert a frame count to seconds.
    ///
    /// Computed as `frames * den / num` so integer rates divide exactly like `i / fps`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Display time of one frame, `den / num` seconds, reduced to lowest terms.
    ///
    /// Fails when the reduced fraction does not fit the 16-bit fields of an APNG frame header.
    pub fn frame_delay(self) -> HueloopResult<FrameDelay> {
        let g = gcd(self.den, self.num);
        let (num, den) = (self.den / g, self.num / g);
        match (u16::try_from(num), u16::try_from(den)) {
            (Ok(num), Ok(den)) => Ok(FrameDelay { num, den }),
            _ => Err(HueloopError::config(format!(
                "frame delay {num}/{den}s does not fit in 16-bit numerator and denominator"
            ))),
        }
    }
}

/// Per-frame display time as an exact fraction of a second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameDelay {
    /// Numerator (seconds).
    pub num: u16,
    /// Denominator, non-zero.
    pub den: u16,
}

impl FrameDelay {
    /// Delay in seconds.
    pub fn as_secs_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Delay in milliseconds.
    pub fn as_millis_f64(self) -> f64 {
        self.as_secs_f64() * 1000.0
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Dimensions of an RGBA raster.
    pub fn of(image: &image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
