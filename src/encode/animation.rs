use std::path::Path;

use image::RgbaImage;

use crate::{
    encode::atomic::write_atomic,
    foundation::{
        core::{Canvas, FrameDelay},
        error::{HueloopError, HueloopResult},
    },
};

/// How often the animation plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Loop forever.
    #[default]
    Infinite,
    /// Play this many times, then stop on the last frame. Must be >= 1.
    Finite(u16),
}

impl LoopMode {
    /// `num_plays` of the APNG `acTL` chunk, where 0 means forever.
    fn to_apng_plays(self) -> HueloopResult<u32> {
        match self {
            Self::Infinite => Ok(0),
            Self::Finite(0) => Err(HueloopError::config(
                "finite loop count must be >= 1 (use infinite looping instead)",
            )),
            Self::Finite(n) => Ok(u32::from(n)),
        }
    }
}

/// Output container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Animated PNG: lossless 8-bit RGBA frames with exact fractional delays.
    Apng,
}

impl OutputFormat {
    /// Pick the container from the file extension of `path` (`.apng` or `.png`).
    pub fn from_path(path: &Path) -> HueloopResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("apng" | "png") => Ok(Self::Apng),
            Some(other) => Err(HueloopError::config(format!(
                "unsupported output format '.{other}' for '{}' (expected .apng or .png)",
                path.display()
            ))),
            None => Err(HueloopError::config(format!(
                "output path '{}' has no extension (expected .apng or .png)",
                path.display()
            ))),
        }
    }
}

/// An ordered, validated frame sequence with a per-frame delay and loop mode.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<RgbaImage>,
    canvas: Canvas,
    delay: FrameDelay,
    loop_mode: LoopMode,
}

impl Animation {
    /// Build an animation; fails on an empty sequence, mismatched frame sizes or a zero delay
    /// denominator.
    pub fn new(
        frames: Vec<RgbaImage>,
        delay: FrameDelay,
        loop_mode: LoopMode,
    ) -> HueloopResult<Self> {
        let canvas = validate_frames(&frames)?;
        if delay.den == 0 {
            return Err(HueloopError::config("frame delay denominator must be > 0"));
        }
        Ok(Self {
            frames,
            canvas,
            delay,
            loop_mode,
        })
    }

    /// Frames in display order.
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; empty animations cannot be built.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared dimensions of every frame.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Display time of each frame.
    pub fn delay(&self) -> FrameDelay {
        self.delay
    }

    /// Loop behavior.
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Encode into the given container.
    pub fn encode(&self, format: OutputFormat) -> HueloopResult<Vec<u8>> {
        match format {
            OutputFormat::Apng => self.encode_apng(),
        }
    }

    /// Encode as an animated PNG.
    ///
    /// Every frame covers the full canvas and replaces its predecessor (`BlendOp::Source`,
    /// `DisposeOp::None`), so decoded pixels, alpha included, equal the rendered ones.
    #[tracing::instrument(skip(self), fields(frames = self.frames.len(), canvas = %self.canvas))]
    pub fn encode_apng(&self) -> HueloopResult<Vec<u8>> {
        let plays = self.loop_mode.to_apng_plays()?;
        let num_frames = u32::try_from(self.frames.len()).map_err(|_| {
            HueloopError::encode(format!("too many frames for APNG: {}", self.frames.len()))
        })?;
        let apng_err = |what: &str, e: png::EncodingError| {
            HueloopError::encode(format!("failed to {what}: {e}"))
        };

        let mut buf = Vec::new();
        let mut encoder = png::Encoder::new(&mut buf, self.canvas.width, self.canvas.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .set_animated(num_frames, plays)
            .map_err(|e| apng_err("set APNG animation control", e))?;
        encoder
            .set_frame_delay(self.delay.num, self.delay.den)
            .map_err(|e| apng_err("set APNG frame delay", e))?;
        encoder
            .set_blend_op(png::BlendOp::Source)
            .map_err(|e| apng_err("set APNG blend op", e))?;
        encoder
            .set_dispose_op(png::DisposeOp::None)
            .map_err(|e| apng_err("set APNG dispose op", e))?;

        let mut writer = encoder
            .write_header()
            .map_err(|e| apng_err("write APNG header", e))?;
        for (i, img) in self.frames.iter().enumerate() {
            writer
                .write_image_data(img.as_raw())
                .map_err(|e| apng_err(&format!("encode APNG frame {i}"), e))?;
        }
        writer
            .finish()
            .map_err(|e| apng_err("finish APNG stream", e))?;
        Ok(buf)
    }

    /// Encode with the container implied by `path` and write it atomically.
    pub fn save(&self, path: &Path) -> HueloopResult<()> {
        let format = OutputFormat::from_path(path)?;
        let bytes = self.encode(format)?;
        write_atomic(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            frames = self.frames.len(),
            bytes = bytes.len(),
            "saved animation"
        );
        Ok(())
    }
}

/// Check that `frames` is non-empty and uniformly sized; returns the shared size.
pub fn validate_frames(frames: &[RgbaImage]) -> HueloopResult<Canvas> {
    let Some(first) = frames.first() else {
        return Err(HueloopError::config(
            "animation needs at least one frame",
        ));
    };
    let canvas = Canvas::of(first);
    if canvas.width == 0 || canvas.height == 0 {
        return Err(HueloopError::config(format!(
            "animation frames must be non-empty, got {canvas}"
        )));
    }
    for (i, f) in frames.iter().enumerate().skip(1) {
        let got = Canvas::of(f);
        if got != canvas {
            return Err(HueloopError::config(format!(
                "frame size mismatch at frame {i}: got {got}, expected {canvas}"
            )));
        }
    }
    Ok(canvas)
}

/// Encode a single frame as PNG, for previews.
pub fn encode_png(frame: &RgbaImage) -> HueloopResult<Vec<u8>> {
    let mut buf = Vec::new();
    frame
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| HueloopError::encode(format!("failed to encode PNG: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/animation.rs"]
mod tests;
