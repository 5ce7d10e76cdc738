//! Explicit configuration for one animation run.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use crate::{
    encode::animation::{LoopMode, OutputFormat},
    foundation::{
        core::Fps,
        error::{HueloopError, HueloopResult},
    },
    schedule::FrameSchedule,
};

/// Everything needed to turn one source image into one animation.
///
/// Missing keys take their defaults when loaded from JSON; unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Source image.
    pub input_path: PathBuf,
    /// Animation to write. The extension selects the container.
    pub output_path: PathBuf,
    /// Frames per second.
    pub frame_rate: u32,
    /// Animation length in seconds.
    pub duration: f64,
    /// Full hue turns over the duration.
    pub shifts: f64,
    /// Brightness cycles over the duration.
    pub blinks: f64,
    /// Loop behavior of the output.
    pub loop_mode: LoopMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("logo.png"),
            output_path: PathBuf::from("logo.apng"),
            frame_rate: 15,
            duration: 3.0,
            shifts: 1.0,
            blinks: 3.0,
            loop_mode: LoopMode::Infinite,
        }
    }
}

impl AnimationConfig {
    /// Load a JSON config file.
    ///
    /// Relative `input_path`/`output_path` values are resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> HueloopResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HueloopError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f)).map_err(|e| match e {
            HueloopError::Config(msg) => {
                HueloopError::config(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(cfg.resolve_relative_to(base))
    }

    /// Parse JSON from a reader.
    pub fn from_reader(r: impl Read) -> HueloopResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HueloopError::config(format!("parse config JSON: {e}")))
    }

    /// Make relative paths relative to `base`.
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        if self.input_path.is_relative() {
            self.input_path = base.join(&self.input_path);
        }
        if self.output_path.is_relative() {
            self.output_path = base.join(&self.output_path);
        }
        self
    }

    /// Frame rate as [`Fps`].
    pub fn fps(&self) -> HueloopResult<Fps> {
        if self.frame_rate == 0 {
            return Err(HueloopError::config("frame_rate must be > 0"));
        }
        Fps::integer(self.frame_rate)
    }

    /// Schedule implied by the timing fields.
    pub fn schedule(&self) -> HueloopResult<FrameSchedule> {
        FrameSchedule::new(self.fps()?, self.duration, self.shifts, self.blinks)
    }

    /// Check every field before any work starts.
    pub fn validate(&self) -> HueloopResult<()> {
        self.schedule()?;
        OutputFormat::from_path(&self.output_path)?;
        if self.loop_mode == LoopMode::Finite(0) {
            return Err(HueloopError::config("finite loop count must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
