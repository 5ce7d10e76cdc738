//! Frame scheduling: map a frame index to its hue and brightness.

use std::f64::consts::PI;

use crate::foundation::{
    core::{Fps, FrameDelay, FrameIndex, FrameRange},
    error::{HueloopError, HueloopResult},
};

/// Tolerance used when deciding whether `fps * duration` is a whole number of frames.
const FRAME_COUNT_EPSILON: f64 = 1e-9;

/// Time-derived parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    /// Frame being described.
    pub index: FrameIndex,
    /// `index / fps`, in seconds.
    pub elapsed_secs: f64,
    /// Target hue as a fraction of a turn. Not wrapped.
    pub hue: f64,
    /// Brightness factor in `[0, 1]`.
    pub brightness: f64,
}

/// Closed-form hue ramp and brightness oscillation over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSchedule {
    fps: Fps,
    duration_secs: f64,
    shifts: f64,
    blinks: f64,
    frame_count: u64,
    frame_delay: FrameDelay,
}

impl FrameSchedule {
    /// Build a schedule.
    ///
    /// `fps * duration_secs` must be a positive whole number of frames, and `1 / fps` must be
    /// representable as a frame delay.
    pub fn new(fps: Fps, duration_secs: f64, shifts: f64, blinks: f64) -> HueloopResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(HueloopError::config(format!(
                "duration must be finite and > 0 seconds, got {duration_secs}"
            )));
        }
        if !shifts.is_finite() {
            return Err(HueloopError::config("shifts must be finite"));
        }
        if !blinks.is_finite() {
            return Err(HueloopError::config("blinks must be finite"));
        }

        let frame_count = frame_count_for(fps, duration_secs)?;
        let frame_delay = fps.frame_delay()?;
        Ok(Self {
            fps,
            duration_secs,
            shifts,
            blinks,
            frame_count,
            frame_delay,
        })
    }

    /// Frames per second.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Number of frames in the animation.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// `[0, frame_count)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.frame_count),
        }
    }

    /// Simulated time position of `frame`.
    pub fn elapsed_secs(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    /// Linear hue ramp completing `shifts` turns over the duration.
    pub fn hue(&self, frame: FrameIndex) -> f64 {
        self.elapsed_secs(frame) * (self.shifts / self.duration_secs)
    }

    /// `0.5 + 0.5 * sin(...)`, completing `blinks` cycles over the duration.
    pub fn brightness(&self, frame: FrameIndex) -> f64 {
        let t = self.elapsed_secs(frame);
        0.5 + 0.5 * (2.0 * PI * (self.blinks / self.duration_secs) * t).sin()
    }

    /// All parameters of `frame`.
    pub fn params(&self, frame: FrameIndex) -> FrameParams {
        FrameParams {
            index: frame,
            elapsed_secs: self.elapsed_secs(frame),
            hue: self.hue(frame),
            brightness: self.brightness(frame),
        }
    }

    /// Parameters of every frame in increasing index order.
    pub fn iter(&self) -> impl Iterator<Item = FrameParams> + '_ {
        self.frame_range().iter().map(|f| self.params(f))
    }

    /// Display time of each frame, exactly `1 / fps` seconds.
    pub fn frame_delay(&self) -> FrameDelay {
        self.frame_delay
    }
}

fn frame_count_for(fps: Fps, duration_secs: f64) -> HueloopResult<u64> {
    let product = fps.as_f64() * duration_secs;
    let rounded = product.round();
    if (product - rounded).abs() > FRAME_COUNT_EPSILON * product.max(1.0) {
        return Err(HueloopError::config(format!(
            "frame rate {} x duration {duration_secs}s = {product} is not a whole number of frames",
            fps.as_f64()
        )));
    }
    if rounded < 1.0 {
        return Err(HueloopError::config(
            "frame rate x duration yields zero frames",
        ));
    }
    if rounded > u32::MAX as f64 {
        return Err(HueloopError::config(format!(
            "frame count {rounded} is too large"
        )));
    }
    Ok(rounded as u64)
}

#[cfg(test)]
#[path = "../tests/unit/schedule.rs"]
mod tests;
