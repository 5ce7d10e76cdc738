use std::collections::HashMap;

use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    assets::source::Baseline,
    color::{hsv::wrap_hue, transform::shift_hue_and_scale_brightness},
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{HueloopError, HueloopResult},
    },
    schedule::{FrameParams, FrameSchedule},
};

/// One generated frame.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    /// Position in the animation.
    pub index: FrameIndex,
    /// Parameters the frame was rendered with.
    pub params: FrameParams,
    /// RGBA8 pixels, straight alpha.
    pub image: RgbaImage,
}

/// Threading controls for multi-frame rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
    /// Reuse pixels of earlier frames whose wrapped hue and brightness are identical.
    pub static_frame_elision: bool,
}

/// Aggregated rendering counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames that were actually computed.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

/// Renders frames of a [`FrameSchedule`] from a shared [`Baseline`].
///
/// Every frame is a pure function of the baseline and its own parameters, so frames can be
/// produced in any order; results are always returned in index order.
#[derive(Clone, Copy, Debug)]
pub struct FrameGenerator<'a> {
    baseline: &'a Baseline,
    schedule: FrameSchedule,
}

impl<'a> FrameGenerator<'a> {
    /// Create a generator.
    pub fn new(baseline: &'a Baseline, schedule: FrameSchedule) -> Self {
        Self { baseline, schedule }
    }

    /// Schedule in use.
    pub fn schedule(&self) -> &FrameSchedule {
        &self.schedule
    }

    /// Render a single frame.
    pub fn render_frame(&self, frame: FrameIndex) -> HueloopResult<RenderedFrame> {
        if !self.schedule.frame_range().contains(frame) {
            return Err(HueloopError::validation(format!(
                "frame {} is outside the animation (0..{})",
                frame.0,
                self.schedule.frame_count()
            )));
        }
        let params = self.schedule.params(frame);
        Ok(RenderedFrame {
            index: frame,
            params,
            image: self.render_params(&params)?,
        })
    }

    /// Render every frame of the schedule.
    pub fn render_all(
        &self,
        threading: &RenderThreading,
    ) -> HueloopResult<(Vec<RenderedFrame>, RenderStats)> {
        self.render_range(self.schedule.frame_range(), threading)
    }

    /// Render `range` and return the frames in index order together with counters.
    #[tracing::instrument(skip(self, threading), fields(parallel = threading.parallel))]
    pub fn render_range(
        &self,
        range: FrameRange,
        threading: &RenderThreading,
    ) -> HueloopResult<(Vec<RenderedFrame>, RenderStats)> {
        if range.is_empty() {
            return Err(HueloopError::validation("render range must be non-empty"));
        }
        if range.end.0 > self.schedule.frame_count() {
            return Err(HueloopError::validation(format!(
                "render range end {} exceeds frame count {}",
                range.end.0,
                self.schedule.frame_count()
            )));
        }

        let params: Vec<FrameParams> = range.iter().map(|f| self.schedule.params(f)).collect();
        let plan = plan_unique(&params, threading.static_frame_elision);

        let rendered: Vec<RgbaImage> = if threading.parallel {
            let pool = build_thread_pool(threading.threads)?;
            pool.install(|| {
                plan.unique
                    .par_iter()
                    .map(|&i| self.render_params(&params[i]))
                    .collect::<HueloopResult<Vec<_>>>()
            })?
        } else {
            plan.unique
                .iter()
                .map(|&i| self.render_params(&params[i]))
                .collect::<HueloopResult<Vec<_>>>()?
        };

        let stats = RenderStats {
            frames_total: params.len() as u64,
            frames_rendered: rendered.len() as u64,
            frames_elided: (params.len() - rendered.len()) as u64,
        };

        let mut remaining = vec![0usize; rendered.len()];
        for &slot in &plan.frame_to_unique {
            remaining[slot] += 1;
        }
        let mut slots: Vec<Option<RgbaImage>> = rendered.into_iter().map(Some).collect();

        let mut out = Vec::with_capacity(params.len());
        for (p, &slot) in params.iter().zip(&plan.frame_to_unique) {
            remaining[slot] -= 1;
            let pixels = if remaining[slot] == 0 {
                slots[slot].take()
            } else {
                slots[slot].clone()
            };
            let image = pixels.ok_or_else(|| {
                HueloopError::validation("rendered frame slot reused after move (bug)")
            })?;
            out.push(RenderedFrame {
                index: p.index,
                params: *p,
                image,
            });
        }

        tracing::info!(
            frames = stats.frames_total,
            rendered = stats.frames_rendered,
            elided = stats.frames_elided,
            "rendered frames"
        );
        Ok((out, stats))
    }

    fn render_params(&self, p: &FrameParams) -> HueloopResult<RgbaImage> {
        tracing::debug!(
            frame = p.index.0,
            hue = p.hue,
            brightness = p.brightness,
            "render frame"
        );
        shift_hue_and_scale_brightness(self.baseline.image(), p.hue, p.brightness)
    }
}

struct UniquePlan {
    /// Indices into the params list that need rendering.
    unique: Vec<usize>,
    /// For every frame, the slot in `unique` providing its pixels.
    frame_to_unique: Vec<usize>,
}

fn plan_unique(params: &[FrameParams], elide: bool) -> UniquePlan {
    let mut unique = Vec::with_capacity(params.len());
    let mut frame_to_unique = Vec::with_capacity(params.len());

    if !elide {
        for i in 0..params.len() {
            unique.push(i);
            frame_to_unique.push(i);
        }
        return UniquePlan {
            unique,
            frame_to_unique,
        };
    }

    let mut first = HashMap::<(u64, u64), usize>::new();
    for (i, p) in params.iter().enumerate() {
        let key = (wrap_hue(p.hue).to_bits(), p.brightness.to_bits());
        let slot = *first.entry(key).or_insert_with(|| {
            unique.push(i);
            unique.len() - 1
        });
        frame_to_unique.push(slot);
    }
    UniquePlan {
        unique,
        frame_to_unique,
    }
}

fn build_thread_pool(threads: Option<usize>) -> HueloopResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HueloopError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HueloopError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/generator.rs"]
mod tests;
