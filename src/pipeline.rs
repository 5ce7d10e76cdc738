use std::path::{Path, PathBuf};

use crate::{
    assets::source::SourceImage,
    config::AnimationConfig,
    encode::{
        animation::{Animation, encode_png},
        atomic::write_atomic,
    },
    foundation::{
        core::{Canvas, FrameIndex},
        error::HueloopResult,
    },
    render::generator::{FrameGenerator, RenderStats, RenderThreading, RenderedFrame},
};

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Where the animation was written.
    pub output_path: PathBuf,
    /// Dimensions of every frame.
    pub canvas: Canvas,
    /// Rendering counters.
    pub stats: RenderStats,
}

/// Load the source, render every frame and write the animation.
///
/// Pipeline:
/// 1. validate `cfg` (nothing is read or written when this fails)
/// 2. [`SourceImage::open`] and derive the red baseline
/// 3. [`FrameGenerator::render_all`]
/// 4. [`Animation::save`] (atomic)
#[tracing::instrument(skip_all, fields(input = %cfg.input_path.display(), output = %cfg.output_path.display()))]
pub fn run(cfg: &AnimationConfig, threading: &RenderThreading) -> HueloopResult<RunReport> {
    cfg.validate()?;
    let source = SourceImage::open(&cfg.input_path)?;
    let (animation, stats) = build_animation(&source, cfg, threading)?;
    animation.save(&cfg.output_path)?;

    Ok(RunReport {
        output_path: cfg.output_path.clone(),
        canvas: animation.canvas(),
        stats,
    })
}

/// Render all frames of `cfg` from an already loaded source into an [`Animation`].
pub fn build_animation(
    source: &SourceImage,
    cfg: &AnimationConfig,
    threading: &RenderThreading,
) -> HueloopResult<(Animation, RenderStats)> {
    let schedule = cfg.schedule()?;
    let baseline = source.baseline();
    let generator = FrameGenerator::new(&baseline, schedule);
    let (frames, stats) = generator.render_all(threading)?;

    let images = frames.into_iter().map(|f| f.image).collect();
    let animation = Animation::new(images, schedule.frame_delay(), cfg.loop_mode)?;
    Ok((animation, stats))
}

/// Render one frame of `cfg` and write it as a PNG to `out`.
#[tracing::instrument(skip(cfg), fields(input = %cfg.input_path.display()))]
pub fn render_preview(
    cfg: &AnimationConfig,
    frame: FrameIndex,
    out: &Path,
) -> HueloopResult<RenderedFrame> {
    let schedule = cfg.schedule()?;
    let source = SourceImage::open(&cfg.input_path)?;
    let baseline = source.baseline();
    let rendered = FrameGenerator::new(&baseline, schedule).render_frame(frame)?;
    write_atomic(out, &encode_png(&rendered.image)?)?;
    Ok(rendered)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
