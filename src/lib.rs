//! hueloop turns a still image into a looping animation.
//!
//! The source is reduced to its red channel once, then every frame replaces the hue with a
//! linear ramp and scales the brightness with a sine wave:
//!
//! - Load a [`SourceImage`] and derive its [`Baseline`]
//! - Build a [`FrameSchedule`] from an [`AnimationConfig`]
//! - Render frames with a [`FrameGenerator`]
//! - Encode them as an [`Animation`]
//!
//! [`run`] does all of it in one call.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Source image loading.
pub mod assets;
/// RGB↔HSV math and raster transforms.
pub mod color;
/// Run configuration.
pub mod config;
/// Animation encoding.
pub mod encode;
/// End-to-end entry points.
pub mod pipeline;
/// Frame rendering.
pub mod render;
/// Per-frame hue and brightness schedule.
pub mod schedule;

pub use crate::foundation::core::{Canvas, Fps, FrameDelay, FrameIndex, FrameRange};
pub use crate::foundation::error::{HueloopError, HueloopResult};

pub use crate::assets::source::{Baseline, SourceImage};
pub use crate::color::hsv::{Hsv, hsv_to_rgb, rgb_to_hsv, wrap_hue};
pub use crate::color::transform::{isolate_red, shift_hue_and_scale_brightness};
pub use crate::config::AnimationConfig;
pub use crate::encode::animation::{Animation, LoopMode, OutputFormat};
pub use crate::pipeline::{RunReport, build_animation, render_preview, run};
pub use crate::render::generator::{FrameGenerator, RenderStats, RenderThreading, RenderedFrame};
pub use crate::schedule::{FrameParams, FrameSchedule};
