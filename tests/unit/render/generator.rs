use image::Rgba;

use super::*;
use crate::{assets::source::SourceImage, foundation::core::Fps};

fn baseline() -> Baseline {
    let img = RgbaImage::from_fn(6, 5, |x, y| {
        Rgba([(x * 40 + y) as u8, (y * 50) as u8, 30, (x * 40 + y * 3) as u8])
    });
    SourceImage::from_rgba(img).unwrap().baseline()
}

fn schedule(fps: u32, duration: f64, shifts: f64, blinks: f64) -> FrameSchedule {
    FrameSchedule::new(Fps::integer(fps).unwrap(), duration, shifts, blinks).unwrap()
}

#[test]
fn renders_every_frame_in_order_with_baseline_alpha() {
    let base = baseline();
    let generator = FrameGenerator::new(&base, schedule(15, 3.0, 1.0, 3.0));
    let (frames, stats) = generator.render_all(&RenderThreading::default()).unwrap();

    assert_eq!(frames.len(), 45);
    assert_eq!(stats.frames_total, 45);
    assert_eq!(stats.frames_rendered, 45);
    assert_eq!(stats.frames_elided, 0);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.index, FrameIndex(i as u64));
        assert_eq!(f.params.index, f.index);
        assert_eq!(f.image.dimensions(), base.image().dimensions());
        for (b, o) in base.image().pixels().zip(f.image.pixels()) {
            assert_eq!(b.0[3], o.0[3]);
        }
    }
}

#[test]
fn single_frame_matches_batch_output() {
    let base = baseline();
    let generator = FrameGenerator::new(&base, schedule(15, 3.0, 1.0, 3.0));
    let (frames, _) = generator.render_all(&RenderThreading::default()).unwrap();
    let one = generator.render_frame(FrameIndex(17)).unwrap();
    assert_eq!(one.image, frames[17].image);
    assert_eq!(one.params, frames[17].params);
}

#[test]
fn first_frame_is_half_brightness_red() {
    let base = baseline();
    let generator = FrameGenerator::new(&base, schedule(15, 3.0, 1.0, 3.0));
    let f0 = generator.render_frame(FrameIndex(0)).unwrap();
    for (b, o) in base.image().pixels().zip(f0.image.pixels()) {
        let expected = (f64::from(b.0[0]) * 0.5) as u8;
        assert_eq!(o.0, [expected, 0, 0, b.0[3]]);
    }
}

#[test]
fn out_of_range_frame_is_rejected() {
    let base = baseline();
    let generator = FrameGenerator::new(&base, schedule(15, 3.0, 1.0, 3.0));
    assert!(generator.render_frame(FrameIndex(45)).is_err());

    let too_far = FrameRange::new(FrameIndex(40), FrameIndex(46)).unwrap();
    assert!(
        generator
            .render_range(too_far, &RenderThreading::default())
            .is_err()
    );
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(
        generator
            .render_range(empty, &RenderThreading::default())
            .is_err()
    );
}

#[test]
fn sequential_and_parallel_match() {
    let base = baseline();
    let generator = FrameGenerator::new(&base, schedule(10, 2.0, 1.5, 2.0));
    let (seq, _) = generator.render_all(&RenderThreading::default()).unwrap();
    let (par, stats) = generator
        .render_all(&RenderThreading {
            parallel: true,
            threads: Some(3),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(stats.frames_rendered, 20);
    assert_eq!(seq.len(), par.len());
    for (a, b) in seq.iter().zip(par.iter()) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.image, b.image);
    }
}

#[test]
fn zero_threads_is_rejected_in_parallel_mode() {
    let base = baseline();
    let generator = FrameGenerator::new(&base, schedule(4, 1.0, 1.0, 1.0));
    let err = generator
        .render_all(&RenderThreading {
            parallel: true,
            threads: Some(0),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, HueloopError::Validation(_)));
}

#[test]
fn static_frames_are_elided_without_changing_output() {
    let base = baseline();
    // No hue motion and no blinking: every frame is identical.
    let generator = FrameGenerator::new(&base, schedule(8, 1.0, 0.0, 0.0));
    let (plain, _) = generator.render_all(&RenderThreading::default()).unwrap();

    for parallel in [false, true] {
        let (elided, stats) = generator
            .render_all(&RenderThreading {
                parallel,
                threads: Some(2),
                static_frame_elision: true,
            })
            .unwrap();
        assert_eq!(stats.frames_total, 8);
        assert_eq!(stats.frames_rendered, 1);
        assert_eq!(stats.frames_elided, 7);
        for (a, b) in plain.iter().zip(elided.iter()) {
            assert_eq!(a.index, b.index);
            assert_eq!(a.image, b.image);
        }
    }
}

#[test]
fn elision_keys_on_wrapped_hue() {
    // Two full hue turns and no blinking: frame 4 repeats frame 0 exactly.
    let base = baseline();
    let generator = FrameGenerator::new(&base, schedule(4, 2.0, 2.0, 0.0));
    let (frames, stats) = generator
        .render_all(&RenderThreading {
            static_frame_elision: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stats.frames_total, 8);
    assert_eq!(stats.frames_rendered, 4);
    assert_eq!(frames[0].image, frames[4].image);
    assert_eq!(frames[3].image, frames[7].image);
}
