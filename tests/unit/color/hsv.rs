use super::*;

fn assert_close(a: [f64; 3], b: [f64; 3], tol: f64) {
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() <= tol, "{a:?} != {b:?}");
    }
}

#[test]
fn grays_have_zero_hue_and_saturation() {
    assert_eq!(rgb_to_hsv(0.0, 0.0, 0.0), Hsv { h: 0.0, s: 0.0, v: 0.0 });
    assert_eq!(
        rgb_to_hsv(128.0, 128.0, 128.0),
        Hsv {
            h: 0.0,
            s: 0.0,
            v: 128.0
        }
    );
}

#[test]
fn primaries_map_to_expected_hues() {
    let red = rgb_to_hsv(255.0, 0.0, 0.0);
    assert_eq!((red.h, red.s, red.v), (0.0, 1.0, 255.0));

    let green = rgb_to_hsv(0.0, 1.0, 0.0);
    assert!((green.h - 1.0 / 3.0).abs() < 1e-12);

    let blue = rgb_to_hsv(0.0, 0.0, 1.0);
    assert!((blue.h - 2.0 / 3.0).abs() < 1e-12);

    // Magenta sits on the negative side of red and must wrap into [0, 1).
    let magenta = rgb_to_hsv(1.0, 0.0, 1.0);
    assert!((magenta.h - 5.0 / 6.0).abs() < 1e-12);
}

#[test]
fn round_trip_reproduces_input_within_tolerance() {
    let samples = [
        [255.0, 0.0, 0.0],
        [12.0, 200.0, 99.0],
        [1.0, 2.0, 3.0],
        [250.0, 250.0, 10.0],
        [0.0, 0.0, 0.0],
        [77.0, 13.0, 201.0],
        [0.25, 0.5, 0.75],
    ];
    for rgb in samples {
        let hsv = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
        assert_close(hsv_to_rgb(hsv), rgb, 1e-9);
    }
}

#[test]
fn round_trip_exhaustive_over_coarse_grid() {
    for r in (0..=255).step_by(15) {
        for g in (0..=255).step_by(17) {
            for b in (0..=255).step_by(51) {
                let rgb = [r as f64, g as f64, b as f64];
                let back = hsv_to_rgb(rgb_to_hsv(rgb[0], rgb[1], rgb[2]));
                assert_close(back, rgb, 1e-9);
            }
        }
    }
}

#[test]
fn whole_turns_of_hue_are_ignored() {
    let base = Hsv {
        h: 0.2,
        s: 0.8,
        v: 200.0,
    };
    let turned = Hsv { h: 1.2, ..base };
    assert_close(hsv_to_rgb(base), hsv_to_rgb(turned), 1e-9);

    let full = Hsv { h: 1.0, ..base };
    let zero = Hsv { h: 0.0, ..base };
    assert_close(hsv_to_rgb(full), hsv_to_rgb(zero), 1e-9);
}

#[test]
fn wrap_hue_stays_in_unit_interval() {
    assert_eq!(wrap_hue(0.0), 0.0);
    assert_eq!(wrap_hue(1.0), 0.0);
    assert!((wrap_hue(1.25) - 0.25).abs() < 1e-12);
    assert!((wrap_hue(-0.25) - 0.75).abs() < 1e-12);
    let tiny = wrap_hue(-1e-20);
    assert!((0.0..1.0).contains(&tiny));
}
