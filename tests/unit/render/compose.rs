use super::*;
use crate::foundation::core::LayoutMode;
use crate::layout::resolver::resolve;

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255]);
        }
    }
    PixelBuffer::from_raw(width, height, data).unwrap()
}

fn run(src: PixelBuffer, dst_w: u32, dst_h: u32, mode: LayoutMode) -> PixelBuffer {
    let t = resolve(src.width(), src.height(), dst_w, dst_h, mode).unwrap();
    compose(src, &t).unwrap()
}

#[test]
fn output_dimensions_always_match_destination() {
    for mode in LayoutMode::ALL {
        for (sw, sh, dw, dh) in [(8, 6, 9, 16), (16, 9, 5, 5), (1, 30, 20, 1), (3, 3, 3, 3)] {
            let out = run(gradient(sw, sh), dw, dh, mode);
            assert_eq!((out.width(), out.height()), (dw, dh), "{mode} {sw}x{sh}->{dw}x{dh}");
            assert_eq!(out.as_raw().len(), (dw * dh * 4) as usize);
        }
    }
}

#[test]
fn fit_same_size_is_pixel_identical() {
    let src = gradient(108, 192);
    let expected = src.clone();
    let out = run(src, 108, 192, LayoutMode::Fit);
    assert_eq!(out, expected);
}

#[test]
fn fill_covers_every_destination_pixel() {
    let src = PixelBuffer::filled(80, 60, [10, 20, 30, 255]).unwrap();
    let out = run(src, 108, 192, LayoutMode::Fill);
    assert!(out.as_raw().chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn fill_takes_the_horizontal_center_of_a_wide_source() {
    // Left third red, middle third green, right third blue; fill into a narrow portrait keeps
    // only the middle.
    let mut data = Vec::new();
    for _y in 0..10 {
        for x in 0..30 {
            let px = match x / 10 {
                0 => [255, 0, 0, 255],
                1 => [0, 255, 0, 255],
                _ => [0, 0, 255, 255],
            };
            data.extend_from_slice(&px);
        }
    }
    let src = PixelBuffer::from_raw(30, 10, data).unwrap();
    let out = run(src, 4, 10, LayoutMode::Fill);
    assert!(out.as_raw().chunks_exact(4).all(|px| px == [0, 255, 0, 255]));
}

#[test]
fn fit_leaves_letterbox_transparent() {
    let src = PixelBuffer::filled(10, 5, [200, 200, 200, 255]).unwrap();
    let out = run(src, 10, 15, LayoutMode::Fit);
    assert_eq!(out.pixel(5, 0), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(5, 14), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(5, 7), Some([200, 200, 200, 255]));
}

#[test]
fn stretch_fills_destination_with_distortion() {
    let src = PixelBuffer::filled(3, 7, [1, 2, 3, 255]).unwrap();
    let out = run(src, 50, 4, LayoutMode::Stretch);
    assert!(out.as_raw().chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn center_small_source_is_placed_natively() {
    let src = gradient(4, 2);
    let out = run(src.clone(), 8, 6, LayoutMode::Center);
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 0]));
    for y in 0..2 {
        for x in 0..4 {
            assert_eq!(out.pixel(x + 2, y + 2), src.pixel(x, y));
        }
    }
}

#[test]
fn center_large_source_is_clipped() {
    let src = gradient(300, 200);
    let out = run(src.clone(), 10, 10, LayoutMode::Center);
    assert_eq!(out.pixel(0, 0), src.pixel(145, 95));
    assert_eq!(out.pixel(9, 9), src.pixel(154, 104));
}

#[test]
fn extreme_aspect_ratios_do_not_overrun() {
    for mode in LayoutMode::ALL {
        let out = run(gradient(1, 10_000), 1000, 1, mode);
        assert_eq!((out.width(), out.height()), (1000, 1));
        let out = run(gradient(10_000, 1), 1, 1000, mode);
        assert_eq!((out.width(), out.height()), (1, 1000));
    }
}

#[test]
fn empty_source_is_composition_failure() {
    let t = resolve(2, 2, 4, 4, LayoutMode::Fill).unwrap();
    let empty = PixelBuffer::from_raw(0, 0, Vec::new()).unwrap();
    let err = compose(empty, &t).unwrap_err();
    assert!(matches!(err, WallfitError::CompositionFailure(_)));
}

#[test]
fn mismatched_source_is_composition_failure() {
    let t = resolve(2, 2, 4, 4, LayoutMode::Fit).unwrap();
    let err = compose(gradient(3, 2), &t).unwrap_err();
    assert!(matches!(err, WallfitError::CompositionFailure(_)));
}
