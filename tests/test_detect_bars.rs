use bar_remover_lib::*;
use image::{GrayImage, Luma};
use rand::prelude::*;

//a frame with flat bars either side and pseudo-random noise in between.
//deterministic for a given seed, so every run sees the same frame.
fn bar_frame(width: u32, height: u32, left_bar: u32, right_bar_start: u32, seed: u64) -> GrayImage {
    let mut rng = StdRng::seed_from_u64(seed);
    GrayImage::from_fn(width, height, |x, _y| {
        if x < left_bar || x >= right_bar_start {
            Luma([54])
        } else {
            Luma([rng.gen::<u8>()])
        }
    })
}

#[test]
fn test_finds_bars_in_synthetic_frame() {
    //bars at columns 0..50 and 350..400
    let frame = bar_frame(400, 100, 50, 350, 57);

    let crop = BarDetector::default().detect(&frame).unwrap();

    let left = crop.x;
    let right = crop.x + crop.width as i64;

    //the detected boundaries should sit near the true transitions, nudged
    //inwards by the final cutoff and blurred by the neighbourhood radius
    //and smoothing window
    assert!((40..=75).contains(&left), "left edge at {left}");
    assert!((325..=360).contains(&right), "right edge at {right}");
    assert_eq!(crop.y, 0);
    assert_eq!(crop.height, 100);
}

#[test]
fn test_detection_is_deterministic() {
    let frame = bar_frame(400, 80, 60, 340, 99);
    let detector = BarDetector::default();

    let first = detector.detect(&frame).unwrap();
    let second = detector.detect(&frame).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_uniform_frame_is_ambiguous() {
    let frame = GrayImage::from_pixel(400, 100, Luma([120]));

    let act = BarDetector::default().detect(&frame);

    assert!(matches!(act, Err(BarDetectError::FlatProfile { width: 400, height: 100 })));
}

#[test]
fn test_frame_at_cutoff_width_is_rejected() {
    //width of exactly 2 * side_cutoff leaves an empty profile
    let frame = GrayImage::new(40, 100);

    let act = BarDetector::default().detect(&frame);

    assert!(matches!(
        act,
        Err(BarDetectError::FrameTooNarrow { width: 40, height: 100, side_cutoff: 20 })
    ));
}

#[test]
fn test_frame_narrower_than_window_is_rejected() {
    //80 - 2*20 leaves a 40-column profile, shorter than the 51 window
    let frame = bar_frame(80, 30, 10, 70, 3);

    let act = BarDetector::default().detect(&frame);

    assert!(matches!(
        act,
        Err(BarDetectError::ProfileTooShort { profile_len: 40, window: 51 })
    ));
}

#[test]
fn test_diagnostics_lengths_and_values() {
    let frame = bar_frame(400, 50, 50, 350, 21);

    let (crop, diagnostics) = BarDetector::default()
        .detect_with_diagnostics(&frame)
        .unwrap();

    //profile length = width - 2 * side_cutoff, smoothing preserves it
    assert_eq!(diagnostics.column_profile.len(), 400 - 2 * 20);
    assert_eq!(diagnostics.smoothed_profile.len(), diagnostics.column_profile.len());

    //the crop is built from exactly the diagnosed edges
    let exp = CropRect::from_edge_pair(50, diagnostics.edges.rising, diagnostics.edges.falling);
    assert_eq!(exp, crop);

    assert_eq!(diagnostics.frame_width, 400);
    assert_eq!(diagnostics.frame_height, 50);
}

#[test]
fn test_custom_cfg_is_honoured() {
    let frame = bar_frame(200, 40, 30, 170, 11);

    let cfg = DetectionCfg {
        side_cutoff: 10,
        final_cutoff: 0,
        smoothing_window: 31,
        ..DetectionCfg::default()
    };

    let (_crop, diagnostics) = BarDetector::from_cfg(cfg)
        .detect_with_diagnostics(&frame)
        .unwrap();

    assert_eq!(diagnostics.column_profile.len(), 200 - 2 * 10);
}

//the three 1-D stages compose with the documented length arithmetic for
//any frame wide enough to process
#[test]
fn test_stage_length_arithmetic() {
    let frame = bar_frame(150, 20, 20, 130, 5);

    let field = EntropyField::from_frame(&frame, 4);
    assert_eq!(field.width(), 150);
    assert_eq!(field.height(), 20);

    let profile = column_profile(&field, 20).unwrap();
    assert_eq!(profile.len(), 150 - 2 * 20);

    let filter = SavgolFilter::from_cfg(51, 4).unwrap();
    let smoothed = filter.apply(&profile).unwrap();
    assert_eq!(smoothed.len(), profile.len());
}
