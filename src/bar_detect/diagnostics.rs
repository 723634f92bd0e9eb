use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use itertools::Itertools;

use crate::bar_detect::edge_detect::EdgePair;

const PLOT_HEIGHT: u32 = 360;
const PLOT_MARGIN: u32 = 12;

/// Intermediate values of one detection run, for debugging and visual
/// inspection. Returned from [`BarDetector::detect_with_diagnostics`]
/// instead of being printed from inside the pipeline, so library users
/// decide what to do with it.
///
/// [`BarDetector::detect_with_diagnostics`]: crate::BarDetector::detect_with_diagnostics
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub frame_width: u32,
    pub frame_height: u32,
    pub column_profile: Vec<f64>,
    pub smoothed_profile: Vec<f64>,
    pub edges: EdgePair,
}

impl Diagnostics {
    /// Render the raw column profile (blue) against its smoothed version
    /// (red), one horizontal pixel per profile sample.
    #[must_use]
    pub fn render_profile_plot(&self) -> RgbImage {
        let samples = self.column_profile.len().max(2) as u32;
        let mut plot = RgbImage::from_pixel(
            samples + 2 * PLOT_MARGIN,
            PLOT_HEIGHT + 2 * PLOT_MARGIN,
            Rgb([255, 255, 255]),
        );

        let (lo, hi) = self
            .column_profile
            .iter()
            .chain(&self.smoothed_profile)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let span = (hi - lo).max(f64::EPSILON);

        let to_xy = |i: usize, v: f64| {
            let x = (PLOT_MARGIN + i as u32) as f32;
            let y = PLOT_MARGIN as f32 + ((hi - v) / span * f64::from(PLOT_HEIGHT)) as f32;
            (x, y)
        };

        draw_series(&mut plot, &self.column_profile, Rgb([64, 64, 224]), to_xy);
        draw_series(&mut plot, &self.smoothed_profile, Rgb([224, 48, 48]), to_xy);

        plot
    }
}

fn draw_series(
    plot: &mut RgbImage,
    series: &[f64],
    colour: Rgb<u8>,
    to_xy: impl Fn(usize, f64) -> (f32, f32),
) {
    for ((i0, &v0), (i1, &v1)) in series.iter().enumerate().tuple_windows() {
        draw_line_segment_mut(plot, to_xy(i0, v0), to_xy(i1, v1), colour);
    }
}
