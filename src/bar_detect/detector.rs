use image::GrayImage;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::bar_detect::column_profile::column_profile;
use crate::bar_detect::detect_error_kind::BarDetectError;
use crate::bar_detect::diagnostics::Diagnostics;
use crate::bar_detect::edge_detect::detect_edges;
use crate::bar_detect::entropy::EntropyField;
use crate::bar_detect::savgol::SavgolFilter;
use crate::crop_rect::CropRect;
use crate::definitions::*;

/// Knobs for the detection pipeline.
///
/// The defaults are the values the pipeline was tuned with (see
/// `definitions.rs`). They are plain fields rather than hardcoded constants
/// so callers can adapt the pipeline to unusual material, e.g. a larger
/// `smoothing_window` for very wide frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionCfg {
    /// Radius of the disk neighbourhood used for local entropy.
    pub neighborhood_radius: u32,

    /// Entropy is erratic near the frame border; drop this many columns from
    /// each side of the profile before smoothing.
    pub side_cutoff: u32,

    /// Crop this many extra columns inwards of each detected edge, so the
    /// bars are removed entirely even when an edge lands a little off.
    pub final_cutoff: u32,

    /// Window length of the smoothing filter. Must be odd and no longer than
    /// the trimmed profile.
    pub smoothing_window: usize,

    /// Polynomial degree of the smoothing filter. Must be less than the
    /// window length.
    pub smoothing_degree: usize,
}

impl Default for DetectionCfg {
    fn default() -> Self {
        Self {
            neighborhood_radius: DEFAULT_NEIGHBORHOOD_RADIUS,
            side_cutoff: DEFAULT_SIDE_CUTOFF,
            final_cutoff: DEFAULT_FINAL_CUTOFF,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            smoothing_degree: DEFAULT_SMOOTHING_DEGREE,
        }
    }
}

/// Detects the left/right bar boundaries of a single grayscale frame.
///
/// The detector holds no state between frames; every call to [`detect`]
/// computes everything afresh from its input, so identical frames always
/// produce identical rectangles.
///
/// [`detect`]: BarDetector::detect
#[derive(Debug, Clone, Default)]
pub struct BarDetector {
    cfg: DetectionCfg,
}

impl BarDetector {
    #[must_use]
    pub fn from_cfg(cfg: DetectionCfg) -> Self {
        Self { cfg }
    }

    /// Run the full pipeline on one frame: local entropy, column profile,
    /// smoothing, slope-extremum edge detection, crop geometry.
    ///
    /// # Errors
    /// * the frame is too small for the configured cutoffs/window,
    /// * the frame has no detectable bar transition (uniform texture),
    /// * the detected edges do not form a usable rectangle.
    pub fn detect(&self, frame: &GrayImage) -> Result<CropRect, BarDetectError> {
        self.detect_inner(frame).map(|(crop, _diagnostics)| crop)
    }

    /// As [`BarDetector::detect`], but also returns the intermediate values
    /// for inspection (raw and smoothed profiles, edge pair, dimensions).
    pub fn detect_with_diagnostics(
        &self,
        frame: &GrayImage,
    ) -> Result<(CropRect, Diagnostics), BarDetectError> {
        self.detect_inner(frame)
    }

    fn detect_inner(&self, frame: &GrayImage) -> Result<(CropRect, Diagnostics), BarDetectError> {
        let cfg = &self.cfg;
        let (width, height) = frame.dimensions();

        //validate frame against configuration before any numeric work, so
        //callers get a parameter error instead of an obscure numeric one
        if width <= 2 * cfg.side_cutoff {
            return Err(BarDetectError::FrameTooNarrow {
                width,
                height,
                side_cutoff: cfg.side_cutoff,
            });
        }

        let filter = SavgolFilter::from_cfg(cfg.smoothing_window, cfg.smoothing_degree)?;

        let profile_len = (width - 2 * cfg.side_cutoff) as usize;
        if profile_len < filter.window() {
            return Err(BarDetectError::ProfileTooShort {
                profile_len,
                window: filter.window(),
            });
        }

        let field = EntropyField::from_frame(frame, cfg.neighborhood_radius);
        let raw = column_profile(&field, cfg.side_cutoff)?;
        let smoothed = filter.apply(&raw)?;

        let edges = detect_edges(&smoothed, cfg.side_cutoff, cfg.final_cutoff, (width, height))?;
        debug!(
            "frame {width}x{height}: rising edge at column {}, falling edge at column {}",
            edges.rising, edges.falling
        );

        let crop = CropRect::from_edge_pair(height, edges.rising, edges.falling);
        if crop.is_degenerate(width) {
            return Err(BarDetectError::DegenerateCrop {
                rising: edges.rising,
                falling: edges.falling,
                frame_width: width,
            });
        }

        let diagnostics = Diagnostics {
            frame_width: width,
            frame_height: height,
            column_profile: raw,
            smoothed_profile: smoothed,
            edges,
        };

        Ok((crop, diagnostics))
    }
}
