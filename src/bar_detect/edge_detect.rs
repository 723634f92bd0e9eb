use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::bar_detect::detect_error_kind::BarDetectError;
use crate::definitions::FLAT_SLOPE_EPSILON;

/// The two detected bar boundaries, as column indices of the original frame.
///
/// `rising` is where texture appears scanning left to right (the steepest
/// increase of the smoothed entropy profile), `falling` is where it
/// disappears again. The pair is deliberately unordered; CropRect
/// normalises it into an offset and a width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePair {
    pub rising: i64,
    pub falling: i64,
}

/// Differentiate the smoothed profile and pick the steepest rise and fall.
///
/// The returned indices are mapped back into original frame coordinates by
/// re-adding `side_cutoff`, and are additionally pushed inwards by
/// `final_cutoff` so a slightly-off transition column still leaves no bar
/// pixels behind.
///
/// When several columns share the extreme slope value the lowest index wins.
/// That tie-break is part of the contract: results must be reproducible
/// run-to-run and against the tool this pipeline was tuned with.
pub fn detect_edges(
    smoothed: &[f64],
    side_cutoff: u32,
    final_cutoff: u32,
    (frame_width, frame_height): (u32, u32),
) -> Result<EdgePair, BarDetectError> {
    let slopes = slope_profile(smoothed);

    let flat_err = BarDetectError::FlatProfile {
        width: frame_width,
        height: frame_height,
    };

    if slopes.is_empty() {
        return Err(flat_err);
    }

    let mut max_idx = 0;
    let mut min_idx = 0;
    for (i, &slope) in slopes.iter().enumerate() {
        if slope > slopes[max_idx] {
            max_idx = i;
        }
        if slope < slopes[min_idx] {
            min_idx = i;
        }
    }

    if slopes[max_idx] - slopes[min_idx] <= FLAT_SLOPE_EPSILON {
        return Err(flat_err);
    }

    let side = i64::from(side_cutoff);
    let fin = i64::from(final_cutoff);

    Ok(EdgePair {
        rising: max_idx as i64 + side + fin,
        falling: min_idx as i64 + side - fin,
    })
}

//adjacent differences: one slope value per pair of neighbouring columns,
//so the result is one element shorter than its input
fn slope_profile(smoothed: &[f64]) -> Vec<f64> {
    smoothed.iter().tuple_windows().map(|(a, b)| b - a).collect()
}
