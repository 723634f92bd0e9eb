use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for the various reasons why bar boundaries could not be
/// detected in a frame.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BarDetectError {
    /// The frame is not wide enough to trim the configured number of
    /// boundary-effect columns from each side and still leave a profile.
    #[error("frame is too narrow to drop {side_cutoff} columns from each side: {width}x{height}")]
    FrameTooNarrow { width: u32, height: u32, side_cutoff: u32 },

    /// The trimmed column profile is shorter than the smoothing window, so
    /// the smoothing filter cannot be applied. Either the frame is too small
    /// or the configured window is too large.
    #[error("column profile of length {profile_len} is shorter than the smoothing window {window}")]
    ProfileTooShort { profile_len: usize, window: usize },

    /// The smoothing filter parameters are unusable: the window must be odd
    /// and strictly greater than the polynomial degree.
    #[error("smoothing window {window} must be odd and greater than the polynomial degree {degree}")]
    BadFilterCfg { window: usize, degree: usize },

    /// The derivative of the smoothed profile has no distinguishable
    /// extremum. This happens for frames with uniform texture everywhere,
    /// i.e. frames without bars.
    #[error("no bar transition found: the entropy slope is flat across the {width}x{height} frame")]
    FlatProfile { width: u32, height: u32 },

    /// The detected edges do not select any pixels of the frame (coincident,
    /// or pushed outside the frame by the cutoff offsets).
    #[error("edges at columns {rising} and {falling} do not form a crop inside a frame {frame_width} wide")]
    DegenerateCrop { rising: i64, falling: i64, frame_width: u32 },
}
