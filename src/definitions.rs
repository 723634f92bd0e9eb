// Detection defaults. These are the values the pipeline was tuned with; all of
// them can be overridden through DetectionCfg.

/// Radius of the disk-shaped neighbourhood used for local entropy.
pub const DEFAULT_NEIGHBORHOOD_RADIUS: u32 = 10;

// entropy is erratic near the frame border, so ignore N edge columns
pub const DEFAULT_SIDE_CUTOFF: u32 = 20;

// crop the final image by an additional N columns, to ensure bars are entirely removed
pub const DEFAULT_FINAL_CUTOFF: u32 = 7;

/// Window length of the smoothing filter. Must be odd.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 51;

/// Polynomial degree of the smoothing filter. Must be less than the window length.
pub const DEFAULT_SMOOTHING_DEGREE: usize = 4;

/// A slope range at or below this counts as flat (no detectable bar transition).
/// A genuinely uniform frame produces an exactly-zero derivative; any real
/// content sits orders of magnitude above this.
pub const FLAT_SLOPE_EPSILON: f64 = 1e-9;
