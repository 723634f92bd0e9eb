#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
#![deny(clippy::dbg_macro)]

//! # Overview
//! bar_remover_lib finds the uniform "bar" regions (letterbox/pillarbox
//! padding) at the left and right of an image frame, and can crop them out
//! of the original file.
//!
//! # How it works
//! Bars carry no texture, so the library measures texture directly:
//! * the local Shannon entropy of every pixel's disk-shaped neighbourhood,
//! * summed per column into a 1-D profile (with unreliable border columns
//!   trimmed away),
//! * smoothed with a Savitzky-Golay filter so single-column noise cannot
//!   masquerade as an edge,
//! * differentiated; the steepest rise and fall of the smoothed profile are
//!   the points where texture appears and disappears, i.e. the bar
//!   boundaries.
//!
//! The pipeline is deterministic and holds no state between frames: the same
//! frame always produces the same crop rectangle.
//!
//! # High level API
//! Detection alone works on any [`image::GrayImage`], with no external
//! prerequisites:
//! ```rust
//! use bar_remover_lib::BarDetector;
//! use image::{GrayImage, Luma};
//! use rand::prelude::*;
//!
//! //a 300x60 frame: 40-column bars either side, noise in the middle
//! let mut rng = StdRng::seed_from_u64(1);
//! let frame = GrayImage::from_fn(300, 60, |x, _y| {
//!     if x < 40 || x >= 260 {
//!         Luma([32])
//!     } else {
//!         Luma([rng.gen::<u8>()])
//!     }
//! });
//!
//! let crop = BarDetector::default().detect(&frame).unwrap();
//! assert!(crop.x > 0 && crop.width < 300);
//! ```
//!
//! The end-to-end flow ([`remove_bars`]) additionally extracts the frame
//! from arbitrary sources, crops the original, and restores video audio.
//!
//! # Prerequisites
//! [`remove_bars`] calls ImageMagick's convert, ffmpeg and ffprobe from the
//! command line; they must be installed and visible there, e.g.
//! `# apt-get install imagemagick ffmpeg`. The detection pipeline itself has
//! no such requirement.

pub(crate) mod bar_detect;
pub(crate) mod bar_removal;
pub(crate) mod crop_rect;
pub(crate) mod definitions;

pub use bar_detect::{
    column_profile::column_profile,
    detect_error_kind::BarDetectError,
    detector::{BarDetector, DetectionCfg},
    diagnostics::Diagnostics,
    edge_detect::EdgePair,
    entropy::EntropyField,
    savgol::SavgolFilter,
};
pub use bar_removal::{remove_bars, BarRemovalError, RemovalCfg};
pub use crop_rect::CropRect;
