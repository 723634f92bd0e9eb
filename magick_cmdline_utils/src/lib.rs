//! Thin wrappers around the command line interfaces of ImageMagick's
//! `convert` and the `ffmpeg`/`ffprobe` pair.
//!
//! Everything here is a blocking call into an out-of-process tool: extract
//! the first frame of a (possibly animated) source, crop a source to a
//! geometry, copy an audio stream back onto a cropped video, and probe which
//! stream kinds a file contains. No image processing happens in this crate.
//!
//! The tools must be installed and visible on the command line, e.g.
//! `# apt-get install imagemagick ffmpeg`.

mod magick_error_kind;
mod magick_ops;
mod probe_ops;

pub use magick_error_kind::MagickError;
pub use magick_ops::{
    crop_to_geometry, extract_first_frame, remux_audio, required_tools_are_callable,
};
pub use probe_ops::{probe_streams, StreamKinds};
