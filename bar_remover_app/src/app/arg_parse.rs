use std::path::PathBuf;

use clap::Parser;

/// Crop the letterbox/pillarbox bars out of an image, gif or video.
///
/// The input's first frame is analysed for the two columns where picture
/// texture starts and stops, then the whole input is cropped to that range
/// and written to the output path. For videos, audio is copied back onto the
/// cropped result.
#[derive(Debug, Parser)]
#[command(name = "bar_remover", version)]
pub struct Args {
    /// Log the intermediate detection values (frame size, detected edges).
    #[arg(long)]
    pub debug: bool,

    /// Save a plot of the raw vs smoothed entropy profile into this
    /// directory, named after the input file.
    #[arg(long, value_name = "DIR")]
    pub plot_dir: Option<PathBuf>,

    /// Do not restore audio onto cropped videos.
    #[arg(long)]
    pub no_audio: bool,

    /// More log output.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only.
    #[arg(short, long)]
    pub quiet: bool,

    /// The image/gif/video to remove bars from.
    pub input: PathBuf,

    /// Where to write the cropped copy.
    pub output: PathBuf,
}
