use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Various causes of failure when running the convert/ffmpeg/ffprobe tools.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MagickError {
    /// The tool binary was not found. Make sure ImageMagick and ffmpeg are
    /// installed and visible on the command line.
    #[error("{0} not found. Make sure ImageMagick and ffmpeg are installed and visible on the command line")]
    CommandNotFound(String),

    /// Io error occurred while executing the tool.
    #[error("io error while running {tool}: {error}")]
    Io { tool: String, error: String },

    /// The tool returned a nonzero exit code. Because these tools sometimes
    /// print very long error strings to stderr, the resulting string contains
    /// only the first few hundred characters of the message.
    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    /// Failed to interpret tool output as a utf8 string.
    #[error("utf8 parsing/conversion failure")]
    Utf8Conversion,

    /// Ffprobe ran but its output could not be understood.
    #[error("error parsing ffprobe output: {0}")]
    ProbeParse(String),
}
