use std::{
    ffi::{OsStr, OsString},
    path::Path,
    process::{Command, Stdio},
};

use crate::magick_error_kind::MagickError;
use ToolName::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToolName {
    Convert,
    Ffmpeg,
    Ffprobe,
}

impl ToolName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Convert => "convert",
            Self::Ffmpeg => "ffmpeg",
            Self::Ffprobe => "ffprobe",
        }
    }
}

/// Extract the first frame of `src_path` into `dst_path`.
///
/// For plain single-frame images this is just a format conversion; for gifs,
/// animations and videos the `[0]` selector makes convert decode only the
/// first frame.
pub fn extract_first_frame(
    src_path: impl AsRef<Path>,
    dst_path: impl AsRef<Path>,
) -> Result<(), MagickError> {
    //convert's frame selector is appended to the file name itself
    let mut first_frame = src_path.as_ref().as_os_str().to_os_string();
    first_frame.push("[0]");

    let args = [first_frame.as_os_str(), dst_path.as_ref().as_os_str()];

    run_tool(Convert, &args, None).map(|_stdout| ())
}

/// Crop `src_path` to an ImageMagick geometry (`WxH+X+Y`), writing the result
/// to `dst_path`. `+repage` resets the canvas afterwards so the output does
/// not remember the pre-crop page size.
///
/// When `src_path` is a video, convert can need several gigabytes of
/// temporary space; `magick_tmpdir` lets callers point MAGICK_TMPDIR at a
/// filesystem with room for that.
pub fn crop_to_geometry(
    src_path: impl AsRef<Path>,
    dst_path: impl AsRef<Path>,
    geometry: &str,
    magick_tmpdir: Option<&Path>,
) -> Result<(), MagickError> {
    let geometry = OsString::from(geometry);

    #[rustfmt::skip]
    let args = [
        src_path.as_ref().as_os_str(),
        OsStr::new("-crop"), geometry.as_os_str(),
        OsStr::new("+repage"),
        dst_path.as_ref().as_os_str(),
    ];

    let env = magick_tmpdir.map(|dir| ("MAGICK_TMPDIR", dir.as_os_str()));

    run_tool(Convert, &args, env).map(|_stdout| ())
}

/// Copy the audio streams of `audio_src` next to the video stream of
/// `video_src`, writing the combination to `dst_path`.
///
/// Cropping a video through convert strips its audio; this puts the original
/// sound back without re-encoding either stream. `dst_path` must not already
/// exist (callers are expected to write to a scratch path and rename).
pub fn remux_audio(
    audio_src: impl AsRef<Path>,
    video_src: impl AsRef<Path>,
    dst_path: impl AsRef<Path>,
) -> Result<(), MagickError> {
    #[rustfmt::skip]
    let args = [
        OsStr::new("-hide_banner"),
        OsStr::new("-loglevel"), OsStr::new("warning"),
        OsStr::new("-nostats"),
        OsStr::new("-i"),        audio_src.as_ref().as_os_str(),
        OsStr::new("-i"),        video_src.as_ref().as_os_str(),
        OsStr::new("-map"),      OsStr::new("0:a"),
        OsStr::new("-map"),      OsStr::new("1:v"),
        OsStr::new("-c"),        OsStr::new("copy"),
        dst_path.as_ref().as_os_str(),
    ];

    run_tool(Ffmpeg, &args, None).map(|_stdout| ())
}

/// Check that every tool this crate shells out to is callable.
pub fn required_tools_are_callable() -> bool {
    for tool in [Convert, Ffmpeg, Ffprobe] {
        if run_tool(tool, &[OsStr::new("-version")], None).is_err() {
            return false;
        }
    }

    true
}

pub(crate) fn run_tool(
    name: ToolName,
    args: &[&OsStr],
    env: Option<(&str, &OsStr)>,
) -> Result<Vec<u8>, MagickError> {
    let mut command = Command::new(name.as_str());
    command.args(args).stdin(Stdio::null());

    if let Some((key, val)) = env {
        command.env(key, val);
    }

    let output = command.output().map_err(|e| match e.kind() {
        //the shell failed to execute the command. Separate out NotFound from
        //all other errors, as by far the most likely cause is that the tool
        //is not installed
        std::io::ErrorKind::NotFound => MagickError::CommandNotFound(name.as_str().to_string()),
        kind => MagickError::Io {
            tool: name.as_str().to_string(),
            error: format!("{kind:?}"),
        },
    })?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(truncate_tool_err_msg(name, &output.stderr))
    }
}

//these tools sometimes create very long error messages. Limit them to the
//first 500 characters
fn truncate_tool_err_msg(name: ToolName, stderr: &[u8]) -> MagickError {
    match std::str::from_utf8(stderr) {
        Ok(error_text) => MagickError::ToolFailed {
            tool: name.as_str().to_string(),
            stderr: error_text.chars().take(500).collect::<String>(),
        },
        Err(_) => MagickError::Utf8Conversion,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_err_msg_truncation() {
        let stderr = "x".repeat(2000);
        let act = truncate_tool_err_msg(Convert, stderr.as_bytes());

        match act {
            MagickError::ToolFailed { tool, stderr } => {
                assert_eq!(tool, "convert");
                assert_eq!(stderr.len(), 500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_utf8_stderr() {
        let act = truncate_tool_err_msg(Ffmpeg, &[0xff, 0xfe, 0x00]);
        assert!(matches!(act, MagickError::Utf8Conversion));
    }
}
