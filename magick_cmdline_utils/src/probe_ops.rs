use std::{ffi::OsStr, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::magick_error_kind::MagickError;
use crate::magick_ops::{run_tool, ToolName};

/// Which stream kinds ffprobe found in a media file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamKinds {
    pub has_video: bool,
    pub has_audio: bool,
}

/// Use ffprobe to find out whether a file carries video and/or audio
/// streams. Still images report a single "video" stream and no audio, which
/// is exactly what callers deciding about an audio remux want to know.
pub fn probe_streams(src_path: impl AsRef<Path>) -> Result<StreamKinds, MagickError> {
    #[rustfmt::skip]
    let args = [
        OsStr::new("-v"),            OsStr::new("quiet"),
        OsStr::new("-show_streams"),
        OsStr::new("-print_format"), OsStr::new("json"),
        src_path.as_ref().as_os_str(),
    ];

    let stdout = run_tool(ToolName::Ffprobe, &args, None)?;
    let text = String::from_utf8(stdout).map_err(|_| MagickError::Utf8Conversion)?;

    parse_stream_kinds(&text)
}

fn parse_stream_kinds(text: &str) -> Result<StreamKinds, MagickError> {
    let parsed: Value = serde_json::from_str(text).map_err(|e| {
        //limit maximum number of characters
        MagickError::ProbeParse(format!("{e}").chars().take(500).collect::<String>())
    })?;

    let mut kinds = StreamKinds::default();

    if let Value::Array(streams) = &parsed["streams"] {
        for stream in streams {
            match stream["codec_type"].as_str() {
                Some("video") => kinds.has_video = true,
                Some("audio") => kinds.has_audio = true,
                _ => {}
            }
        }
    }

    Ok(kinds)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_video_with_audio() {
        let json = r#"{"streams": [
            {"index": 0, "codec_type": "video", "codec_name": "h264"},
            {"index": 1, "codec_type": "audio", "codec_name": "aac"}
        ]}"#;

        let exp = StreamKinds { has_video: true, has_audio: true };
        let act = parse_stream_kinds(json).unwrap();
        assert_eq!(exp, act);
    }

    #[test]
    fn test_parse_still_image() {
        let json = r#"{"streams": [{"index": 0, "codec_type": "video", "codec_name": "png"}]}"#;

        let exp = StreamKinds { has_video: true, has_audio: false };
        let act = parse_stream_kinds(json).unwrap();
        assert_eq!(exp, act);
    }

    #[test]
    fn test_parse_no_streams_key() {
        let act = parse_stream_kinds("{}").unwrap();
        assert_eq!(act, StreamKinds::default());
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        let act = parse_stream_kinds("not json");
        assert!(matches!(act, Err(MagickError::ProbeParse(_))));
    }
}
