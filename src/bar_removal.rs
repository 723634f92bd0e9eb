use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use magick_cmdline_utils::{
    crop_to_geometry, extract_first_frame, probe_streams, remux_audio, MagickError,
};

use crate::bar_detect::detector::{BarDetector, DetectionCfg};
use crate::bar_detect::detect_error_kind::BarDetectError;
use crate::crop_rect::CropRect;

/// Options for the end-to-end removal flow.
#[derive(Debug, Clone, Default)]
pub struct RemovalCfg {
    /// The detection pipeline's knobs.
    pub detection: DetectionCfg,

    /// Log the intermediate detection values. Threaded through explicitly;
    /// nothing in the pipeline consults process-wide state.
    pub debug: bool,

    /// When set, save a plot of the raw vs smoothed column profile into this
    /// directory (named after the source file). Implies nothing else; purely
    /// a debugging aid.
    pub plot_dir: Option<PathBuf>,

    /// Passed to convert as MAGICK_TMPDIR. Cropping a video can need several
    /// gigabytes of temporary space, which may not fit in the default tmp.
    pub magick_tmpdir: Option<PathBuf>,

    /// Copy the source's audio back onto the cropped output when the source
    /// is a video with sound (convert strips audio while cropping).
    pub restore_audio: bool,
}

impl RemovalCfg {
    #[must_use]
    pub fn from_detection_cfg(detection: DetectionCfg) -> Self {
        Self {
            detection,
            restore_audio: true,
            ..Self::default()
        }
    }
}

/// Error type for the various reasons why bars could not be removed from a
/// source file.
#[derive(Error, Debug)]
pub enum BarRemovalError {
    /// The detection pipeline rejected the extracted frame.
    #[error("bar detection failed for {src_path}: {error}")]
    Detect {
        src_path: PathBuf,
        #[source]
        error: BarDetectError,
    },

    /// One of the external tools (convert/ffmpeg/ffprobe) failed.
    #[error("external tool failure while processing {src_path}: {error}")]
    Tool {
        src_path: PathBuf,
        #[source]
        error: MagickError,
    },

    /// The extracted still frame could not be decoded.
    #[error("failed to load extracted frame {path}: {error}")]
    FrameLoad {
        path: PathBuf,
        #[source]
        error: image::ImageError,
    },

    /// The profile plot could not be written.
    #[error("failed to save profile plot {path}: {error}")]
    PlotSave {
        path: PathBuf,
        #[source]
        error: image::ImageError,
    },

    /// Filesystem housekeeping (renaming the remuxed scratch file) failed.
    #[error("io error at {path}: {error}")]
    Io { path: PathBuf, error: String },
}

/// Detect the bars of `src_path` and write a cropped copy to `dst_path`.
///
/// The flow mirrors how one would do this by hand: extract a representative
/// still frame, run the detection pipeline on it, then crop the *original*
/// source (not the extracted frame) to the detected rectangle, and finally
/// put the audio back if the source was a video with sound.
///
/// Returns the applied crop rectangle.
pub fn remove_bars(
    src_path: impl AsRef<Path>,
    dst_path: impl AsRef<Path>,
    cfg: &RemovalCfg,
) -> Result<CropRect, BarRemovalError> {
    let src_path = src_path.as_ref();
    let dst_path = dst_path.as_ref();

    let tool_err = |error| BarRemovalError::Tool {
        src_path: src_path.to_path_buf(),
        error,
    };

    //frames go through a scratch file because convert owns the decoding of
    //arbitrary formats. Lossless format on purpose: jpeg artifacts would add
    //phantom texture to perfectly flat bars
    let scratch_frame = scratch_frame_path();
    extract_first_frame(src_path, &scratch_frame).map_err(tool_err)?;

    let loaded = image::open(&scratch_frame);
    let _remove_error = std::fs::remove_file(&scratch_frame);
    let frame = loaded
        .map_err(|error| BarRemovalError::FrameLoad {
            path: scratch_frame.clone(),
            error,
        })?
        .to_luma8();

    if cfg.debug {
        debug!(
            "processing {}: extracted frame is {}x{}",
            src_path.display(),
            frame.width(),
            frame.height()
        );
    }

    let detector = BarDetector::from_cfg(cfg.detection);
    let (crop, diagnostics) = detector
        .detect_with_diagnostics(&frame)
        .map_err(|error| BarRemovalError::Detect {
            src_path: src_path.to_path_buf(),
            error,
        })?;

    if cfg.debug {
        debug!(
            "edges for {}: rising {}, falling {}",
            src_path.display(),
            diagnostics.edges.rising,
            diagnostics.edges.falling
        );
    }

    if let Some(plot_dir) = &cfg.plot_dir {
        let plot_path = profile_plot_path(plot_dir, src_path);
        diagnostics
            .render_profile_plot()
            .save(&plot_path)
            .map_err(|error| BarRemovalError::PlotSave { path: plot_path, error })?;
    }

    let geometry = crop.as_magick_geometry();
    info!("cropping {} to {geometry}", src_path.display());
    crop_to_geometry(src_path, dst_path, &geometry, cfg.magick_tmpdir.as_deref())
        .map_err(tool_err)?;

    if cfg.restore_audio {
        let kinds = probe_streams(src_path).map_err(tool_err)?;
        if kinds.has_video && kinds.has_audio {
            restore_audio(src_path, dst_path)?;
        }
    }

    Ok(crop)
}

//remux into a scratch file beside the destination, then rename over it.
//(beside it, so the rename cannot cross filesystems)
fn restore_audio(src_path: &Path, dst_path: &Path) -> Result<(), BarRemovalError> {
    let scratch = scratch_remux_path(dst_path);

    remux_audio(src_path, dst_path, &scratch).map_err(|error| BarRemovalError::Tool {
        src_path: src_path.to_path_buf(),
        error,
    })?;

    std::fs::rename(&scratch, dst_path).map_err(|e| BarRemovalError::Io {
        path: dst_path.to_path_buf(),
        error: format!("{e}"),
    })
}

//unique names so concurrent invocations cannot collide
fn scratch_frame_path() -> PathBuf {
    std::env::temp_dir().join(format!("bar_remover_frame_{:016x}.png", rand::random::<u64>()))
}

fn scratch_remux_path(dst_path: &Path) -> PathBuf {
    let ext = dst_path
        .extension()
        .map_or_else(|| "mp4".to_string(), |e| e.to_string_lossy().into_owned());

    dst_path.with_extension(format!("remux_{:016x}.{ext}", rand::random::<u64>()))
}

fn profile_plot_path(plot_dir: &Path, src_path: &Path) -> PathBuf {
    let stem = src_path
        .file_stem()
        .map_or_else(|| "frame".to_string(), |s| s.to_string_lossy().into_owned());

    plot_dir.join(format!("{stem}_profile.png"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_scratch_paths_are_unique() {
        assert_ne!(scratch_frame_path(), scratch_frame_path());
    }

    #[test]
    fn test_remux_scratch_keeps_extension_and_dir() {
        let dst = Path::new("/videos/out.mp4");
        let scratch = scratch_remux_path(dst);

        assert_eq!(scratch.parent(), dst.parent());
        assert_eq!(scratch.extension().unwrap(), "mp4");
        assert_ne!(scratch, dst);
    }

    #[test]
    fn test_plot_path_uses_source_stem() {
        let act = profile_plot_path(Path::new("/plots"), Path::new("/media/clip.webm"));
        assert_eq!(act, Path::new("/plots/clip_profile.png"));
    }
}
