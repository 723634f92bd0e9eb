use serde::{Deserialize, Serialize};

/// A crop rectangle in original-frame coordinates.
///
/// Constructed from an unordered pair of detected edges; the two edge
/// arguments may be given in either order and produce the same rectangle.
/// Degenerate values (zero width, offsets outside the frame) are
/// representable on purpose. This type never rejects them; deciding whether
/// a rectangle is usable is the caller's job, with the frame width in hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u64,
    pub height: u32,
}

impl CropRect {
    #[must_use]
    pub fn from_edge_pair(frame_height: u32, edge_a: i64, edge_b: i64) -> Self {
        Self {
            x: edge_a.min(edge_b),
            y: 0,
            width: edge_a.abs_diff(edge_b),
            height: frame_height,
        }
    }

    /// True when the rectangle cannot select any pixels of a frame
    /// `frame_width` columns wide.
    #[must_use]
    pub fn is_degenerate(&self, frame_width: u32) -> bool {
        if self.width == 0 || self.x < 0 {
            return true;
        }

        self.x as u64 + self.width > u64::from(frame_width)
    }

    /// The geometry argument for ImageMagick's `-crop`, e.g. `200x50+100+0`.
    #[must_use]
    pub fn as_magick_geometry(&self) -> String {
        format!("{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
