//! Extraction report types.

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle around recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Horizontal center.
    pub center_x: i32,
    /// Vertical center.
    pub center_y: i32,
}

impl BoundingBox {
    /// Build a box from its left, top, right and bottom edges.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let width = right - left;
        let height = bottom - top;
        Self {
            x: left,
            y: top,
            width,
            height,
            center_x: left + width / 2,
            center_y: top + height / 2,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Smallest box containing every box in `boxes`, or `None` if empty.
    pub fn union<I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = BoundingBox>,
    {
        let mut iter = boxes.into_iter();
        let first = iter.next()?;

        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.right(), first.bottom());

        for b in iter {
            min_x = min_x.min(b.x);
            min_y = min_y.min(b.y);
            max_x = max_x.max(b.right());
            max_y = max_y.max(b.bottom());
        }

        Some(Self::from_edges(min_x, min_y, max_x, max_y))
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// One recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Line text.
    pub text: String,

    /// Position in the source image, when the engine reports geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

/// Result of one extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Image path as given by the user.
    pub path: String,
    /// Name of the backend that produced the text.
    pub engine: String,
    /// Language code passed to the backend.
    pub lang: String,
    /// Decoded image width.
    pub width: u32,
    /// Decoded image height.
    pub height: u32,
    /// Full recognized text.
    pub text: String,
    /// Recognized lines, in reading order.
    pub lines: Vec<TextLine>,
}

impl ExtractionReport {
    /// True when nothing but whitespace was recognized.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
