//! Box geometry on the slide canvas.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_BOX_EXTENT, SLIDE_HEIGHT, SLIDE_WIDTH};

/// Position and size of a shape, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Distance from the left canvas edge
    pub left: f64,
    /// Distance from the top canvas edge
    pub top: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Bounds {
    /// Creates bounds without any clamping.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Constrains a requested box to the canvas.
    ///
    /// The origin is pulled onto the canvas first, then the extent is held
    /// between [`MIN_BOX_EXTENT`] and the space remaining to the right and
    /// bottom edges. Out-of-range requests are corrected, never rejected.
    ///
    /// ```
    /// use deckwright::models::Bounds;
    ///
    /// let b = Bounds::clamped(-5.0, -5.0, 100.0, 100.0);
    /// assert_eq!(b, Bounds::new(0.0, 0.0, 10.0, 7.5));
    /// ```
    #[must_use]
    pub fn clamped(left: f64, top: f64, width: f64, height: f64) -> Self {
        let left = left.clamp(0.0, SLIDE_WIDTH);
        let top = top.clamp(0.0, SLIDE_HEIGHT);
        // min-then-max: a box pinned at the far edge keeps the 1in minimum
        let width = width.min(SLIDE_WIDTH - left).max(MIN_BOX_EXTENT);
        let height = height.min(SLIDE_HEIGHT - top).max(MIN_BOX_EXTENT);
        Self::new(left, top, width, height)
    }

    /// Re-clamps existing bounds.
    #[must_use]
    pub fn clamp(self) -> Self {
        Self::clamped(self.left, self.top, self.width, self.height)
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge (`left + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Bounds where every field is optional, as accepted by positioning requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialBounds {
    /// Distance from the left canvas edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    /// Distance from the top canvas edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Horizontal extent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Vertical extent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PartialBounds {
    /// Overwrites only the fields that are present.
    pub fn apply_to(&self, bounds: &mut Bounds) {
        if let Some(left) = self.left {
            bounds.left = left;
        }
        if let Some(top) = self.top {
            bounds.top = top;
        }
        if let Some(width) = self.width {
            bounds.width = width;
        }
        if let Some(height) = self.height {
            bounds.height = height;
        }
    }

    /// Fills missing fields from `defaults`.
    #[must_use]
    pub fn or(&self, defaults: Bounds) -> Bounds {
        let mut bounds = defaults;
        self.apply_to(&mut bounds);
        bounds
    }
}

impl From<Bounds> for PartialBounds {
    fn from(b: Bounds) -> Self {
        Self {
            left: Some(b.left),
            top: Some(b.top),
            width: Some(b.width),
            height: Some(b.height),
        }
    }
}
