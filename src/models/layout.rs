//! Slide templates and their placeholder geometry.

use serde::{Deserialize, Serialize};

use super::document::PlaceholderKind;
use super::geometry::Bounds;

/// Placeholder slot defined by a slide layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderSpec {
    /// Index within the layout (0 is always the title)
    pub idx: u32,
    /// Semantic type
    pub kind: PlaceholderKind,
    /// Display name prefix
    pub name: &'static str,
    /// Default geometry
    pub bounds: Bounds,
}

const fn slot(idx: u32, kind: PlaceholderKind, name: &'static str, bounds: Bounds) -> PlaceholderSpec {
    PlaceholderSpec {
        idx,
        kind,
        name,
        bounds,
    }
}

const TITLE_BAR: Bounds = Bounds::new(0.5, 0.3, 9.0, 1.25);
const FULL_CONTENT: Bounds = Bounds::new(0.5, 1.75, 9.0, 4.95);
const LEFT_CONTENT: Bounds = Bounds::new(0.5, 1.75, 4.42, 4.95);
const RIGHT_CONTENT: Bounds = Bounds::new(5.08, 1.75, 4.42, 4.95);

/// Built-in slide layouts, addressed by their template index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideLayout {
    /// 0: centered title and subtitle
    TitleSlide,
    /// 1: title and one content area
    TitleAndContent,
    /// 2: section heading with a short body
    SectionHeader,
    /// 3: title and two content areas
    TwoContent,
    /// 4: title and two captioned content areas
    Comparison,
    /// 5: title only
    TitleOnly,
    /// 6: no placeholders
    Blank,
    /// 7: content with a caption column
    ContentWithCaption,
    /// 8: picture with a caption
    PictureWithCaption,
}

impl SlideLayout {
    /// All layouts in template order.
    pub const ALL: [Self; 9] = [
        Self::TitleSlide,
        Self::TitleAndContent,
        Self::SectionHeader,
        Self::TwoContent,
        Self::Comparison,
        Self::TitleOnly,
        Self::Blank,
        Self::ContentWithCaption,
        Self::PictureWithCaption,
    ];

    /// Looks up a layout by template index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Template index of this layout.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or_default()
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TitleSlide => "Title Slide",
            Self::TitleAndContent => "Title and Content",
            Self::SectionHeader => "Section Header",
            Self::TwoContent => "Two Content",
            Self::Comparison => "Comparison",
            Self::TitleOnly => "Title Only",
            Self::Blank => "Blank",
            Self::ContentWithCaption => "Content with Caption",
            Self::PictureWithCaption => "Picture with Caption",
        }
    }

    /// Placeholders instantiated on a new slide of this layout.
    #[must_use]
    pub fn placeholders(self) -> Vec<PlaceholderSpec> {
        use PlaceholderKind as K;

        match self {
            Self::TitleSlide => vec![
                slot(0, K::CenterTitle, "Title", Bounds::new(0.75, 2.33, 8.5, 1.61)),
                slot(1, K::Subtitle, "Subtitle", Bounds::new(1.5, 4.25, 7.0, 1.92)),
            ],
            Self::TitleAndContent => vec![
                slot(0, K::Title, "Title", TITLE_BAR),
                slot(1, K::Object, "Content Placeholder", FULL_CONTENT),
            ],
            Self::SectionHeader => vec![
                slot(0, K::Title, "Title", Bounds::new(0.79, 4.82, 8.5, 1.49)),
                slot(1, K::Body, "Text Placeholder", Bounds::new(0.79, 3.18, 8.5, 1.64)),
            ],
            Self::TwoContent => vec![
                slot(0, K::Title, "Title", TITLE_BAR),
                slot(1, K::Object, "Content Placeholder", LEFT_CONTENT),
                slot(2, K::Object, "Content Placeholder", RIGHT_CONTENT),
            ],
            Self::Comparison => vec![
                slot(0, K::Title, "Title", TITLE_BAR),
                slot(1, K::Body, "Text Placeholder", Bounds::new(0.5, 1.68, 4.42, 0.7)),
                slot(2, K::Object, "Content Placeholder", Bounds::new(0.5, 2.38, 4.42, 4.32)),
                slot(3, K::Body, "Text Placeholder", Bounds::new(5.08, 1.68, 4.42, 0.7)),
                slot(4, K::Object, "Content Placeholder", Bounds::new(5.08, 2.38, 4.42, 4.32)),
            ],
            Self::TitleOnly => vec![slot(0, K::Title, "Title", TITLE_BAR)],
            Self::Blank => Vec::new(),
            Self::ContentWithCaption => vec![
                slot(0, K::Title, "Title", Bounds::new(0.5, 0.3, 3.29, 1.27)),
                slot(1, K::Object, "Content Placeholder", Bounds::new(3.91, 0.3, 5.59, 6.4)),
                slot(2, K::Body, "Text Placeholder", Bounds::new(0.5, 1.57, 3.29, 5.13)),
            ],
            Self::PictureWithCaption => vec![
                slot(0, K::Title, "Title", Bounds::new(1.96, 5.25, 6.0, 0.62)),
                slot(1, K::Picture, "Picture Placeholder", Bounds::new(1.96, 0.67, 6.0, 4.5)),
                slot(2, K::Body, "Text Placeholder", Bounds::new(1.96, 5.87, 6.0, 0.88)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SLIDE_HEIGHT, SLIDE_WIDTH};

    #[test]
    fn test_index_roundtrip() {
        for (i, layout) in SlideLayout::ALL.iter().enumerate() {
            assert_eq!(SlideLayout::from_index(i), Some(*layout));
            assert_eq!(layout.index(), i);
        }
        assert_eq!(SlideLayout::from_index(9), None);
    }

    #[test]
    fn test_every_titled_layout_uses_index_zero() {
        for layout in SlideLayout::ALL {
            for spec in layout.placeholders() {
                let is_title = matches!(spec.kind, PlaceholderKind::Title | PlaceholderKind::CenterTitle);
                assert_eq!(is_title, spec.idx == 0, "{layout:?}");
            }
        }
    }

    #[test]
    fn test_placeholders_fit_canvas() {
        for layout in SlideLayout::ALL {
            for spec in layout.placeholders() {
                assert!(spec.bounds.right() <= SLIDE_WIDTH, "{layout:?} {}", spec.name);
                assert!(spec.bounds.bottom() <= SLIDE_HEIGHT, "{layout:?} {}", spec.name);
            }
        }
    }
}
