//! In-memory slide document model.
//!
//! Slides own shapes; shapes own text frames made of paragraphs and runs.
//! Geometry is kept in inches. Font properties are optional at every level:
//! `None` inherits from the enclosing paragraph (for runs) or from the
//! template (for paragraphs).

use serde::{Deserialize, Serialize};

use super::geometry::Bounds;
use super::layout::SlideLayout;
use super::rgb::RgbColor;

// ============================================================================
// Text
// ============================================================================

/// Character formatting. Unset fields inherit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Typeface name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bold weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Italic slant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Text color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,
}

/// A contiguous span of identically formatted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Literal text
    pub text: String,
    /// Run-level overrides
    #[serde(default)]
    pub font: Font,
}

impl Run {
    /// Creates an unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
        }
    }

    /// Creates a run with the given overrides.
    pub fn styled(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
        }
    }
}

/// One paragraph of a text frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs in reading order
    pub runs: Vec<Run>,
    /// Paragraph-level default formatting
    #[serde(default)]
    pub font: Font,
    /// Outline level (0 = top)
    #[serde(default)]
    pub level: u8,
    /// Whether a bullet glyph is shown
    #[serde(default)]
    pub bullet: bool,
}

impl Paragraph {
    /// Creates a paragraph holding a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            ..Self::default()
        }
    }

    /// Concatenated text of all runs.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Replaces the content with a single plain run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.runs = vec![Run::plain(text)];
    }
}

/// How a text frame reacts to overflowing content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoSize {
    /// Neither shape nor text is resized
    None,
    /// Shape grows to fit its text
    #[default]
    ShapeToFitText,
    /// Text shrinks to fit its shape
    TextToFitShape,
}

/// Vertical placement of text inside its frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAnchor {
    /// Top aligned
    #[default]
    Top,
    /// Centered
    Middle,
    /// Bottom aligned
    Bottom,
}

/// Inner margins of a text frame, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    /// Top margin
    pub top: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
    /// Right margin
    pub right: f64,
}

impl Insets {
    /// Same margin on all four sides.
    #[must_use]
    pub const fn uniform(inches: f64) -> Self {
        Self {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        }
    }
}

impl Default for Insets {
    fn default() -> Self {
        // document-format defaults: 0.05in top/bottom, 0.1in left/right
        Self {
            top: 0.05,
            bottom: 0.05,
            left: 0.1,
            right: 0.1,
        }
    }
}

/// Text container attached to a shape or table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    /// Paragraphs in reading order
    pub paragraphs: Vec<Paragraph>,
    /// Wrap lines at the frame edge
    pub word_wrap: bool,
    /// Overflow behavior
    pub auto_size: AutoSize,
    /// Vertical placement
    pub vertical_anchor: VerticalAnchor,
    /// Inner margins
    pub margins: Insets,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            word_wrap: false,
            auto_size: AutoSize::default(),
            vertical_anchor: VerticalAnchor::default(),
            margins: Insets::default(),
        }
    }
}

impl TextFrame {
    /// Removes every paragraph.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }

    /// Appends an empty paragraph and returns it.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::default());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// Replaces the content with one plain paragraph per line of `text`.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text.split('\n').map(Paragraph::with_text).collect();
    }

    /// Paragraph texts joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Semantic type of a template placeholder.
///
/// Ordinals follow the document format's placeholder type numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    /// Slide title
    Title,
    /// Body text
    Body,
    /// Centered title on title slides
    CenterTitle,
    /// Subtitle
    Subtitle,
    /// Generic content slot
    Object,
    /// Picture slot
    Picture,
}

impl PlaceholderKind {
    /// Document-format ordinal of this placeholder type.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Title => 1,
            Self::Body => 2,
            Self::CenterTitle => 3,
            Self::Subtitle => 4,
            Self::Object => 7,
            Self::Picture => 18,
        }
    }
}

/// Preset geometry of an auto shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoShapeType {
    /// Rectangle (also used for thin rules)
    Rectangle,
    /// Rounded rectangle
    RoundedRectangle,
    /// Ellipse
    Oval,
}

/// Grid of text cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: usize,
    cols: usize,
    cells: Vec<TextFrame>,
}

impl Table {
    /// Creates a table with empty cells.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![TextFrame::default(); rows * cols],
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&TextFrame> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Mutable cell at `(row, col)`.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TextFrame> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }
}

/// What a shape is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Template-defined slot
    Placeholder {
        /// Index within the slide layout
        idx: u32,
        /// Semantic type
        kind: PlaceholderKind,
    },
    /// Free-standing text box
    TextBox,
    /// Preset geometry
    AutoShape {
        /// Preset
        preset: AutoShapeType,
    },
    /// Image reference
    Picture {
        /// Source image location
        image_path: String,
    },
    /// Table graphic frame
    Table {
        /// Cells
        table: Table,
    },
}

/// A positioned element on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Identifier unique within the slide
    pub id: u32,
    /// Display name
    pub name: String,
    /// Shape category
    pub kind: ShapeKind,
    /// Position and size
    pub bounds: Bounds,
    /// Text content, for text-capable shapes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_frame: Option<TextFrame>,
    /// Solid fill color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<RgbColor>,
}

impl Shape {
    /// Whether the shape carries a text frame.
    #[must_use]
    pub const fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }

    /// Placeholder index and type, if this is a placeholder.
    #[must_use]
    pub const fn placeholder(&self) -> Option<(u32, PlaceholderKind)> {
        match self.kind {
            ShapeKind::Placeholder { idx, kind } => Some((idx, kind)),
            _ => None,
        }
    }

    /// Text content, or an empty string for shapes without text.
    #[must_use]
    pub fn text(&self) -> String {
        self.text_frame
            .as_ref()
            .map(TextFrame::text)
            .unwrap_or_default()
    }

    /// Mutable text frame, for text-capable shapes.
    pub fn text_frame_mut(&mut self) -> Option<&mut TextFrame> {
        self.text_frame.as_mut()
    }

    /// Table cells, if this is a table.
    pub fn table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.kind {
            ShapeKind::Table { table } => Some(table),
            _ => None,
        }
    }
}

// ============================================================================
// Slides
// ============================================================================

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Template the slide was created from
    pub layout: SlideLayout,
    /// Shapes in z-order
    shapes: Vec<Shape>,
    /// Solid background fill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<RgbColor>,
}

impl Slide {
    /// Creates a slide populated with the layout's placeholders.
    #[must_use]
    pub fn new(layout: SlideLayout) -> Self {
        let mut slide = Self {
            layout,
            shapes: Vec::new(),
            background: None,
        };
        for spec in layout.placeholders() {
            slide.push_shape(
                spec.name.to_string(),
                ShapeKind::Placeholder {
                    idx: spec.idx,
                    kind: spec.kind,
                },
                spec.bounds,
                Some(TextFrame {
                    word_wrap: true,
                    ..TextFrame::default()
                }),
            );
        }
        slide
    }

    /// One past the highest shape id on the slide, or the lowest free id
    /// when that would overflow. Ids start at 2.
    fn next_shape_id(&self) -> u32 {
        let highest = self.shapes.iter().map(|s| s.id).max().unwrap_or(1);
        highest.checked_add(1).unwrap_or_else(|| {
            (2..=u32::MAX)
                .find(|id| self.shapes.iter().all(|s| s.id != *id))
                .unwrap_or(u32::MAX)
        })
    }

    fn push_shape(
        &mut self,
        name: String,
        kind: ShapeKind,
        bounds: Bounds,
        text_frame: Option<TextFrame>,
    ) -> &mut Shape {
        let id = self.next_shape_id();
        self.shapes.push(Shape {
            id,
            name: format!("{name} {}", id.saturating_sub(1)),
            kind,
            bounds,
            text_frame,
            fill: None,
        });
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Adds an empty text box.
    pub fn add_textbox(&mut self, bounds: Bounds) -> &mut Shape {
        self.push_shape(
            "TextBox".to_string(),
            ShapeKind::TextBox,
            bounds,
            Some(TextFrame::default()),
        )
    }

    /// Adds a picture referencing `image_path`.
    pub fn add_picture(&mut self, image_path: impl Into<String>, bounds: Bounds) -> &mut Shape {
        self.push_shape(
            "Picture".to_string(),
            ShapeKind::Picture {
                image_path: image_path.into(),
            },
            bounds,
            None,
        )
    }

    /// Adds a table with empty cells.
    pub fn add_table(&mut self, rows: usize, cols: usize, bounds: Bounds) -> &mut Shape {
        self.push_shape(
            "Table".to_string(),
            ShapeKind::Table {
                table: Table::new(rows, cols),
            },
            bounds,
            None,
        )
    }

    /// Adds an auto shape. Auto shapes always carry a (possibly empty) text frame.
    pub fn add_shape(&mut self, preset: AutoShapeType, bounds: Bounds) -> &mut Shape {
        self.push_shape(
            "AutoShape".to_string(),
            ShapeKind::AutoShape { preset },
            bounds,
            Some(TextFrame::default()),
        )
    }

    /// All shapes in z-order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable shape at `index`.
    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    /// Position of the first placeholder with layout index `idx`.
    #[must_use]
    pub fn placeholder_position(&self, idx: u32) -> Option<usize> {
        self.shapes
            .iter()
            .position(|s| s.placeholder().is_some_and(|(i, _)| i == idx))
    }

    /// Position of the slide's declared title (placeholder index 0).
    #[must_use]
    pub fn title_position(&self) -> Option<usize> {
        self.placeholder_position(0)
    }

    /// The declared title shape.
    #[must_use]
    pub fn title(&self) -> Option<&Shape> {
        self.title_position().map(|i| &self.shapes[i])
    }

    /// Mutable declared title shape.
    pub fn title_mut(&mut self) -> Option<&mut Shape> {
        self.title_position().map(move |i| &mut self.shapes[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_slide_has_title_and_subtitle_placeholders() {
        let slide = Slide::new(SlideLayout::TitleSlide);
        let title = slide.title().expect("title placeholder");
        assert_eq!(title.placeholder(), Some((0, PlaceholderKind::CenterTitle)));
        let sub = slide.placeholder_position(1).expect("subtitle placeholder");
        assert_eq!(
            slide.shapes()[sub].placeholder(),
            Some((1, PlaceholderKind::Subtitle))
        );
    }

    #[test]
    fn test_blank_slide_is_empty() {
        let slide = Slide::new(SlideLayout::Blank);
        assert!(slide.shapes().is_empty());
        assert!(slide.title().is_none());
    }

    #[test]
    fn test_shape_ids_are_unique() {
        let mut slide = Slide::new(SlideLayout::TitleOnly);
        slide.add_textbox(Bounds::new(1.0, 1.0, 2.0, 1.0));
        slide.add_shape(AutoShapeType::Rectangle, Bounds::new(1.0, 3.0, 2.0, 1.0));
        let mut ids: Vec<u32> = slide.shapes().iter().map(|s| s.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_shape_ids_follow_highest_existing_id() {
        let mut slide = Slide::new(SlideLayout::Blank);
        slide.add_textbox(Bounds::new(1.0, 1.0, 2.0, 1.0)).id = 40;
        let added = slide.add_textbox(Bounds::new(1.0, 3.0, 2.0, 1.0));
        assert_eq!(added.id, 41);
        assert_eq!(added.name, "TextBox 40");
    }

    #[test]
    fn test_shape_id_overflow_reuses_free_id() {
        let mut slide = Slide::new(SlideLayout::TitleOnly);
        slide.add_textbox(Bounds::new(1.0, 1.0, 2.0, 1.0)).id = u32::MAX;
        let added = slide.add_textbox(Bounds::new(1.0, 3.0, 2.0, 1.0)).id;
        assert_eq!(added, 3);
        let ids: Vec<u32> = slide.shapes().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, u32::MAX, 3]);
    }

    #[test]
    fn test_text_frame_set_text_splits_lines() {
        let mut tf = TextFrame::default();
        tf.set_text("a\nb");
        assert_eq!(tf.paragraphs.len(), 2);
        assert_eq!(tf.text(), "a\nb");
        tf.clear();
        assert!(tf.paragraphs.is_empty());
    }

    #[test]
    fn test_table_cells_are_bounds_checked() {
        let mut table = Table::new(2, 3);
        assert!(table.cell_mut(1, 2).is_some());
        assert!(table.cell(2, 0).is_none());
        assert!(table.cell(0, 3).is_none());
    }
}
