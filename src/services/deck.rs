//! The deck context: slide registry plus the active theme.
//!
//! Every operation the HTTP layer exposes is a method on [`Deck`]. The deck
//! is passed explicitly to whoever needs it; there is no global state.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::alignment::{
    self, find_title, AlignShapesRequest, AlignmentSummary, BulkPositionSummary,
    CompoundAlignment, ShapeRole,
};
use super::registry::{SlideId, SlideRegistry};
use crate::components::ComponentSpec;
use crate::error::{DeckError, DeckResult};
use crate::formatting::{apply_markdown, configure_textbox_frame};
use crate::models::{
    Bounds, PartialBounds, PlaceholderKind, RgbColor, Shape, ShapeKind, Slide, SlideLayout,
    StyleRole, TextFrame, Theme,
};

/// Default size of a synthesized title box.
const TITLE_BOX_SIZE: (f64, f64) = (8.0, 1.5);

/// Default size of a synthesized subtitle box.
const SUBTITLE_BOX_SIZE: (f64, f64) = (8.0, 1.0);

const BULLET_BOX: Bounds = Bounds::new(1.0, 2.0, 8.0, 4.0);
const TEXT_BOX: Bounds = Bounds::new(1.0, 1.0, 4.0, 1.0);
const IMAGE_BOX: Bounds = Bounds::new(1.0, 2.0, 5.0, 3.0);

/// Classification reported for each shape of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeClass {
    /// Declared title or title placeholder
    Title,
    /// Subtitle placeholder
    Subtitle,
    /// Any other placeholder
    Placeholder,
    /// Free-standing text box
    TextBox,
    /// Image
    Picture,
    /// Table
    Table,
    /// Preset geometry
    AutoShape,
}

/// Description of one shape on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInfo {
    /// Synthetic id derived from the z-order index
    pub shape_id: String,
    /// Z-order index
    pub shape_index: usize,
    /// Display name
    pub shape_name: String,
    /// Whether the shape carries a text frame
    pub has_text: bool,
    /// Paragraph texts joined with newlines
    pub text_content: String,
    /// Geometry in inches
    pub position: Bounds,
    /// Whether this is the slide's title
    pub is_title: bool,
    /// Whether this is a subtitle placeholder
    pub is_subtitle: bool,
    /// Classification
    pub shape_type: ShapeClass,
}

impl ShapeInfo {
    fn describe(index: usize, shape: &Shape, is_declared_title: bool) -> Self {
        let mut shape_type = match &shape.kind {
            ShapeKind::Placeholder { kind, .. } => match kind.ordinal() {
                1 => ShapeClass::Title,
                2 => ShapeClass::Subtitle,
                _ if *kind == PlaceholderKind::Subtitle => ShapeClass::Subtitle,
                _ => ShapeClass::Placeholder,
            },
            ShapeKind::TextBox => ShapeClass::TextBox,
            ShapeKind::Picture { .. } => ShapeClass::Picture,
            ShapeKind::Table { .. } => ShapeClass::Table,
            ShapeKind::AutoShape { .. } => ShapeClass::AutoShape,
        };
        if is_declared_title {
            shape_type = ShapeClass::Title;
        }

        Self {
            shape_id: format!("shape_{index}"),
            shape_index: index,
            shape_name: shape.name.clone(),
            has_text: shape.has_text_frame(),
            text_content: shape.text(),
            position: shape.bounds,
            is_title: shape_type == ShapeClass::Title,
            is_subtitle: shape_type == ShapeClass::Subtitle,
            shape_type,
        }
    }
}

/// Title text and geometry of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleCoordinates {
    /// Slide the title belongs to
    pub slide_id: SlideId,
    /// Always true; slides without a title produce an error instead
    pub has_title: bool,
    /// Current title text
    pub title_text: String,
    /// Title geometry in inches
    pub coordinates: Bounds,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    slides: Vec<Slide>,
}

/// Slides in presentation order together with the active theme.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    slides: SlideRegistry,
    theme: Theme,
}

impl Deck {
    /// Creates an empty deck using `theme`.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            slides: SlideRegistry::new(),
            theme,
        }
    }

    /// Creates an empty deck using the built-in theme named `key`.
    pub fn with_theme_name(key: &str) -> DeckResult<Self> {
        Theme::builtin(key)
            .map(Self::new)
            .ok_or(DeckError::ThemeNotFound)
    }

    /// Active theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Slide storage.
    #[must_use]
    pub const fn slides(&self) -> &SlideRegistry {
        &self.slides
    }

    /// Slide with the given id.
    pub fn slide(&self, id: SlideId) -> DeckResult<&Slide> {
        self.slides.get(id).ok_or(DeckError::SlideNotFound)
    }

    fn slide_mut(&mut self, id: SlideId) -> DeckResult<&mut Slide> {
        self.slides.get_mut(id).ok_or(DeckError::SlideNotFound)
    }

    // ------------------------------------------------------------------------
    // Slides and themes
    // ------------------------------------------------------------------------

    /// Appends a slide built from the layout at `layout_index`.
    ///
    /// The active theme paints the background and styles the declared title.
    pub fn create_slide(&mut self, layout_index: usize) -> DeckResult<SlideId> {
        let layout =
            SlideLayout::from_index(layout_index).ok_or(DeckError::InvalidLayout(layout_index))?;
        let mut slide = Slide::new(layout);
        self.theme.apply_to_slide(&mut slide);
        let id = self.slides.insert(slide);
        info!(%id, layout = layout.display_name(), "Created slide");
        Ok(id)
    }

    /// Appends a slide without placeholders.
    pub fn create_blank_slide(&mut self) -> SlideId {
        let mut slide = Slide::new(SlideLayout::Blank);
        self.theme.apply_to_slide(&mut slide);
        let id = self.slides.insert(slide);
        info!(%id, "Created blank slide");
        id
    }

    /// Removes a slide; later slides move up one number.
    pub fn delete_slide(&mut self, id: SlideId) -> DeckResult<()> {
        self.slides.remove(id).ok_or(DeckError::SlideNotFound)?;
        info!(%id, "Deleted slide");
        Ok(())
    }

    /// Slide ids in presentation order.
    #[must_use]
    pub fn slide_ids(&self) -> Vec<SlideId> {
        self.slides.ids()
    }

    /// Keys of the selectable themes.
    #[must_use]
    pub fn list_themes() -> Vec<&'static str> {
        Theme::BUILTIN_KEYS.to_vec()
    }

    /// Switches the active theme. Existing slides keep their styling.
    pub fn set_theme(&mut self, key: &str) -> DeckResult<()> {
        self.theme = Theme::builtin(key).ok_or(DeckError::ThemeNotFound)?;
        info!(theme = key, "Theme changed");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Text and media
    // ------------------------------------------------------------------------

    /// Writes markdown `text` into the slide title.
    ///
    /// Uses the declared title when the layout has one. Otherwise a text box
    /// is created at `position`, which must then carry at least `left` and
    /// `top`; missing extents default to 8in x 1.5in.
    pub fn add_title(&mut self, id: SlideId, text: &str, position: &PartialBounds) -> DeckResult<()> {
        let slide = self.slides.get_mut(id).ok_or(DeckError::SlideNotFound)?;
        let frame = match slide.title_position() {
            Some(index) => placeholder_frame(slide, index),
            None => synthesized_frame(slide, position, TITLE_BOX_SIZE),
        }
        .ok_or(DeckError::PositionRequired("title"))?;
        write_styled(frame, text, &self.theme, StyleRole::Title);
        Ok(())
    }

    /// Writes markdown `text` into the subtitle placeholder (index 1), or a
    /// new text box at `position` (default extent 8in x 1in).
    pub fn add_subtitle(
        &mut self,
        id: SlideId,
        text: &str,
        position: &PartialBounds,
    ) -> DeckResult<()> {
        let slide = self.slides.get_mut(id).ok_or(DeckError::SlideNotFound)?;
        let frame = match slide.placeholder_position(1) {
            Some(index) => placeholder_frame(slide, index),
            None => synthesized_frame(slide, position, SUBTITLE_BOX_SIZE),
        }
        .ok_or(DeckError::PositionRequired("subtitle"))?;
        write_styled(frame, text, &self.theme, StyleRole::Subtitle);
        Ok(())
    }

    /// Adds a text box with one markdown line per point.
    pub fn add_bullet_points(
        &mut self,
        id: SlideId,
        points: &[String],
        position: &PartialBounds,
    ) -> DeckResult<()> {
        let slide = self.slides.get_mut(id).ok_or(DeckError::SlideNotFound)?;
        let frame = new_text_box(slide, position.or(BULLET_BOX));
        write_styled(frame, &points.join("\n"), &self.theme, StyleRole::Bullet);
        Ok(())
    }

    /// Adds a body-styled markdown text box.
    pub fn add_text_box(
        &mut self,
        id: SlideId,
        text: &str,
        position: &PartialBounds,
    ) -> DeckResult<()> {
        let slide = self.slides.get_mut(id).ok_or(DeckError::SlideNotFound)?;
        let frame = new_text_box(slide, position.or(TEXT_BOX));
        write_styled(frame, text, &self.theme, StyleRole::Body);
        Ok(())
    }

    /// Adds a picture referencing `image_path`.
    pub fn add_image(
        &mut self,
        id: SlideId,
        image_path: &str,
        position: &PartialBounds,
    ) -> DeckResult<()> {
        let slide = self.slide_mut(id)?;
        slide.add_picture(image_path, position.or(IMAGE_BOX));
        Ok(())
    }

    /// Fills the slide background with a `#RRGGBB` color.
    pub fn set_background(&mut self, id: SlideId, hex: &str) -> DeckResult<RgbColor> {
        let color = RgbColor::from_hex(hex)?;
        self.slide_mut(id)?.background = Some(color);
        Ok(color)
    }

    /// Renders a component onto the slide with the active theme.
    pub fn add_component(&mut self, id: SlideId, component: &ComponentSpec) -> DeckResult<()> {
        let slide = self.slides.get_mut(id).ok_or(DeckError::SlideNotFound)?;
        component.render(slide, &self.theme);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Inspection and positioning
    // ------------------------------------------------------------------------

    /// Describes every shape on the slide in z-order.
    pub fn shapes(&self, id: SlideId) -> DeckResult<Vec<ShapeInfo>> {
        let slide = self.slide(id)?;
        let declared_title = slide.title_position();
        Ok(slide
            .shapes()
            .iter()
            .enumerate()
            .map(|(index, shape)| ShapeInfo::describe(index, shape, declared_title == Some(index)))
            .collect())
    }

    /// Moves and resizes the slide title.
    pub fn set_title_position(&mut self, id: SlideId, bounds: Bounds) -> DeckResult<Bounds> {
        let slide = self.slide_mut(id)?;
        let shape = find_title(slide)
            .and_then(|index| slide.shape_mut(index))
            .ok_or(DeckError::NoTitleShape)?;
        shape.bounds = bounds;
        debug!(%id, ?bounds, "Title repositioned");
        Ok(bounds)
    }

    /// Title text and geometry.
    pub fn title_coordinates(&self, id: SlideId) -> DeckResult<TitleCoordinates> {
        let slide = self.slide(id)?;
        let shape = find_title(slide)
            .map(|index| &slide.shapes()[index])
            .ok_or(DeckError::NoTitleShape)?;
        Ok(TitleCoordinates {
            slide_id: id,
            has_title: true,
            title_text: shape.text(),
            coordinates: shape.bounds,
        })
    }

    /// Applies the provided title fields to every listed slide number.
    pub fn set_bulk_title_positions(
        &mut self,
        slide_numbers: &[i64],
        position: &PartialBounds,
    ) -> BulkPositionSummary {
        alignment::set_bulk_title_positions(&mut self.slides, slide_numbers, position)
    }

    /// Aligns one role across slides.
    pub fn align_to_reference(
        &mut self,
        role: ShapeRole,
        reference: i64,
        targets: &[i64],
    ) -> DeckResult<AlignmentSummary> {
        alignment::align_to_reference(&mut self.slides, role, reference, targets)
    }

    /// Aligns several roles across slides.
    pub fn align_shapes(&mut self, request: &AlignShapesRequest) -> DeckResult<CompoundAlignment> {
        alignment::align_shapes(&mut self.slides, request)
    }

    // ------------------------------------------------------------------------
    // Whole presentation
    // ------------------------------------------------------------------------

    /// Drops every slide. The active theme is kept.
    pub fn reset(&mut self) {
        self.slides.clear();
        info!("Presentation reset");
    }

    /// Serializes all slides and encodes them as base64.
    pub fn export_snapshot(&self) -> DeckResult<String> {
        let snapshot = Snapshot {
            slides: self.slides.slides().cloned().collect(),
        };
        let json = serde_json::to_vec(&snapshot).map_err(|e| DeckError::Snapshot(e.to_string()))?;
        Ok(BASE64.encode(json))
    }

    /// Replaces every slide with the contents of a snapshot.
    ///
    /// Imported slides get fresh ids. On failure the deck is left untouched.
    pub fn import_snapshot(&mut self, encoded: &str) -> DeckResult<Vec<SlideId>> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| DeckError::Snapshot(e.to_string()))?;
        let snapshot: Snapshot =
            serde_json::from_slice(&bytes).map_err(|e| DeckError::Snapshot(e.to_string()))?;

        self.slides.clear();
        for slide in snapshot.slides {
            self.slides.insert(slide);
        }
        info!(slides = self.slides.len(), "Presentation imported");
        Ok(self.slides.ids())
    }
}

fn placeholder_frame(slide: &mut Slide, index: usize) -> Option<&mut TextFrame> {
    slide
        .shape_mut(index)
        .map(|shape| shape.text_frame.get_or_insert_with(TextFrame::default))
}

/// Text box at `position`, or `None` when `left` or `top` is missing.
fn synthesized_frame<'a>(
    slide: &'a mut Slide,
    position: &PartialBounds,
    (width, height): (f64, f64),
) -> Option<&'a mut TextFrame> {
    let (left, top) = position.left.zip(position.top)?;
    let bounds = Bounds::new(
        left,
        top,
        position.width.unwrap_or(width),
        position.height.unwrap_or(height),
    );
    Some(new_text_box(slide, bounds))
}

fn new_text_box(slide: &mut Slide, bounds: Bounds) -> &mut TextFrame {
    slide
        .add_textbox(bounds)
        .text_frame
        .get_or_insert_with(TextFrame::default)
}

fn write_styled(frame: &mut TextFrame, text: &str, theme: &Theme, role: StyleRole) {
    configure_textbox_frame(frame);
    apply_markdown(frame, text);
    theme.apply(role, frame);
}
