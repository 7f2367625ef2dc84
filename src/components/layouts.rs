//! Layout functions, one per component kind.
//!
//! Every function reads its own content keys, applies its default box,
//! clamps it to the canvas and adds shapes to the slide. Collection-driven
//! layouts return without adding anything when the collection is empty.

use super::Content;
use crate::formatting::configure_textbox_frame;
use crate::models::{
    AutoShapeType, Bounds, Font, Paragraph, RgbColor, Slide, StyleRole, TextFrame, Theme,
};

/// Fallback title box used when the slide has no title placeholder.
const TITLE_BOX: Bounds = Bounds::new(1.0, 0.5, 8.0, 1.0);

/// Width of a single timeline milestone label.
const MILESTONE_WIDTH: f64 = 1.2;

/// Horizontal gap left between process flow boxes.
const STEP_GAP: f64 = 0.2;

/// Characters per square inch used to estimate quote capacity.
const QUOTE_CHARS_PER_SQ_INCH: f64 = 20.0;

/// Height of the rule under a section divider title.
const DIVIDER_RULE_HEIGHT: f64 = 0.05;

/// Offset of the divider rule below the title box top.
const DIVIDER_RULE_OFFSET: f64 = 1.5;

fn font(size: f64, bold: Option<bool>, italic: Option<bool>) -> Font {
    Font {
        size: Some(size),
        bold,
        italic,
        ..Font::default()
    }
}

fn styled_paragraph(text: impl Into<String>, font: Font) -> Paragraph {
    Paragraph {
        font,
        ..Paragraph::with_text(text)
    }
}

/// Adds a text box and returns its (empty) text frame.
fn text_box(slide: &mut Slide, bounds: Bounds) -> &mut TextFrame {
    slide
        .add_textbox(bounds)
        .text_frame
        .get_or_insert_with(TextFrame::default)
}

/// Writes the title into the slide's title placeholder, or into a new text
/// box at `fallback` when there is none.
fn place_title(slide: &mut Slide, text: &str, theme: &Theme, fallback: Bounds) {
    let frame = match slide.title_position() {
        Some(index) => slide
            .shape_mut(index)
            .and_then(|shape| shape.text_frame.as_mut()),
        None => Some(text_box(slide, fallback)),
    };

    if let Some(frame) = frame {
        frame.set_text(text);
        theme.apply(StyleRole::Title, frame);
    }
}

/// Title at the top, picture in an 8x5in box below it.
pub fn header_with_image(slide: &mut Slide, content: &Content, theme: &Theme) {
    place_title(slide, &content.text("title"), theme, TITLE_BOX);

    let image_path = content.text("image_path");
    if !image_path.is_empty() {
        slide.add_picture(image_path, Bounds::clamped(1.0, 2.0, 8.0, 5.0));
    }
}

/// Title plus one plain paragraph per point, in the body placeholder when
/// the layout has one.
pub fn bullet_with_title(slide: &mut Slide, content: &Content, theme: &Theme) {
    place_title(slide, &content.text("title"), theme, TITLE_BOX);

    let points = content.strings("points");
    if points.is_empty() {
        return;
    }

    let frame = match slide.placeholder_position(1) {
        Some(index) => slide
            .shape_mut(index)
            .and_then(|shape| shape.text_frame.as_mut()),
        None => Some(text_box(slide, Bounds::clamped(1.0, 1.5, 8.0, 4.0))),
    };
    let Some(frame) = frame else { return };

    frame.clear();
    for point in points {
        frame.add_paragraph().set_text(point);
    }
    theme.apply(StyleRole::Bullet, frame);
}

/// Title spanning two body-styled columns separated by `column_gap`.
pub fn two_column_text(slide: &mut Slide, content: &Content, theme: &Theme) {
    let bounds = content.bounds(Bounds::new(1.0, 1.0, 4.0, 4.0));
    let gap = content.number("column_gap", 0.5);

    let title_box = Bounds::new(
        bounds.left,
        bounds.top - 0.5,
        bounds.width * 2.0 + gap,
        1.0,
    );
    place_title(slide, &content.text("title"), theme, title_box);

    let columns = [
        (content.text("left_text"), bounds.left),
        (content.text("right_text"), bounds.left + bounds.width + gap),
    ];
    for (text, left) in columns {
        if text.is_empty() {
            continue;
        }
        let frame = text_box(
            slide,
            Bounds::new(left, bounds.top + 1.0, bounds.width, bounds.height),
        );
        configure_textbox_frame(frame);
        frame.paragraphs = vec![Paragraph::with_text(text)];
        theme.apply(StyleRole::Body, frame);
    }
}

/// Table sized to `data`; the first row is treated as a header and bolded.
pub fn comparison_table(slide: &mut Slide, content: &Content) {
    let data = content.rows("data");
    let rows = data.len();
    let cols = data.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return;
    }

    let bounds = content.bounds(Bounds::new(1.0, 2.0, 8.0, 3.0));
    let Some(table) = slide.add_table(rows, cols, bounds).table_mut() else {
        return;
    };

    for (r, row) in data.iter().enumerate() {
        for (c, cell_text) in row.iter().enumerate() {
            let Some(cell) = table.cell_mut(r, c) else {
                continue;
            };
            cell.set_text(cell_text);
            if r == 0 {
                for run in cell.paragraphs.iter_mut().flat_map(|p| p.runs.iter_mut()) {
                    run.font.bold = Some(true);
                }
            }
        }
    }
}

/// Bulleted items in fixed 18pt black Arial.
pub fn icon_list(slide: &mut Slide, content: &Content) {
    let items = content.strings("items");
    if items.is_empty() {
        return;
    }

    let bounds = content.bounds(Bounds::new(1.0, 2.0, 8.0, 4.0));
    let frame = text_box(slide, bounds);
    frame.clear();
    for item in items {
        let paragraph = frame.add_paragraph();
        paragraph.set_text(item);
        paragraph.level = 0;
        paragraph.bullet = true;
        paragraph.font = Font {
            size: Some(18.0),
            name: Some("Arial".to_string()),
            bold: Some(false),
            italic: Some(false),
            color: Some(RgbColor::BLACK),
        };
    }
}

/// Truncates `quote` to the number of characters the box can hold.
fn fit_quote(quote: &str, bounds: Bounds) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_chars = (bounds.width * bounds.height * QUOTE_CHARS_PER_SQ_INCH) as usize;

    if quote.chars().count() > max_chars {
        let kept: String = quote.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        quote.to_string()
    }
}

/// Curly-quoted italic quotation with an optional bold attribution line.
pub fn quote_block(slide: &mut Slide, content: &Content) {
    let bounds = content.bounds(Bounds::new(1.0, 2.0, 8.0, 2.0));
    let quote = fit_quote(&content.text("quote"), bounds);
    let author = content.text("author");

    let frame = text_box(slide, bounds);
    configure_textbox_frame(frame);
    frame.clear();
    frame.paragraphs.push(styled_paragraph(
        format!("\u{201C}{quote}\u{201D}"),
        font(24.0, None, Some(true)),
    ));
    if !author.is_empty() {
        frame.paragraphs.push(styled_paragraph(
            format!("- {author}"),
            font(16.0, Some(true), Some(false)),
        ));
    }
}

/// Milestone labels at equal horizontal steps across the box.
#[allow(clippy::cast_precision_loss)]
pub fn timeline(slide: &mut Slide, content: &Content) {
    let milestones = content.strings("milestones");
    let bounds = content.bounds(Bounds::new(1.0, 4.0, 8.0, 1.0));
    if milestones.is_empty() {
        return;
    }

    let step = bounds.width / milestones.len().saturating_sub(1).max(1) as f64;
    for (i, label) in milestones.into_iter().enumerate() {
        let x = bounds.left + i as f64 * step;
        let frame = text_box(
            slide,
            Bounds::new(x, bounds.top, MILESTONE_WIDTH, bounds.height),
        );
        frame.clear();
        frame
            .paragraphs
            .push(styled_paragraph(label, font(14.0, Some(true), None)));
    }
}

/// One equal-width box per step, each narrowed to leave a gap.
#[allow(clippy::cast_precision_loss)]
pub fn process_flow(slide: &mut Slide, content: &Content) {
    let steps = content.strings("steps");
    let bounds = content.bounds(Bounds::new(1.0, 4.0, 8.0, 1.0));
    if steps.is_empty() {
        return;
    }

    let step_width = bounds.width / steps.len() as f64;
    for (i, label) in steps.into_iter().enumerate() {
        let x = bounds.left + i as f64 * step_width;
        let frame = text_box(
            slide,
            Bounds::new(x, bounds.top, step_width - STEP_GAP, bounds.height),
        );
        frame.clear();
        frame
            .paragraphs
            .push(styled_paragraph(label, font(14.0, Some(true), None)));
    }
}

/// Big value, then label and subtext when present.
pub fn statistic_highlight(slide: &mut Slide, content: &Content) {
    let bounds = content.bounds(Bounds::new(3.0, 2.0, 4.0, 2.0));
    let label = content.text("label");
    let subtext = content.text("subtext");

    let frame = text_box(slide, bounds);
    frame.clear();
    frame.paragraphs.push(styled_paragraph(
        content.text("value"),
        font(48.0, Some(true), None),
    ));
    if !label.is_empty() {
        frame
            .paragraphs
            .push(styled_paragraph(label, font(20.0, Some(false), None)));
    }
    if !subtext.is_empty() {
        frame
            .paragraphs
            .push(styled_paragraph(subtext, font(14.0, None, Some(true))));
    }
}

/// Solid-filled box with one bold message.
pub fn callout_box(slide: &mut Slide, content: &Content) {
    let bounds = content.bounds(Bounds::new(1.0, 6.0, 8.0, 1.0));
    let fill = content.color("color").unwrap_or(RgbColor::GOLD);
    let message = content.text("message");

    let shape = slide.add_textbox(bounds);
    shape.fill = Some(fill);
    let frame = shape.text_frame.get_or_insert_with(TextFrame::default);
    configure_textbox_frame(frame);
    frame.clear();
    frame
        .paragraphs
        .push(styled_paragraph(message, font(20.0, Some(true), None)));
}

/// Large title with a thin rule placed below it.
pub fn section_divider(slide: &mut Slide, content: &Content) {
    let bounds = content.bounds(Bounds::new(1.0, 3.0, 8.0, 2.0));
    let title = content.text_or("title", "Section");

    let frame = text_box(slide, bounds);
    frame.clear();
    frame
        .paragraphs
        .push(styled_paragraph(title, font(36.0, Some(true), None)));

    slide.add_shape(
        AutoShapeType::Rectangle,
        Bounds::new(
            bounds.left,
            bounds.top + DIVIDER_RULE_OFFSET,
            bounds.width,
            DIVIDER_RULE_HEIGHT,
        ),
    );
}
