//! Markdown-to-rich-text conversion for text frames.
//!
//! Supports a small line-oriented subset:
//! - `# Heading` (36pt bold) and `## Heading` (28pt bold)
//! - inline `**bold**` and `*italic*` spans, non-nested
//!
//! Anything else, including unbalanced markers, is kept as literal text.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{AutoSize, Font, Insets, Paragraph, Run, TextFrame, VerticalAnchor};

/// Point size of a `#` heading.
pub const H1_SIZE: f64 = 36.0;

/// Point size of a `##` heading.
pub const H2_SIZE: f64 = 28.0;

// Spans must contain at least one character and italic spans no `*`, so a
// stray `**` never turns into an empty italic span.
static INLINE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\*([^*]+?)\*").expect("inline span pattern is valid")
});

/// Converts markdown text into paragraphs, one per non-blank line.
///
/// ```
/// use deckwright::formatting::markdown_paragraphs;
///
/// let paragraphs = markdown_paragraphs("## Hi");
/// assert_eq!(paragraphs.len(), 1);
/// assert_eq!(paragraphs[0].runs[0].text, "Hi");
/// assert_eq!(paragraphs[0].runs[0].font.size, Some(28.0));
/// ```
#[must_use]
pub fn markdown_paragraphs(text: &str) -> Vec<Paragraph> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Clears `frame` and fills it with the formatted paragraphs of `text`.
pub fn apply_markdown(frame: &mut TextFrame, text: &str) {
    frame.clear();
    frame.paragraphs = markdown_paragraphs(text);
}

/// Sets the frame options every synthesized text box uses: wrapping on,
/// no auto-fit, top anchored, 0.05in margins.
pub fn configure_textbox_frame(frame: &mut TextFrame) {
    frame.word_wrap = true;
    frame.auto_size = AutoSize::None;
    frame.vertical_anchor = VerticalAnchor::Top;
    frame.margins = Insets::uniform(0.05);
}

fn heading(text: &str, size: f64) -> Paragraph {
    Paragraph {
        runs: vec![Run::styled(
            text,
            Font {
                size: Some(size),
                bold: Some(true),
                ..Font::default()
            },
        )],
        ..Paragraph::default()
    }
}

fn parse_line(line: &str) -> Paragraph {
    if let Some(rest) = line.strip_prefix("## ") {
        return heading(rest, H2_SIZE);
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return heading(rest, H1_SIZE);
    }

    let mut runs = Vec::new();
    let mut cursor = 0;

    for caps in INLINE_SPAN.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            runs.push(Run::plain(&line[cursor..whole.start()]));
        }

        let run = if let Some(bold) = caps.get(1) {
            Run::styled(
                bold.as_str(),
                Font {
                    bold: Some(true),
                    ..Font::default()
                },
            )
        } else if let Some(italic) = caps.get(2) {
            Run::styled(
                italic.as_str(),
                Font {
                    italic: Some(true),
                    ..Font::default()
                },
            )
        } else {
            Run::plain(whole.as_str())
        };
        runs.push(run);
        cursor = whole.end();
    }

    if cursor < line.len() {
        runs.push(Run::plain(&line[cursor..]));
    }

    Paragraph {
        runs,
        ..Paragraph::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(p: &Paragraph) -> Vec<&str> {
        p.runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_headings() {
        let p = markdown_paragraphs("## Hi");
        assert_eq!(p.len(), 1);
        assert_eq!(texts(&p[0]), vec!["Hi"]);
        assert_eq!(p[0].runs[0].font.size, Some(28.0));
        assert_eq!(p[0].runs[0].font.bold, Some(true));

        let p = markdown_paragraphs("# Hi");
        assert_eq!(texts(&p[0]), vec!["Hi"]);
        assert_eq!(p[0].runs[0].font.size, Some(36.0));
        assert_eq!(p[0].runs[0].font.bold, Some(true));
    }

    #[test]
    fn test_heading_requires_space() {
        let p = markdown_paragraphs("#hashtag");
        assert_eq!(texts(&p[0]), vec!["#hashtag"]);
        assert_eq!(p[0].runs[0].font, Font::default());
    }

    #[test]
    fn test_plain_lines_one_run_each() {
        let p = markdown_paragraphs("first line\n\n   second line  \n");
        assert_eq!(p.len(), 2);
        assert_eq!(texts(&p[0]), vec!["first line"]);
        assert_eq!(texts(&p[1]), vec!["second line"]);
        assert!(p.iter().all(|para| para.runs[0].font == Font::default()));
    }

    #[test]
    fn test_inline_spans() {
        let p = markdown_paragraphs("Revenue **grew** by *a lot* today");
        let para = &p[0];
        assert_eq!(texts(para), vec!["Revenue ", "grew", " by ", "a lot", " today"]);
        assert_eq!(para.runs[1].font.bold, Some(true));
        assert_eq!(para.runs[3].font.italic, Some(true));
        assert_eq!(para.runs[0].font, Font::default());
    }

    #[test]
    fn test_unbalanced_marker_is_literal() {
        let p = markdown_paragraphs("**bold");
        assert_eq!(p.len(), 1);
        assert_eq!(texts(&p[0]), vec!["**bold"]);
        assert_eq!(p[0].runs[0].font, Font::default());

        let p = markdown_paragraphs("a * b");
        assert_eq!(texts(&p[0]), vec!["a * b"]);
    }

    #[test]
    fn test_empty_input_clears_frame() {
        let mut frame = TextFrame::default();
        frame.set_text("old");
        apply_markdown(&mut frame, "");
        assert!(frame.paragraphs.is_empty());
        apply_markdown(&mut frame, "  \n\t\n");
        assert!(frame.paragraphs.is_empty());
    }

    #[test]
    fn test_configure_textbox_frame() {
        let mut frame = TextFrame::default();
        configure_textbox_frame(&mut frame);
        assert!(frame.word_wrap);
        assert_eq!(frame.auto_size, AutoSize::None);
        assert_eq!(frame.margins, Insets::uniform(0.05));
    }
}
