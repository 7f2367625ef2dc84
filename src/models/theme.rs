//! Named visual themes and their per-role text styles.
//!
//! A [`Theme`] bundles a background color with one [`Style`] per
//! [`StyleRole`]. Themes are built once and never mutated; the active theme is
//! swapped as a whole.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::document::{Paragraph, Slide, TextFrame};
use super::rgb::RgbColor;

/// Font family used when a theme does not name one.
pub const DEFAULT_FONT_FAMILY: &str = "Calibri";

/// Text role a style is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleRole {
    /// Slide titles
    Title,
    /// Subtitles
    Subtitle,
    /// In-body headings
    Heading,
    /// Running text
    Body,
    /// Bullet lists
    Bullet,
}

impl StyleRole {
    /// All roles a theme registers by default.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Subtitle,
        Self::Heading,
        Self::Body,
        Self::Bullet,
    ];

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Heading => "heading",
            Self::Body => "body",
            Self::Bullet => "bullet",
        }
    }
}

impl fmt::Display for StyleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|r| r.as_str() == s).ok_or(())
    }
}

/// Concrete text formatting for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Size in points
    pub font_size: f64,
    /// Typeface name
    pub font_family: String,
    /// Bold weight
    pub bold: bool,
    /// Italic slant
    pub italic: bool,
    /// Text color
    pub color: RgbColor,
}

impl Style {
    fn new(font_size: f64, font_family: &str, bold: bool, color: RgbColor) -> Self {
        Self {
            font_size,
            font_family: font_family.to_string(),
            bold,
            italic: false,
            color,
        }
    }

    /// Pushes this style onto every paragraph of `frame`.
    pub fn apply_to_text_frame(&self, frame: &mut TextFrame) {
        for paragraph in &mut frame.paragraphs {
            self.apply_to_paragraph(paragraph);
        }
    }

    /// Sets the paragraph-level font. Run-level overrides are left alone.
    pub fn apply_to_paragraph(&self, paragraph: &mut Paragraph) {
        let font = &mut paragraph.font;
        font.size = Some(self.font_size);
        font.name = Some(self.font_family.clone());
        font.bold = Some(self.bold);
        font.italic = Some(self.italic);
        font.color = Some(self.color);
    }
}

/// Named bundle of role styles plus a background color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    name: String,
    font_family: String,
    primary_color: RgbColor,
    background_color: RgbColor,
    styles: BTreeMap<StyleRole, Style>,
}

impl Theme {
    /// Builds a theme with the default role styles.
    ///
    /// Title, subtitle and heading use the primary color; body and bullet
    /// text is black.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        font_family: &str,
        primary_color: RgbColor,
        background_color: RgbColor,
    ) -> Self {
        let styles = BTreeMap::from([
            (StyleRole::Title, Style::new(44.0, font_family, true, primary_color)),
            (StyleRole::Subtitle, Style::new(32.0, font_family, false, primary_color)),
            (StyleRole::Heading, Style::new(28.0, font_family, true, primary_color)),
            (StyleRole::Body, Style::new(18.0, font_family, false, RgbColor::BLACK)),
            (StyleRole::Bullet, Style::new(18.0, font_family, false, RgbColor::BLACK)),
        ]);

        Self {
            name: name.into(),
            font_family: font_family.to_string(),
            primary_color,
            background_color,
            styles,
        }
    }

    /// Overrides the font sizes of the five default roles, in `StyleRole::ALL` order.
    #[must_use]
    fn with_font_sizes(mut self, sizes: [f64; 5]) -> Self {
        for (role, size) in StyleRole::ALL.into_iter().zip(sizes) {
            if let Some(style) = self.styles.get_mut(&role) {
                style.font_size = size;
            }
        }
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Style registered for `role`.
    #[must_use]
    pub fn style(&self, role: StyleRole) -> Option<&Style> {
        self.styles.get(&role)
    }

    /// Style registered under a role name; unknown names resolve to `None`.
    #[must_use]
    pub fn resolve(&self, role: &str) -> Option<&Style> {
        role.parse().ok().and_then(|r| self.style(r))
    }

    /// Applies the style for `role` to `frame`, or does nothing if the role is absent.
    pub fn apply(&self, role: StyleRole, frame: &mut TextFrame) {
        if let Some(style) = self.style(role) {
            style.apply_to_text_frame(frame);
        }
    }

    /// Paints the slide background and styles its declared title.
    pub fn apply_to_slide(&self, slide: &mut Slide) {
        slide.background = Some(self.background_color);
        if let Some(frame) = slide.title_mut().and_then(|t| t.text_frame_mut()) {
            self.apply(StyleRole::Title, frame);
        }
    }

    /// Looks up a built-in theme by key.
    #[must_use]
    pub fn builtin(key: &str) -> Option<Self> {
        let theme = match key {
            "default" => Self::new(
                "Default",
                DEFAULT_FONT_FAMILY,
                RgbColor::new(0x1F, 0x49, 0x7D),
                RgbColor::new(0xFF, 0xFF, 0xFF),
            ),
            "dark" => Self::new(
                "Dark",
                DEFAULT_FONT_FAMILY,
                RgbColor::new(0xFF, 0xFF, 0xFF),
                RgbColor::new(0x2F, 0x2F, 0x2F),
            ),
            "modern" => Self::new(
                "Modern",
                "Segoe UI",
                RgbColor::new(0x00, 0x78, 0xD4),
                RgbColor::new(0xF5, 0xF5, 0xF5),
            ),
            "pitchbook" => Self::new(
                "Pitchbook",
                "Arial",
                RgbColor::new(0x0B, 0x23, 0x41),
                RgbColor::new(0xFF, 0xFF, 0xFF),
            )
            .with_font_sizes([40.0, 28.0, 24.0, 16.0, 16.0]),
            "strategy_template" => Self::new(
                "Strategy Template",
                DEFAULT_FONT_FAMILY,
                RgbColor::new(0x2F, 0x55, 0x97),
                RgbColor::new(0xFF, 0xFF, 0xFF),
            )
            .with_font_sizes([36.0, 24.0, 22.0, 16.0, 16.0]),
            _ => return None,
        };
        Some(theme)
    }

    /// Keys of all built-in themes, in listing order.
    pub const BUILTIN_KEYS: [&'static str; 5] =
        ["default", "dark", "modern", "pitchbook", "strategy_template"];
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(
            "Default",
            DEFAULT_FONT_FAMILY,
            RgbColor::new(0x1F, 0x49, 0x7D),
            RgbColor::new(0xFF, 0xFF, 0xFF),
        )
    }
}
