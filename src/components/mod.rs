//! Composite slide components.
//!
//! A component turns a loosely typed content mapping into positioned shapes
//! on one slide. Each [`ComponentKind`] has its own layout function in
//! [`layouts`]; dispatch is an exhaustive match so a new kind cannot be added
//! without a renderer.
//!
//! Content is read leniently: missing keys and values of the wrong JSON type
//! fall back to the kind's defaults instead of failing the request.

pub mod layouts;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::DeckError;
use crate::models::{Bounds, RgbColor, Slide, Theme};

/// The component layouts that can be placed on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Title with a large picture below
    HeaderWithImage,
    /// Title with a bullet list
    BulletWithTitle,
    /// Title over two text columns
    TwoColumnText,
    /// Grid of cells with a bold header row
    ComparisonTable,
    /// Bulleted list in fixed black 18pt text
    IconList,
    /// Italic quotation with optional attribution
    QuoteBlock,
    /// Milestones spread along a horizontal line
    Timeline,
    /// Equal-width boxes for sequential steps
    ProcessFlow,
    /// One large figure with label and subtext
    StatisticHighlight,
    /// Filled box holding a key message
    CalloutBox,
    /// Big section title with a rule below
    SectionDivider,
}

impl ComponentKind {
    /// All component kinds.
    pub const ALL: [Self; 11] = [
        Self::HeaderWithImage,
        Self::BulletWithTitle,
        Self::TwoColumnText,
        Self::ComparisonTable,
        Self::IconList,
        Self::QuoteBlock,
        Self::Timeline,
        Self::ProcessFlow,
        Self::StatisticHighlight,
        Self::CalloutBox,
        Self::SectionDivider,
    ];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeaderWithImage => "header_with_image",
            Self::BulletWithTitle => "bullet_with_title",
            Self::TwoColumnText => "two_column_text",
            Self::ComparisonTable => "comparison_table",
            Self::IconList => "icon_list",
            Self::QuoteBlock => "quote_block",
            Self::Timeline => "timeline",
            Self::ProcessFlow => "process_flow",
            Self::StatisticHighlight => "statistic_highlight",
            Self::CalloutBox => "callout_box",
            Self::SectionDivider => "section_divider",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(DeckError::InvalidComponentType)
    }
}

/// Free-form component content with lenient typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content {
    fields: Map<String, Value>,
}

impl Content {
    /// Wraps a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Numeric field, or `default` when absent or not a number.
    #[must_use]
    pub fn number(&self, key: &str, default: f64) -> f64 {
        self.fields
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(default)
    }

    /// Text field; numbers and booleans are rendered, anything else is empty.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.fields.get(key).map(value_text).unwrap_or_default()
    }

    /// Text field, or `default` only when the key is absent.
    #[must_use]
    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.fields
            .get(key)
            .map_or_else(|| default.to_string(), value_text)
    }

    /// List of text items; a non-array value yields an empty list.
    #[must_use]
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().map(value_text).collect())
            .unwrap_or_default()
    }

    /// Rows of text cells; non-array rows become empty rows.
    #[must_use]
    pub fn rows(&self, key: &str) -> Vec<Vec<String>> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(value_text).collect())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `[r, g, b]` color field.
    #[must_use]
    pub fn color(&self, key: &str) -> Option<RgbColor> {
        self.fields.get(key).and_then(RgbColor::from_json_triple)
    }

    /// `left/top/width/height` with per-kind defaults, clamped to the canvas.
    #[must_use]
    pub fn bounds(&self, defaults: Bounds) -> Bounds {
        Bounds::clamped(
            self.number("left", defaults.left),
            self.number("top", defaults.top),
            self.number("width", defaults.width),
            self.number("height", defaults.height),
        )
    }
}

impl From<Map<String, Value>> for Content {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// A component kind together with its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Layout to use
    pub kind: ComponentKind,
    /// Kind-specific content
    #[serde(default)]
    pub content: Content,
}

impl ComponentSpec {
    /// Parses a component from its wire name and content.
    pub fn parse(component_type: &str, content: Content) -> Result<Self, DeckError> {
        Ok(Self {
            kind: component_type.parse()?,
            content,
        })
    }

    /// Renders the component onto `slide` using `theme` for text roles.
    pub fn render(&self, slide: &mut Slide, theme: &Theme) {
        debug!(kind = %self.kind, "Rendering component");
        let content = &self.content;

        match self.kind {
            ComponentKind::HeaderWithImage => layouts::header_with_image(slide, content, theme),
            ComponentKind::BulletWithTitle => layouts::bullet_with_title(slide, content, theme),
            ComponentKind::TwoColumnText => layouts::two_column_text(slide, content, theme),
            ComponentKind::ComparisonTable => layouts::comparison_table(slide, content),
            ComponentKind::IconList => layouts::icon_list(slide, content),
            ComponentKind::QuoteBlock => layouts::quote_block(slide, content),
            ComponentKind::Timeline => layouts::timeline(slide, content),
            ComponentKind::ProcessFlow => layouts::process_flow(slide, content),
            ComponentKind::StatisticHighlight => layouts::statistic_highlight(slide, content),
            ComponentKind::CalloutBox => layouts::callout_box(slide, content),
            ComponentKind::SectionDivider => layouts::section_divider(slide, content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: Value) -> Content {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>(), Ok(kind));
            let wire = serde_json::to_value(kind).unwrap();
            assert_eq!(wire, json!(kind.as_str()));
        }
        assert_eq!(
            "carousel".parse::<ComponentKind>(),
            Err(DeckError::InvalidComponentType)
        );
    }

    #[test]
    fn test_number_defaults_on_wrong_type() {
        let c = content(json!({"left": "far", "top": 2.5, "width": null}));
        assert_eq!(c.number("left", 1.0), 1.0);
        assert_eq!(c.number("top", 1.0), 2.5);
        assert_eq!(c.number("width", 4.0), 4.0);
        assert_eq!(c.number("height", 3.0), 3.0);
    }

    #[test]
    fn test_text_renders_scalars() {
        let c = content(json!({"value": 42, "flag": true, "label": "Users", "obj": {}}));
        assert_eq!(c.text("value"), "42");
        assert_eq!(c.text("flag"), "true");
        assert_eq!(c.text("label"), "Users");
        assert_eq!(c.text("obj"), "");
        assert_eq!(c.text("missing"), "");
        assert_eq!(c.text_or("missing", "Section"), "Section");
        assert_eq!(c.text_or("label", "Section"), "Users");
    }

    #[test]
    fn test_rows_and_strings() {
        let c = content(json!({"data": [["a", 1], "bad"], "items": ["x", 2], "none": 5}));
        assert_eq!(
            c.rows("data"),
            vec![vec!["a".to_string(), "1".to_string()], Vec::new()]
        );
        assert_eq!(c.strings("items"), vec!["x".to_string(), "2".to_string()]);
        assert!(c.strings("none").is_empty());
    }

    #[test]
    fn test_bounds_are_clamped() {
        let c = content(json!({"left": -3, "top": 7, "width": 50}));
        let b = c.bounds(Bounds::new(1.0, 4.0, 8.0, 1.0));
        assert_eq!(b, Bounds::new(0.0, 7.0, 10.0, 1.0));
    }
}
