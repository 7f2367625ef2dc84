//! RGB color handling with hex parsing and serialization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DeckError, DeckResult};

/// RGB color value with hex string representation.
///
/// Serialized as `"#RRGGBB"` so snapshots and API payloads stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Pure black, used by plain text components.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Gold fill used by callout boxes when no color is supplied.
    pub const GOLD: Self = Self::new(255, 215, 0);

    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use deckwright::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#1F497D").unwrap();
    /// assert_eq!(color, RgbColor::new(0x1F, 0x49, 0x7D));
    /// ```
    pub fn from_hex(hex: &str) -> DeckResult<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(DeckError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| DeckError::InvalidColor(hex.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Builds a color from a JSON `[r, g, b]` triple.
    ///
    /// Returns `None` unless the value is an array of exactly three integers
    /// in `0..=255`.
    #[must_use]
    pub fn from_json_triple(value: &serde_json::Value) -> Option<Self> {
        let items = value.as_array()?;
        if items.len() != 3 {
            return None;
        }
        let mut channels = [0u8; 3];
        for (slot, item) in channels.iter_mut().zip(items) {
            *slot = u8::try_from(item.as_u64()?).ok()?;
        }
        Some(Self::new(channels[0], channels[1], channels[2]))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for RgbColor {
    type Error = DeckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}
