//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed slide canvas.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Deckwright";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "deckwright";

/// Slide canvas width in inches.
pub const SLIDE_WIDTH: f64 = 10.0;

/// Slide canvas height in inches.
pub const SLIDE_HEIGHT: f64 = 7.5;

/// Fraction of the canvas height below which a free-standing text shape is a footnote.
pub const FOOTNOTE_BAND: f64 = 0.85;

/// Smallest width or height a clamped box may have, in inches.
pub const MIN_BOX_EXTENT: f64 = 1.0;
