//! Data models for slides, shapes, text, geometry and themes.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of HTTP and business logic.

pub mod document;
pub mod geometry;
pub mod layout;
pub mod rgb;
pub mod theme;

// Re-export all model types
pub use document::{
    AutoShapeType, AutoSize, Font, Insets, Paragraph, PlaceholderKind, Run, Shape, ShapeKind,
    Slide, Table, TextFrame, VerticalAnchor,
};
pub use geometry::{Bounds, PartialBounds};
pub use layout::{PlaceholderSpec, SlideLayout};
pub use rgb::RgbColor;
pub use theme::{Style, StyleRole, Theme};
