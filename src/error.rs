//! Error taxonomy for deck operations.
//!
//! Every fallible core operation returns [`DeckError`]. Failures that only
//! affect one item of a batch (a single target slide, a single role) are
//! reported as data in the batch result instead.

use thiserror::Error;

/// Errors raised by deck, component and alignment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// No slide is registered under the given id.
    #[error("slide not found")]
    SlideNotFound,

    /// A 1-based slide number outside `1..=total`.
    #[error("Invalid slide number. Valid range is 1-{total}")]
    InvalidSlideNumber {
        /// Number of slides currently registered.
        total: usize,
    },

    /// The reference slide number of an alignment request is out of range.
    #[error("Invalid reference slide number. Valid range is 1-{total}")]
    InvalidReferenceSlide {
        /// Number of slides currently registered.
        total: usize,
    },

    /// The reference slide has no shape playing the requested role.
    #[error("Reference slide {slide_number} does not have a {role} shape")]
    MissingReferenceRole {
        /// 1-based number of the reference slide.
        slide_number: i64,
        /// Role name (title, subtitle, footnote).
        role: String,
    },

    /// The slide has no title shape.
    #[error("No title shape found in this slide")]
    NoTitleShape,

    /// Named theme is not registered.
    #[error("theme not found")]
    ThemeNotFound,

    /// Slide layout index is out of range.
    #[error("invalid slide layout index {0}")]
    InvalidLayout(usize),

    /// A text box must be synthesized but the caller gave no position.
    #[error("position required when no {0} placeholder exists")]
    PositionRequired(&'static str),

    /// Unknown component kind.
    #[error("invalid component type")]
    InvalidComponentType,

    /// Unknown alignment role name.
    #[error("Invalid shape type '{0}'. Valid types: title, subtitle, footnote")]
    InvalidShapeRole(String),

    /// Request was structurally valid JSON but semantically unusable.
    #[error("{0}")]
    InvalidRequest(String),

    /// Hex color could not be parsed.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// Presentation snapshot could not be decoded.
    #[error("failed to decode presentation: {0}")]
    Snapshot(String),
}

/// Convenience alias for deck results.
pub type DeckResult<T> = Result<T, DeckError>;
