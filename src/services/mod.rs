//! Service layer for deck operations.
//!
//! This module contains the slide registry, the deck context that owns it,
//! and the cross-slide alignment engine.

pub mod alignment;
pub mod deck;
pub mod registry;

// Re-export commonly used types
pub use alignment::{
    AlignShapesRequest, AlignmentSummary, BulkPositionSummary, CompoundAlignment, RoleOutcome,
    ShapeRole, TargetOutcome,
};
pub use deck::{Deck, ShapeClass, ShapeInfo, TitleCoordinates};
pub use registry::{SlideId, SlideRegistry};
