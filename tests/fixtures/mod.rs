//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Each test binary uses a subset

use deckwright::components::Content;
use deckwright::models::{Bounds, PartialBounds, Slide};
use deckwright::services::{Deck, SlideId};
use serde_json::Value;

/// Layout index of "Title Slide" (title + subtitle placeholders).
pub const TITLE_SLIDE: usize = 0;

/// Layout index of "Title and Content".
pub const TITLE_AND_CONTENT: usize = 1;

/// Layout index of "Title Only".
pub const TITLE_ONLY: usize = 5;

/// Partial position carrying only an origin.
pub fn at(left: f64, top: f64) -> PartialBounds {
    PartialBounds {
        left: Some(left),
        top: Some(top),
        ..PartialBounds::default()
    }
}

/// Full position.
pub fn boxed(left: f64, top: f64, width: f64, height: f64) -> PartialBounds {
    Bounds::new(left, top, width, height).into()
}

/// Creates a deck with one slide per layout index, returning their ids in order.
pub fn deck_with_layouts(layouts: &[usize]) -> (Deck, Vec<SlideId>) {
    let mut deck = Deck::default();
    let ids = layouts
        .iter()
        .map(|&layout| deck.create_slide(layout).expect("valid layout index"))
        .collect();
    (deck, ids)
}

/// Adds a footnote-style text box with its top edge at `top`.
pub fn add_footnote(deck: &mut Deck, id: SlideId, top: f64) {
    deck.add_text_box(id, "Source: internal data", &boxed(0.5, top, 9.0, 0.5))
        .expect("slide exists");
}

/// Geometry of the shape at `index` on the slide.
pub fn shape_bounds(deck: &Deck, id: SlideId, index: usize) -> Bounds {
    deck.slide(id).expect("slide exists").shapes()[index].bounds
}

/// Slide with the given id.
pub fn slide(deck: &Deck, id: SlideId) -> &Slide {
    deck.slide(id).expect("slide exists")
}

/// Component content from a JSON object literal.
pub fn content(value: Value) -> Content {
    serde_json::from_value(value).expect("content must be a JSON object")
}
