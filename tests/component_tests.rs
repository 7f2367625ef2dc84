//! Integration tests for slide components rendered through the deck.

use deckwright::components::ComponentSpec;
use deckwright::models::{Bounds, RgbColor, ShapeKind};
use deckwright::services::{Deck, SlideId};
use deckwright::DeckError;
use serde_json::{json, Value};

mod fixtures;
use fixtures::{content, deck_with_layouts, shape_bounds, slide, TITLE_AND_CONTENT};

fn render(deck: &mut Deck, id: SlideId, kind: &str, value: Value) {
    let component = ComponentSpec::parse(kind, content(value)).expect("known component");
    deck.add_component(id, &component).expect("slide exists");
}

fn shape_text(deck: &Deck, id: SlideId, index: usize) -> String {
    slide(deck, id).shapes()[index].text()
}

// ============================================================================
// Component Lookup
// ============================================================================

#[test]
fn test_unknown_component_type() {
    assert_eq!(
        ComponentSpec::parse("carousel", content(json!({}))),
        Err(DeckError::InvalidComponentType)
    );
}

#[test]
fn test_component_on_missing_slide() {
    let mut deck = Deck::default();
    let component = ComponentSpec::parse("callout_box", content(json!({}))).unwrap();
    assert_eq!(
        deck.add_component(SlideId::new(), &component),
        Err(DeckError::SlideNotFound)
    );
}

// ============================================================================
// Titled Components
// ============================================================================

#[test]
fn test_bullet_with_title_fills_layout_placeholders() {
    let (mut deck, ids) = deck_with_layouts(&[TITLE_AND_CONTENT]);
    render(
        &mut deck,
        ids[0],
        "bullet_with_title",
        json!({"title": "Agenda", "points": ["Context", "Plan", "Ask"]}),
    );

    assert_eq!(slide(&deck, ids[0]).shapes().len(), 2);
    assert_eq!(shape_text(&deck, ids[0], 0), "Agenda");
    assert_eq!(shape_text(&deck, ids[0], 1), "Context\nPlan\nAsk");
}

#[test]
fn test_header_with_image_on_dark_theme() {
    let mut deck = Deck::with_theme_name("dark").unwrap();
    let id = deck.create_blank_slide();
    render(
        &mut deck,
        id,
        "header_with_image",
        json!({"title": "Market", "image_path": "map.png"}),
    );

    let shapes = slide(&deck, id).shapes();
    assert_eq!(shapes.len(), 2);
    let title_font = &shapes[0].text_frame.as_ref().unwrap().paragraphs[0].font;
    assert_eq!(title_font.color, Some(RgbColor::new(0xFF, 0xFF, 0xFF)));
    assert!(matches!(
        &shapes[1].kind,
        ShapeKind::Picture { image_path } if image_path == "map.png"
    ));
    assert_eq!(shapes[1].bounds, Bounds::new(1.0, 2.0, 8.0, 5.0));
}

// ============================================================================
// Layout Components
// ============================================================================

#[test]
fn test_comparison_table_shape_follows_data() {
    let mut deck = Deck::default();
    let id = deck.create_blank_slide();
    render(
        &mut deck,
        id,
        "comparison_table",
        json!({"data": [["Plan", "Price"], ["Basic", 10], ["Pro", 25]]}),
    );

    let shape = &slide(&deck, id).shapes()[0];
    let ShapeKind::Table { table } = &shape.kind else {
        panic!("expected a table");
    };
    assert_eq!(table.cell(2, 1).unwrap().text(), "25");
    assert_eq!(
        table.cell(0, 0).unwrap().paragraphs[0].runs[0].font.bold,
        Some(true)
    );
    assert_eq!(shape.bounds, Bounds::new(1.0, 2.0, 8.0, 3.0));
}

#[test]
fn test_oversized_components_are_clamped() {
    let mut deck = Deck::default();
    let id = deck.create_blank_slide();
    render(
        &mut deck,
        id,
        "statistic_highlight",
        json!({"value": "98%", "left": 9.5, "top": -2.0, "width": 4.0, "height": 20.0}),
    );

    assert_eq!(shape_bounds(&deck, id, 0), Bounds::new(9.5, 0.0, 1.0, 7.5));
    assert_eq!(shape_text(&deck, id, 0), "98%");
}

#[test]
fn test_process_flow_and_timeline_share_a_slide() {
    let mut deck = Deck::default();
    let id = deck.create_blank_slide();
    render(
        &mut deck,
        id,
        "process_flow",
        json!({"steps": ["Draft", "Review"], "top": 1.0}),
    );
    render(
        &mut deck,
        id,
        "timeline",
        json!({"milestones": ["Q1", "Q2", "Q3"], "top": 5.0}),
    );

    let shapes = slide(&deck, id).shapes();
    assert_eq!(shapes.len(), 5);
    assert_eq!(shapes[1].bounds, Bounds::new(5.0, 1.0, 3.8, 1.0));
    assert_eq!(shapes[4].bounds.left, 9.0);
    assert_eq!(shapes[4].text(), "Q3");
}

#[test]
fn test_quote_block_with_attribution() {
    let mut deck = Deck::default();
    let id = deck.create_blank_slide();
    render(
        &mut deck,
        id,
        "quote_block",
        json!({"quote": "Ship it", "author": "Ada"}),
    );

    assert_eq!(shape_text(&deck, id, 0), "\u{201C}Ship it\u{201D}\n- Ada");
}

#[test]
fn test_callout_box_and_section_divider() {
    let mut deck = Deck::default();
    let id = deck.create_blank_slide();
    render(
        &mut deck,
        id,
        "callout_box",
        json!({"message": "Decision needed", "color": [200, 30, 30]}),
    );
    render(&mut deck, id, "section_divider", json!({}));

    let shapes = slide(&deck, id).shapes();
    assert_eq!(shapes[0].fill, Some(RgbColor::new(200, 30, 30)));
    assert_eq!(shapes[1].text(), "Section");
    assert!(matches!(shapes[2].kind, ShapeKind::AutoShape { .. }));
}

#[test]
fn test_empty_collections_add_nothing() {
    let mut deck = Deck::default();
    let id = deck.create_blank_slide();
    for kind in ["icon_list", "timeline", "process_flow", "comparison_table"] {
        render(&mut deck, id, kind, json!({}));
    }
    assert!(slide(&deck, id).shapes().is_empty());
}
