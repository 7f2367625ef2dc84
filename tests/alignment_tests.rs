//! Integration tests for cross-slide alignment through the deck API.

use deckwright::models::{Bounds, PartialBounds};
use deckwright::services::{AlignShapesRequest, RoleOutcome, ShapeRole};
use deckwright::DeckError;

mod fixtures;
use fixtures::{
    add_footnote, deck_with_layouts, shape_bounds, TITLE_AND_CONTENT, TITLE_ONLY, TITLE_SLIDE,
};

// ============================================================================
// Title Alignment
// ============================================================================

#[test]
fn test_titles_follow_reference_after_manual_move() {
    let (mut deck, ids) = deck_with_layouts(&[TITLE_ONLY, TITLE_AND_CONTENT, TITLE_SLIDE]);
    let moved = Bounds::new(0.75, 0.25, 8.5, 1.0);
    deck.set_title_position(ids[1], moved).unwrap();

    let summary = deck
        .align_to_reference(ShapeRole::Title, 2, &[1, 3])
        .unwrap();

    assert_eq!(summary.reference_position, moved);
    assert_eq!(summary.successful, 2);
    for &id in &ids {
        assert_eq!(deck.title_coordinates(id).unwrap().coordinates, moved);
    }
}

#[test]
fn test_isolated_failure_in_middle_of_batch() {
    let (mut deck, _) = deck_with_layouts(&[TITLE_ONLY, TITLE_ONLY]);
    deck.create_blank_slide();
    deck.create_slide(TITLE_ONLY).unwrap();
    deck.create_slide(TITLE_ONLY).unwrap();

    let summary = deck
        .align_to_reference(ShapeRole::Title, 1, &[1, 2, 3, 4, 5])
        .unwrap();

    assert_eq!((summary.successful, summary.failed), (4, 1));
    let failures: Vec<i64> = summary
        .results
        .iter()
        .filter(|r| !r.success)
        .map(|r| r.slide_number)
        .collect();
    assert_eq!(failures, vec![3]);
}

#[test]
fn test_deleting_a_slide_renumbers_targets() {
    let (mut deck, ids) = deck_with_layouts(&[TITLE_ONLY, TITLE_ONLY, TITLE_ONLY]);
    deck.set_title_position(ids[2], Bounds::new(2.0, 2.0, 6.0, 1.0))
        .unwrap();
    deck.delete_slide(ids[0]).unwrap();

    // former slide 3 is now slide 2
    let summary = deck
        .align_to_reference(ShapeRole::Title, 2, &[1])
        .unwrap();
    assert_eq!(summary.reference_position, Bounds::new(2.0, 2.0, 6.0, 1.0));
    assert_eq!(
        deck.title_coordinates(ids[1]).unwrap().coordinates,
        Bounds::new(2.0, 2.0, 6.0, 1.0)
    );

    assert_eq!(
        deck.align_to_reference(ShapeRole::Title, 3, &[1]),
        Err(DeckError::InvalidReferenceSlide { total: 2 })
    );
}

// ============================================================================
// Subtitle and Footnote Alignment
// ============================================================================

#[test]
fn test_subtitles_align_between_title_slides() {
    let (mut deck, _) = deck_with_layouts(&[TITLE_SLIDE, TITLE_SLIDE, TITLE_ONLY]);
    let summary = deck
        .align_to_reference(ShapeRole::Subtitle, 1, &[2, 3])
        .unwrap();

    assert_eq!(summary.successful, 1);
    assert_eq!(
        summary.results[1].error.as_deref(),
        Some("No subtitle placeholder found on this slide")
    );
}

#[test]
fn test_footnotes_align_and_respect_threshold() {
    let (mut deck, ids) = deck_with_layouts(&[TITLE_ONLY, TITLE_ONLY, TITLE_ONLY]);
    add_footnote(&mut deck, ids[0], 6.9);
    add_footnote(&mut deck, ids[1], 6.5);
    // sits above the footnote band, so it never counts
    add_footnote(&mut deck, ids[2], 6.374);

    let summary = deck
        .align_to_reference(ShapeRole::Footnote, 1, &[2, 3])
        .unwrap();

    assert_eq!(summary.successful, 1);
    assert_eq!(shape_bounds(&deck, ids[1], 1), Bounds::new(0.5, 6.9, 9.0, 0.5));
    assert_eq!(shape_bounds(&deck, ids[2], 1), Bounds::new(0.5, 6.374, 9.0, 0.5));
}

#[test]
fn test_reference_without_footnote_fails_whole_request() {
    let (mut deck, _) = deck_with_layouts(&[TITLE_ONLY, TITLE_ONLY]);
    let err = deck
        .align_to_reference(ShapeRole::Footnote, 1, &[2])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Reference slide 1 does not have a footnote shape"
    );
}

// ============================================================================
// Bulk Positioning and Compound Alignment
// ============================================================================

#[test]
fn test_bulk_title_positions_partial_update() {
    let (mut deck, ids) = deck_with_layouts(&[TITLE_ONLY, TITLE_AND_CONTENT]);
    let summary = deck.set_bulk_title_positions(
        &[1, 2],
        &PartialBounds {
            left: Some(1.0),
            width: Some(8.0),
            ..PartialBounds::default()
        },
    );

    assert_eq!(summary.successful, 2);
    for id in ids {
        let coords = deck.title_coordinates(id).unwrap().coordinates;
        assert_eq!(coords.left, 1.0);
        assert_eq!(coords.width, 8.0);
        assert_eq!(coords.top, 0.3);
    }
}

#[test]
fn test_compound_alignment_of_all_roles() {
    let (mut deck, ids) = deck_with_layouts(&[TITLE_SLIDE, TITLE_SLIDE, TITLE_SLIDE]);
    add_footnote(&mut deck, ids[0], 7.0);
    add_footnote(&mut deck, ids[2], 6.6);

    let request = AlignShapesRequest {
        reference_slide_number: 1,
        target_slide_numbers: vec![2, 3],
        shapes_to_align: vec![
            "footnote".to_string(),
            "title".to_string(),
            "subtitle".to_string(),
        ],
    };
    let result = deck.align_shapes(&request).unwrap();

    assert_eq!(
        result.shapes_aligned,
        vec![ShapeRole::Title, ShapeRole::Subtitle, ShapeRole::Footnote]
    );
    let Some(RoleOutcome::Aligned(footnotes)) = result.results.get(&ShapeRole::Footnote) else {
        panic!("footnote role should have been aligned");
    };
    assert_eq!((footnotes.successful, footnotes.failed), (1, 1));
    assert_eq!(shape_bounds(&deck, ids[2], 2), Bounds::new(0.5, 7.0, 9.0, 0.5));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["results"]["title"]["successful"], 2);
    assert_eq!(json["results"]["subtitle"]["role"], "subtitle");
}

