//! Cross-slide shape alignment.
//!
//! Copies the geometry of a role's shape on a reference slide onto the shape
//! playing the same role on each target slide. Slides are addressed by their
//! 1-based position in the registry.
//!
//! Only two conditions fail a whole request: an out-of-range reference
//! number and a reference slide lacking the role. Everything that goes wrong
//! for a single target is recorded in that target's outcome while the
//! remaining targets proceed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use super::registry::{SlideId, SlideRegistry};
use crate::constants::{FOOTNOTE_BAND, SLIDE_HEIGHT};
use crate::error::{DeckError, DeckResult};
use crate::models::{Bounds, PartialBounds, PlaceholderKind, ShapeKind, Slide};

/// Semantic role used to find "the same" shape on different slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeRole {
    /// Declared or placeholder title
    Title,
    /// Subtitle placeholder
    Subtitle,
    /// Low free-standing text
    Footnote,
}

impl ShapeRole {
    /// All roles, in the order compound requests process them.
    pub const ALL: [Self; 3] = [Self::Title, Self::Subtitle, Self::Footnote];

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Footnote => "footnote",
        }
    }

    /// Per-target message recorded when a slide lacks this role.
    #[must_use]
    pub const fn missing_message(self) -> &'static str {
        match self {
            Self::Title => "No title shape found in this slide",
            Self::Subtitle => "No subtitle placeholder found on this slide",
            Self::Footnote => "No footnote shape found in this slide (no text box in bottom 15%)",
        }
    }
}

impl fmt::Display for ShapeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeRole {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DeckError::InvalidShapeRole(s.to_string()))
    }
}

/// `top` a shape must exceed to count as a footnote.
#[must_use]
pub fn footnote_threshold() -> f64 {
    SLIDE_HEIGHT * FOOTNOTE_BAND
}

/// Index of the title shape: the declared title, else the first placeholder
/// typed as a title.
#[must_use]
pub fn find_title(slide: &Slide) -> Option<usize> {
    slide.title_position().or_else(|| {
        slide.shapes().iter().position(|shape| {
            shape
                .placeholder()
                .is_some_and(|(_, kind)| kind.ordinal() == PlaceholderKind::Title.ordinal())
        })
    })
}

/// Index of the subtitle shape.
///
/// Templates mark subtitles either with the subtitle type or with ordinal 2,
/// so both are accepted.
#[must_use]
pub fn find_subtitle(slide: &Slide) -> Option<usize> {
    slide.shapes().iter().position(|shape| {
        shape
            .placeholder()
            .is_some_and(|(_, kind)| kind == PlaceholderKind::Subtitle || kind.ordinal() == 2)
    })
}

/// Index of the first text box or text-capable auto shape sitting below the
/// footnote threshold.
#[must_use]
pub fn find_footnote(slide: &Slide) -> Option<usize> {
    let threshold = footnote_threshold();
    slide.shapes().iter().position(|shape| {
        let free_text = match shape.kind {
            ShapeKind::TextBox => true,
            ShapeKind::AutoShape { .. } => shape.has_text_frame(),
            _ => false,
        };
        free_text && shape.bounds.top > threshold
    })
}

/// Index of the shape playing `role` on `slide`.
#[must_use]
pub fn find_role_shape(slide: &Slide, role: ShapeRole) -> Option<usize> {
    match role {
        ShapeRole::Title => find_title(slide),
        ShapeRole::Subtitle => find_subtitle(slide),
        ShapeRole::Footnote => find_footnote(slide),
    }
}

/// Result of aligning one target slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOutcome {
    /// 1-based target slide number as requested
    pub slide_number: i64,
    /// Whether the geometry was applied
    pub success: bool,
    /// Geometry written to the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_position: Option<Bounds>,
    /// Reason the target was skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TargetOutcome {
    fn applied(slide_number: i64, bounds: Bounds) -> Self {
        Self {
            slide_number,
            success: true,
            applied_position: Some(bounds),
            error: None,
        }
    }

    fn failed(slide_number: i64, error: impl Into<String>) -> Self {
        Self {
            slide_number,
            success: false,
            applied_position: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregate result of a single-role alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSummary {
    /// Role that was aligned
    pub role: ShapeRole,
    /// 1-based reference slide number
    pub reference_slide: i64,
    /// Geometry copied from the reference
    pub reference_position: Bounds,
    /// Number of targets requested
    pub total: usize,
    /// Targets that were updated
    pub successful: usize,
    /// Targets that were skipped
    pub failed: usize,
    /// Per-target detail, in request order
    pub results: Vec<TargetOutcome>,
}

/// Aligns the `role` shape of every target slide to the reference slide.
///
/// # Arguments
///
/// * `slides` - Registry whose order defines slide numbers
/// * `role` - Role to align
/// * `reference` - 1-based number of the reference slide
/// * `targets` - 1-based numbers of the slides to update
///
/// # Returns
///
/// * `Ok(AlignmentSummary)` - Per-target outcomes, including failures
/// * `Err(DeckError::InvalidReferenceSlide)` - Reference number out of range
/// * `Err(DeckError::MissingReferenceRole)` - Reference lacks the role
pub fn align_to_reference(
    slides: &mut SlideRegistry,
    role: ShapeRole,
    reference: i64,
    targets: &[i64],
) -> DeckResult<AlignmentSummary> {
    let total_slides = slides.len();
    info!(
        role = %role,
        reference,
        targets = targets.len(),
        "Aligning shapes to reference"
    );

    let reference_slide = slides
        .by_number(reference)
        .ok_or(DeckError::InvalidReferenceSlide {
            total: total_slides,
        })?;
    let reference_position = find_role_shape(reference_slide, role)
        .map(|index| reference_slide.shapes()[index].bounds)
        .ok_or_else(|| DeckError::MissingReferenceRole {
            slide_number: reference,
            role: role.to_string(),
        })?;

    let results: Vec<TargetOutcome> = targets
        .iter()
        .map(|&number| {
            let outcome = apply_role_position(slides, role, number, reference_position);
            if let Some(error) = &outcome.error {
                warn!(role = %role, slide_number = number, error = %error, "Target not aligned");
            }
            outcome
        })
        .collect();

    let successful = results.iter().filter(|r| r.success).count();
    Ok(AlignmentSummary {
        role,
        reference_slide: reference,
        reference_position,
        total: results.len(),
        successful,
        failed: results.len() - successful,
        results,
    })
}

fn apply_role_position(
    slides: &mut SlideRegistry,
    role: ShapeRole,
    number: i64,
    position: Bounds,
) -> TargetOutcome {
    let total = slides.len();
    let Some(slide) = slides.by_number_mut(number) else {
        return TargetOutcome::failed(number, DeckError::InvalidSlideNumber { total }.to_string());
    };
    let Some(shape) = find_role_shape(slide, role).and_then(|index| slide.shape_mut(index)) else {
        return TargetOutcome::failed(number, role.missing_message());
    };

    shape.bounds = position;
    TargetOutcome::applied(number, position)
}

/// Result of positioning one slide's title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionOutcome {
    /// 1-based slide number as requested
    pub slide_number: i64,
    /// Identifier of the slide, when the number was valid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_id: Option<SlideId>,
    /// Whether the title was moved
    pub success: bool,
    /// Title geometry after the update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_position: Option<Bounds>,
    /// Reason the slide was skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of a bulk title positioning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkPositionSummary {
    /// Number of slides requested
    pub total_slides: usize,
    /// Slides whose title was moved
    pub successful: usize,
    /// Slides that were skipped
    pub failed: usize,
    /// Per-slide detail, in request order
    pub results: Vec<PositionOutcome>,
}

/// Writes the provided fields of `position` onto the title of each slide.
///
/// Missing fields keep the title's current value.
pub fn set_bulk_title_positions(
    slides: &mut SlideRegistry,
    slide_numbers: &[i64],
    position: &PartialBounds,
) -> BulkPositionSummary {
    let total = slides.len();
    let ids = slides.ids();

    let results: Vec<PositionOutcome> = slide_numbers
        .iter()
        .map(|&number| {
            let slide_id = usize::try_from(number)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| ids.get(i).copied());
            let mut outcome = PositionOutcome {
                slide_number: number,
                slide_id,
                success: false,
                new_position: None,
                error: None,
            };

            let Some(slide) = slides.by_number_mut(number) else {
                outcome.error = Some(DeckError::InvalidSlideNumber { total }.to_string());
                return outcome;
            };
            let Some(shape) = find_title(slide).and_then(|index| slide.shape_mut(index)) else {
                outcome.error = Some(DeckError::NoTitleShape.to_string());
                return outcome;
            };

            position.apply_to(&mut shape.bounds);
            outcome.success = true;
            outcome.new_position = Some(shape.bounds);
            outcome
        })
        .collect();

    let successful = results.iter().filter(|r| r.success).count();
    info!(
        requested = slide_numbers.len(),
        successful, "Bulk title positions applied"
    );
    BulkPositionSummary {
        total_slides: slide_numbers.len(),
        successful,
        failed: results.len() - successful,
        results,
    }
}

/// Multi-role alignment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignShapesRequest {
    /// 1-based reference slide number
    pub reference_slide_number: i64,
    /// 1-based target slide numbers
    pub target_slide_numbers: Vec<i64>,
    /// Role names to align
    pub shapes_to_align: Vec<String>,
}

/// Outcome of one role within a compound alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleOutcome {
    /// The role was aligned (individual targets may still have failed)
    Aligned(AlignmentSummary),
    /// The whole role failed
    Failed {
        /// Failure message
        error: String,
    },
}

/// Aggregate result of a compound alignment, keyed by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundAlignment {
    /// 1-based reference slide number
    pub reference_slide: i64,
    /// Requested targets
    pub target_slides: Vec<i64>,
    /// Roles that were processed
    pub shapes_aligned: Vec<ShapeRole>,
    /// Per-role results
    pub results: BTreeMap<ShapeRole, RoleOutcome>,
}

/// Aligns several roles at once.
///
/// Role names are validated before anything is changed. Each role then runs
/// independently; a role whose reference is missing is reported under its
/// key without stopping the others.
pub fn align_shapes(
    slides: &mut SlideRegistry,
    request: &AlignShapesRequest,
) -> DeckResult<CompoundAlignment> {
    if request.target_slide_numbers.is_empty() {
        return Err(DeckError::InvalidRequest(
            "target_slide_numbers must be a non-empty array".to_string(),
        ));
    }
    if request.shapes_to_align.is_empty() {
        return Err(DeckError::InvalidRequest(
            "shapes_to_align must be a non-empty array".to_string(),
        ));
    }

    let requested = request
        .shapes_to_align
        .iter()
        .map(|name| name.parse::<ShapeRole>())
        .collect::<DeckResult<Vec<_>>>()?;
    let roles: Vec<ShapeRole> = ShapeRole::ALL
        .into_iter()
        .filter(|role| requested.contains(role))
        .collect();

    let results = roles
        .iter()
        .map(|&role| {
            let outcome = match align_to_reference(
                slides,
                role,
                request.reference_slide_number,
                &request.target_slide_numbers,
            ) {
                Ok(summary) => RoleOutcome::Aligned(summary),
                Err(e) => {
                    warn!(role = %role, error = %e, "Role not aligned");
                    RoleOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            (role, outcome)
        })
        .collect();

    Ok(CompoundAlignment {
        reference_slide: request.reference_slide_number,
        target_slides: request.target_slide_numbers.clone(),
        shapes_aligned: roles,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AutoShapeType, SlideLayout};

    fn registry(layouts: &[SlideLayout]) -> SlideRegistry {
        let mut slides = SlideRegistry::new();
        for &layout in layouts {
            slides.insert(Slide::new(layout));
        }
        slides
    }

    fn title_bounds(slides: &SlideRegistry, number: i64) -> Bounds {
        let slide = slides.by_number(number).unwrap();
        slide.shapes()[find_title(slide).unwrap()].bounds
    }

    fn move_title(slides: &mut SlideRegistry, number: i64, bounds: Bounds) {
        let slide = slides.by_number_mut(number).unwrap();
        let index = find_title(slide).unwrap();
        slide.shape_mut(index).unwrap().bounds = bounds;
    }

    #[test]
    fn test_role_names() {
        assert_eq!("footnote".parse::<ShapeRole>(), Ok(ShapeRole::Footnote));
        assert_eq!(
            "caption".parse::<ShapeRole>(),
            Err(DeckError::InvalidShapeRole("caption".to_string()))
        );
    }

    #[test]
    fn test_footnote_threshold_boundary() {
        let mut low = Slide::new(SlideLayout::Blank);
        low.add_textbox(Bounds::new(1.0, 6.374, 8.0, 0.5));
        assert_eq!(find_footnote(&low), None);

        let mut high = Slide::new(SlideLayout::Blank);
        high.add_textbox(Bounds::new(1.0, 6.376, 8.0, 0.5));
        assert_eq!(find_footnote(&high), Some(0));
    }

    #[test]
    fn test_footnote_ignores_pictures_and_accepts_auto_shapes() {
        let mut slide = Slide::new(SlideLayout::Blank);
        slide.add_picture("logo.png", Bounds::new(0.0, 7.0, 1.0, 0.5));
        slide.add_shape(AutoShapeType::Rectangle, Bounds::new(0.0, 6.8, 10.0, 0.2));
        assert_eq!(find_footnote(&slide), Some(1));
    }

    #[test]
    fn test_subtitle_detected_by_type_or_ordinal() {
        let title_slide = Slide::new(SlideLayout::TitleSlide);
        let found = find_subtitle(&title_slide).unwrap();
        assert_eq!(
            title_slide.shapes()[found].placeholder(),
            Some((1, PlaceholderKind::Subtitle))
        );

        let section = Slide::new(SlideLayout::SectionHeader);
        let found = find_subtitle(&section).unwrap();
        assert_eq!(
            section.shapes()[found].placeholder().map(|(_, k)| k),
            Some(PlaceholderKind::Body)
        );

        assert_eq!(find_subtitle(&Slide::new(SlideLayout::TitleOnly)), None);
    }

    #[test]
    fn test_alignment_is_idempotent() {
        let mut slides = registry(&[SlideLayout::TitleOnly, SlideLayout::TitleOnly]);
        let reference = Bounds::new(1.0, 0.4, 8.0, 1.1);
        move_title(&mut slides, 1, reference);

        align_to_reference(&mut slides, ShapeRole::Title, 1, &[2]).unwrap();
        align_to_reference(&mut slides, ShapeRole::Title, 2, &[1]).unwrap();

        assert_eq!(title_bounds(&slides, 1), reference);
        assert_eq!(title_bounds(&slides, 2), reference);
    }

    #[test]
    fn test_alignment_isolates_failing_target() {
        let mut slides = registry(&[
            SlideLayout::TitleOnly,
            SlideLayout::TitleAndContent,
            SlideLayout::Blank,
            SlideLayout::TitleSlide,
            SlideLayout::SectionHeader,
        ]);
        let summary =
            align_to_reference(&mut slides, ShapeRole::Title, 1, &[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(summary.total, 5);
        assert_eq!(summary.successful, 4);
        assert_eq!(summary.failed, 1);
        let failed = &summary.results[2];
        assert_eq!(failed.slide_number, 3);
        assert_eq!(failed.error.as_deref(), Some("No title shape found in this slide"));
        for number in [1, 2, 4, 5] {
            assert_eq!(title_bounds(&slides, number), summary.reference_position);
        }
    }

    #[test]
    fn test_out_of_range_target_fails_alone() {
        let mut slides = registry(&[SlideLayout::TitleOnly, SlideLayout::TitleOnly]);
        let summary = align_to_reference(&mut slides, ShapeRole::Title, 1, &[0, 2, 9]).unwrap();
        assert_eq!(summary.successful, 1);
        assert_eq!(
            summary.results[0].error.as_deref(),
            Some("Invalid slide number. Valid range is 1-2")
        );
        assert_eq!(
            summary.results[2].error.as_deref(),
            Some("Invalid slide number. Valid range is 1-2")
        );
    }

    #[test]
    fn test_reference_failures_abort_request() {
        let mut slides = registry(&[SlideLayout::Blank, SlideLayout::TitleOnly]);
        assert_eq!(
            align_to_reference(&mut slides, ShapeRole::Title, 3, &[2]),
            Err(DeckError::InvalidReferenceSlide { total: 2 })
        );
        assert_eq!(
            align_to_reference(&mut slides, ShapeRole::Title, 1, &[2]),
            Err(DeckError::MissingReferenceRole {
                slide_number: 1,
                role: "title".to_string()
            })
        );
    }

    #[test]
    fn test_bulk_positions_write_only_given_fields() {
        let mut slides = registry(&[SlideLayout::TitleOnly, SlideLayout::Blank]);
        let before = title_bounds(&slides, 1);
        let summary = set_bulk_title_positions(
            &mut slides,
            &[1, 2, 7],
            &PartialBounds {
                top: Some(0.2),
                ..PartialBounds::default()
            },
        );

        assert_eq!(summary.total_slides, 3);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 2);
        let moved = title_bounds(&slides, 1);
        assert_eq!(moved, Bounds { top: 0.2, ..before });
        assert_eq!(summary.results[0].new_position, Some(moved));
        assert!(summary.results[1].slide_id.is_some());
        assert!(summary.results[2].slide_id.is_none());
    }

    #[test]
    fn test_compound_alignment_runs_roles_independently() {
        let mut slides = registry(&[SlideLayout::TitleOnly, SlideLayout::TitleSlide]);
        let request = AlignShapesRequest {
            reference_slide_number: 1,
            target_slide_numbers: vec![2],
            shapes_to_align: vec!["subtitle".to_string(), "title".to_string()],
        };
        let result = align_shapes(&mut slides, &request).unwrap();

        assert_eq!(result.shapes_aligned, vec![ShapeRole::Title, ShapeRole::Subtitle]);
        assert!(matches!(
            result.results.get(&ShapeRole::Title),
            Some(RoleOutcome::Aligned(s)) if s.successful == 1
        ));
        assert_eq!(
            result.results.get(&ShapeRole::Subtitle),
            Some(&RoleOutcome::Failed {
                error: "Reference slide 1 does not have a subtitle shape".to_string()
            })
        );
    }

    #[test]
    fn test_compound_alignment_validates_input() {
        let mut slides = registry(&[SlideLayout::TitleOnly]);
        let mut request = AlignShapesRequest {
            reference_slide_number: 1,
            target_slide_numbers: vec![],
            shapes_to_align: vec!["title".to_string()],
        };
        assert!(matches!(
            align_shapes(&mut slides, &request),
            Err(DeckError::InvalidRequest(_))
        ));

        request.target_slide_numbers = vec![1];
        request.shapes_to_align = vec!["title".to_string(), "logo".to_string()];
        assert_eq!(
            align_shapes(&mut slides, &request).map(|_| ()),
            Err(DeckError::InvalidShapeRole("logo".to_string()))
        );
    }
}
