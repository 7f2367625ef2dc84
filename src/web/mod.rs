//! Web API module for Deckwright.
//!
//! This module exposes the deck operations as a JSON REST API. Logical
//! failures (unknown slide, missing title, bad reference number) are
//! answered with status 200 and an `{"error": "..."}` body; only malformed
//! request bodies are rejected at the protocol level.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/themes`, `POST /api/theme` - List and select themes
//! - `POST /api/slide?layout=N`, `POST /api/slide/blank` - Create slides
//! - `GET /api/slides`, `DELETE /api/slide/{slide_id}` - List and delete slides
//! - `POST /api/slide/{slide_id}/{title,subtitle,bullet_points,text_box,image,background,component}`
//! - `GET /api/slide/{slide_id}/shapes` - Inspect shapes
//! - `POST /api/slide/{slide_id}/title/position`, `GET /api/slide/{slide_id}/title/coordinates`
//! - `POST /api/slides/bulk/title/position` - Position titles on many slides
//! - `POST /api/slides/align_{titles,subtitles,footnotes}_to_reference`
//! - `POST /api/v2/slides/align_shapes_to_reference` (also at `/slides/...`)
//! - `POST /api/presentation/reset`, `GET /api/presentation/base64`,
//!   `GET /api/presentation/preview`, `POST /api/set/slideBase64`

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::components::{ComponentSpec, Content};
use crate::config::Config;
use crate::error::DeckError;
use crate::models::{Bounds, PartialBounds};
use crate::services::{
    AlignShapesRequest, AlignmentSummary, BulkPositionSummary, CompoundAlignment, Deck, ShapeInfo,
    ShapeRole, SlideId, TitleCoordinates,
};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// The presentation being edited
    deck: Arc<Mutex<Deck>>,
}

impl AppState {
    /// Creates a new application state around `deck`.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck: Arc::new(Mutex::new(deck)),
        }
    }

    /// Creates an empty deck using the configured default theme.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let deck = Deck::with_theme_name(&config.presentation.default_theme)?;
        Ok(Self::new(deck))
    }

    /// Locks the deck for the duration of one handler, recovering the guard
    /// if an earlier handler panicked.
    fn deck(&self) -> MutexGuard<'_, Deck> {
        self.deck.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Generic acknowledgement.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Outcome keyword ("ok", "deleted").
    pub status: &'static str,
    /// Optional human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl StatusResponse {
    const fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }
}

/// Theme list response.
#[derive(Debug, Serialize)]
pub struct ThemeListResponse {
    /// Selectable theme keys.
    pub themes: Vec<&'static str>,
}

/// Theme selection request.
#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    /// Key of the theme to activate.
    pub theme_name: String,
}

/// Query parameters for slide creation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSlideQuery {
    /// Layout index (defaults to 0, the title slide).
    #[serde(default)]
    pub layout: usize,
}

/// Newly created slide.
#[derive(Debug, Serialize)]
pub struct SlideIdResponse {
    /// Identifier of the slide.
    pub slide_id: SlideId,
}

/// Slide list response.
#[derive(Debug, Serialize)]
pub struct SlideListResponse {
    /// Slide ids in presentation order.
    pub slide_ids: Vec<SlideId>,
}

/// Text placed in a title, subtitle or text box.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    /// Markdown text.
    pub text: String,
    /// Optional box geometry.
    #[serde(flatten)]
    pub position: PartialBounds,
}

/// Bullet list request.
#[derive(Debug, Deserialize)]
pub struct BulletPointsRequest {
    /// One markdown line per point.
    pub points: Vec<String>,
    /// Optional box geometry.
    #[serde(flatten)]
    pub position: PartialBounds,
}

/// Picture request.
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// Image location.
    pub image_path: String,
    /// Optional box geometry.
    #[serde(flatten)]
    pub position: PartialBounds,
}

/// Background fill request.
#[derive(Debug, Deserialize)]
pub struct BackgroundRequest {
    /// `#RRGGBB` color.
    pub color: String,
}

/// Component request.
#[derive(Debug, Deserialize)]
pub struct ComponentRequest {
    /// Component kind name.
    pub component_type: String,
    /// Kind-specific content.
    #[serde(default)]
    pub content: Content,
}

/// Shape inspection response.
#[derive(Debug, Serialize)]
pub struct ShapesResponse {
    /// Inspected slide.
    pub slide_id: SlideId,
    /// Number of shapes.
    pub shape_count: usize,
    /// Shapes in z-order.
    pub shapes: Vec<ShapeInfo>,
}

/// Title repositioning response.
#[derive(Debug, Serialize)]
pub struct TitlePositionResponse {
    /// Always "ok".
    pub status: &'static str,
    /// Human-readable detail.
    pub message: &'static str,
    /// Updated slide.
    pub slide_id: SlideId,
    /// Geometry now applied to the title.
    pub new_position: Bounds,
}

/// Bulk title positioning request.
#[derive(Debug, Deserialize)]
pub struct BulkTitlePositionRequest {
    /// 1-based slide numbers.
    pub slide_numbers: Vec<i64>,
    /// Fields to write; missing fields are left unchanged.
    pub position: PartialBounds,
}

/// Single-role alignment request.
#[derive(Debug, Deserialize)]
pub struct AlignRequest {
    /// 1-based reference slide number.
    pub reference_slide_number: i64,
    /// 1-based target slide numbers.
    pub target_slide_numbers: Vec<i64>,
}

/// Exported presentation.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Always "ok".
    pub status: &'static str,
    /// Base64 snapshot.
    pub base64: String,
    /// Suggested file name.
    pub filename: &'static str,
    /// Number of slides in the snapshot.
    pub slide_count: usize,
}

/// Preview payload.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Always "ok".
    pub status: &'static str,
    /// Base64 snapshot.
    pub base64: String,
    /// Number of slides.
    pub slide_count: usize,
    /// Slide ids in presentation order.
    pub slide_ids: Vec<SlideId>,
    /// Display name of the active theme.
    pub current_theme: String,
}

/// Snapshot import request.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Base64 snapshot.
    #[serde(rename = "slideBase64")]
    pub slide_base64: String,
}

/// Snapshot import response.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Always "ok".
    pub status: &'static str,
    /// Human-readable detail.
    pub message: &'static str,
    /// Number of imported slides.
    pub slide_count: usize,
    /// Fresh ids of the imported slides.
    pub slide_ids: Vec<SlideId>,
}

/// API error response.
///
/// Sent with status 200: callers distinguish failures by the `error` field.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
}

impl From<DeckError> for ApiError {
    fn from(e: DeckError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses a slide id path segment; anything unparseable is simply unknown.
fn parse_slide_id(raw: &str) -> Result<SlideId, ApiError> {
    raw.parse().map_err(|_| DeckError::SlideNotFound.into())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/themes - List selectable themes.
async fn list_themes() -> Json<ThemeListResponse> {
    Json(ThemeListResponse {
        themes: Deck::list_themes(),
    })
}

/// POST /api/theme - Activate a theme for slides created from now on.
async fn set_theme(
    State(state): State<AppState>,
    Json(req): Json<ThemeRequest>,
) -> ApiResult<StatusResponse> {
    state.deck().set_theme(&req.theme_name)?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/slide?layout=N - Append a slide built from a layout.
async fn create_slide(
    State(state): State<AppState>,
    Query(query): Query<CreateSlideQuery>,
) -> ApiResult<SlideIdResponse> {
    let slide_id = state.deck().create_slide(query.layout)?;
    Ok(Json(SlideIdResponse { slide_id }))
}

/// POST /api/slide/blank - Append a slide without placeholders.
async fn create_blank_slide(State(state): State<AppState>) -> Json<SlideIdResponse> {
    let slide_id = state.deck().create_blank_slide();
    Json(SlideIdResponse { slide_id })
}

/// GET /api/slides - List slide ids in order.
async fn list_slides(State(state): State<AppState>) -> Json<SlideListResponse> {
    Json(SlideListResponse {
        slide_ids: state.deck().slide_ids(),
    })
}

/// DELETE /api/slide/{slide_id} - Remove a slide.
async fn delete_slide(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    state.deck().delete_slide(id)?;
    Ok(Json(StatusResponse {
        status: "deleted",
        message: None,
    }))
}

/// POST /api/slide/{slide_id}/title - Set the slide title.
async fn add_title(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(req): Json<TextRequest>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    state.deck().add_title(id, &req.text, &req.position)?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/slide/{slide_id}/subtitle - Set the slide subtitle.
async fn add_subtitle(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(req): Json<TextRequest>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    state.deck().add_subtitle(id, &req.text, &req.position)?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/slide/{slide_id}/bullet_points - Add a bulleted text box.
async fn add_bullet_points(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(req): Json<BulletPointsRequest>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    state
        .deck()
        .add_bullet_points(id, &req.points, &req.position)?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/slide/{slide_id}/text_box - Add a body text box.
async fn add_text_box(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(req): Json<TextRequest>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    state.deck().add_text_box(id, &req.text, &req.position)?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/slide/{slide_id}/image - Add a picture.
async fn add_image(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(req): Json<ImageRequest>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    state.deck().add_image(id, &req.image_path, &req.position)?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/slide/{slide_id}/background - Fill the slide background.
async fn set_background(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(req): Json<BackgroundRequest>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    state.deck().set_background(id, &req.color)?;
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/slide/{slide_id}/component - Render a component.
async fn add_component(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(req): Json<ComponentRequest>,
) -> ApiResult<StatusResponse> {
    let id = parse_slide_id(&slide_id)?;
    let component = ComponentSpec::parse(&req.component_type, req.content)?;
    state.deck().add_component(id, &component)?;
    Ok(Json(StatusResponse::ok()))
}

/// GET /api/slide/{slide_id}/shapes - Describe every shape on a slide.
async fn get_slide_shapes(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> ApiResult<ShapesResponse> {
    let id = parse_slide_id(&slide_id)?;
    let shapes = state.deck().shapes(id)?;
    Ok(Json(ShapesResponse {
        slide_id: id,
        shape_count: shapes.len(),
        shapes,
    }))
}

/// POST /api/slide/{slide_id}/title/position - Move and resize the title.
async fn set_title_position(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
    Json(bounds): Json<Bounds>,
) -> ApiResult<TitlePositionResponse> {
    let id = parse_slide_id(&slide_id)?;
    let new_position = state.deck().set_title_position(id, bounds)?;
    Ok(Json(TitlePositionResponse {
        status: "ok",
        message: "Title position updated successfully",
        slide_id: id,
        new_position,
    }))
}

/// GET /api/slide/{slide_id}/title/coordinates - Title text and geometry.
async fn get_title_coordinates(
    State(state): State<AppState>,
    Path(slide_id): Path<String>,
) -> ApiResult<TitleCoordinates> {
    let id = parse_slide_id(&slide_id)?;
    Ok(Json(state.deck().title_coordinates(id)?))
}

/// POST /api/slides/bulk/title/position - Position titles on many slides.
async fn set_bulk_title_positions(
    State(state): State<AppState>,
    Json(req): Json<BulkTitlePositionRequest>,
) -> Json<BulkPositionSummary> {
    Json(
        state
            .deck()
            .set_bulk_title_positions(&req.slide_numbers, &req.position),
    )
}

fn align_role(state: &AppState, role: ShapeRole, req: &AlignRequest) -> ApiResult<AlignmentSummary> {
    let summary = state.deck().align_to_reference(
        role,
        req.reference_slide_number,
        &req.target_slide_numbers,
    )?;
    Ok(Json(summary))
}

/// POST /api/slides/align_titles_to_reference
async fn align_titles(
    State(state): State<AppState>,
    Json(req): Json<AlignRequest>,
) -> ApiResult<AlignmentSummary> {
    align_role(&state, ShapeRole::Title, &req)
}

/// POST /api/slides/align_subtitles_to_reference
async fn align_subtitles(
    State(state): State<AppState>,
    Json(req): Json<AlignRequest>,
) -> ApiResult<AlignmentSummary> {
    align_role(&state, ShapeRole::Subtitle, &req)
}

/// POST /api/slides/align_footnotes_to_reference
async fn align_footnotes(
    State(state): State<AppState>,
    Json(req): Json<AlignRequest>,
) -> ApiResult<AlignmentSummary> {
    align_role(&state, ShapeRole::Footnote, &req)
}

/// POST /api/v2/slides/align_shapes_to_reference - Align several roles.
async fn align_shapes(
    State(state): State<AppState>,
    Json(req): Json<AlignShapesRequest>,
) -> ApiResult<CompoundAlignment> {
    Ok(Json(state.deck().align_shapes(&req)?))
}

/// POST /api/presentation/reset - Drop every slide.
async fn reset_presentation(State(state): State<AppState>) -> Json<StatusResponse> {
    state.deck().reset();
    Json(StatusResponse {
        status: "ok",
        message: Some("Presentation reset"),
    })
}

/// GET /api/presentation/base64 - Export the presentation.
async fn get_presentation_base64(State(state): State<AppState>) -> ApiResult<ExportResponse> {
    let deck = state.deck();
    let base64 = deck.export_snapshot()?;
    Ok(Json(ExportResponse {
        status: "ok",
        base64,
        filename: "presentation.json",
        slide_count: deck.slides().len(),
    }))
}

/// GET /api/presentation/preview - Export plus slide ids and theme.
async fn get_presentation_preview(State(state): State<AppState>) -> ApiResult<PreviewResponse> {
    let deck = state.deck();
    let base64 = deck.export_snapshot()?;
    Ok(Json(PreviewResponse {
        status: "ok",
        base64,
        slide_count: deck.slides().len(),
        slide_ids: deck.slide_ids(),
        current_theme: deck.theme().name().to_string(),
    }))
}

/// POST /api/set/slideBase64 - Replace the presentation with a snapshot.
async fn set_slide_base64(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> ApiResult<ImportResponse> {
    let slide_ids = state
        .deck()
        .import_snapshot(&req.slide_base64)
        .inspect_err(|e| warn!("Snapshot import failed: {e}"))?;
    Ok(Json(ImportResponse {
        status: "ok",
        message: "Presentation initialized from base64",
        slide_count: slide_ids.len(),
        slide_ids,
    }))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Theme endpoints
        .route("/api/themes", get(list_themes))
        .route("/api/theme", post(set_theme))
        // Slide lifecycle
        .route("/api/slide", post(create_slide))
        .route("/api/slide/blank", post(create_blank_slide))
        .route("/api/slides", get(list_slides))
        .route("/api/slide/{slide_id}", delete(delete_slide))
        // Slide content
        .route("/api/slide/{slide_id}/title", post(add_title))
        .route("/api/slide/{slide_id}/subtitle", post(add_subtitle))
        .route("/api/slide/{slide_id}/bullet_points", post(add_bullet_points))
        .route("/api/slide/{slide_id}/text_box", post(add_text_box))
        .route("/api/slide/{slide_id}/image", post(add_image))
        .route("/api/slide/{slide_id}/background", post(set_background))
        .route("/api/slide/{slide_id}/component", post(add_component))
        // Inspection and positioning
        .route("/api/slide/{slide_id}/shapes", get(get_slide_shapes))
        .route("/api/slide/{slide_id}/title/position", post(set_title_position))
        .route(
            "/api/slide/{slide_id}/title/coordinates",
            get(get_title_coordinates),
        )
        .route(
            "/api/slides/bulk/title/position",
            post(set_bulk_title_positions),
        )
        // Alignment
        .route("/api/slides/align_titles_to_reference", post(align_titles))
        .route(
            "/api/slides/align_subtitles_to_reference",
            post(align_subtitles),
        )
        .route(
            "/api/slides/align_footnotes_to_reference",
            post(align_footnotes),
        )
        .route(
            "/api/v2/slides/align_shapes_to_reference",
            post(align_shapes),
        )
        .route("/slides/align_shapes_to_reference", post(align_shapes))
        // Whole presentation
        .route("/api/presentation/reset", post(reset_presentation))
        .route("/api/presentation/base64", get(get_presentation_base64))
        .route("/api/presentation/preview", get(get_presentation_preview))
        .route("/api/set/slideBase64", post(set_slide_base64))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration (default theme)
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the configured theme is unknown or the server fails
/// to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    info!("Starting Deckwright server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
