//! HTTP surface over the content core.

pub mod dtos;
pub mod handlers;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    analysis::KeywordMatch,
    app_state::AppState,
    export::{ExportBlock, ExportFormat},
    health::{self, HealthResponse},
    resume::{Link, PersonalInfo, Resume, ResumeItem, ResumeSection},
    suggestions::SuggestionPayload,
};
use dtos::{
    CanonicalizeRequest, CanonicalizeResponse, EditorConfigResponse, ErrorResponse,
    ExportBlocksRequest, ExportBlocksResponse, ExportTextRequest, KeywordMatchRequest,
    SuggestionRequest, SuggestionResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        handlers::ai_suggestions,
        handlers::canonicalize,
        handlers::editor_config,
        handlers::export_blocks,
        handlers::export_text,
        handlers::keyword_match,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        SuggestionRequest,
        SuggestionResponse,
        SuggestionPayload,
        CanonicalizeRequest,
        CanonicalizeResponse,
        EditorConfigResponse,
        ExportBlocksRequest,
        ExportBlocksResponse,
        ExportTextRequest,
        ExportBlock,
        ExportFormat,
        KeywordMatchRequest,
        KeywordMatch,
        Resume,
        PersonalInfo,
        Link,
        ResumeSection,
        ResumeItem,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "suggestions", description = "Canned content suggestions"),
        (name = "richtext", description = "Rich text canonicalization"),
        (name = "export", description = "Resume export"),
        (name = "analysis", description = "Resume analysis")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/ai-suggestions", post(handlers::ai_suggestions))
        .route("/api/richtext/canonicalize", post(handlers::canonicalize))
        .route("/api/editor/config", get(handlers::editor_config))
        .route("/api/export/blocks", post(handlers::export_blocks))
        .route("/api/export/text", post(handlers::export_text))
        .route("/api/keyword-match", post(handlers::keyword_match))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
