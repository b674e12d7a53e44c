use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{error, info, warn};

use crate::{
    analysis::{KeywordMatch, keyword_match as match_keywords},
    api::dtos::{
        CanonicalizeRequest, CanonicalizeResponse, EditorConfigResponse, ErrorResponse,
        ExportBlocksRequest, ExportBlocksResponse, ExportTextRequest, KeywordMatchRequest,
        SuggestionRequest, SuggestionResponse,
    },
    app_state::AppState,
    export::{
        ExportError, PlainTextAssembler, export_filename, export_resume, resume_blocks,
        resume_corpus,
    },
    richtext,
    suggestions::{JobTitle, SuggestionKind, SuggestionPayload, suggestions, to_markup},
};

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/ai-suggestions",
    tag = "suggestions",
    request_body = SuggestionRequest,
    responses(
        (status = 200, description = "Suggestions for the job title", body = SuggestionResponse),
        (status = 400, description = "Invalid suggestion type", body = ErrorResponse)
    )
)]
pub async fn ai_suggestions(Json(payload): Json<SuggestionRequest>) -> Response {
    let kind = match payload.kind.parse::<SuggestionKind>() {
        Ok(kind) => kind,
        Err(err) => {
            warn!(kind = %payload.kind, "rejected suggestion request");
            return error_response(StatusCode::BAD_REQUEST, err.to_string());
        }
    };
    let job = JobTitle::resolve(payload.job_title.as_deref());

    let suggestions: Vec<SuggestionPayload> = suggestions(kind, job).into();
    let markup = suggestions
        .iter()
        .map(|suggestion| match kind {
            SuggestionKind::Skills => suggestion.insertable(),
            _ => to_markup(&suggestion.insertable()),
        })
        .collect();

    info!(%kind, job = job.as_str(), count = suggestions.len(), "served suggestions");
    Json(SuggestionResponse {
        suggestions,
        markup,
    })
    .into_response()
}

#[utoipa::path(
    post,
    path = "/api/richtext/canonicalize",
    tag = "richtext",
    request_body = CanonicalizeRequest,
    responses(
        (status = 200, description = "Canonical rich text", body = CanonicalizeResponse)
    )
)]
pub async fn canonicalize(Json(payload): Json<CanonicalizeRequest>) -> Json<CanonicalizeResponse> {
    let html = richtext::canonicalize(&payload.html);
    Json(CanonicalizeResponse {
        is_empty: html.is_empty(),
        html,
    })
}

#[utoipa::path(
    get,
    path = "/api/editor/config",
    tag = "richtext",
    responses(
        (status = 200, description = "Editor defaults", body = EditorConfigResponse)
    )
)]
pub async fn editor_config(State(state): State<AppState>) -> Json<EditorConfigResponse> {
    Json(EditorConfigResponse::new(state.config.character_limit()))
}

#[utoipa::path(
    post,
    path = "/api/export/blocks",
    tag = "export",
    request_body = ExportBlocksRequest,
    responses(
        (status = 200, description = "Ordered export blocks", body = ExportBlocksResponse)
    )
)]
pub async fn export_blocks(Json(payload): Json<ExportBlocksRequest>) -> Json<ExportBlocksResponse> {
    let blocks = resume_blocks(&payload.resume);
    Json(ExportBlocksResponse {
        filename: export_filename(&payload.resume.personal_info, payload.format),
        blocks,
    })
}

fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|ch| {
            if ch.is_ascii() && !ch.is_ascii_control() && ch != '"' && ch != '\\' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[utoipa::path(
    post,
    path = "/api/export/text",
    tag = "export",
    request_body = ExportTextRequest,
    responses(
        (
            status = 200,
            description = "Plain text resume",
            body = String,
            content_type = "text/plain"
        ),
        (status = 422, description = "Nothing to export", body = ErrorResponse),
        (status = 500, description = "Export failed", body = ErrorResponse)
    )
)]
pub async fn export_text(Json(payload): Json<ExportTextRequest>) -> Response {
    let artifact = match export_resume(&payload.resume, &PlainTextAssembler) {
        Ok(artifact) => artifact,
        Err(ExportError::EmptyDocument) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                ExportError::EmptyDocument.to_string(),
            );
        }
        Err(err) => {
            error!(error = %err, "text export failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export resume");
        }
    };

    let disposition = match HeaderValue::from_str(&content_disposition(&artifact.filename)) {
        Ok(value) => value,
        Err(_) => HeaderValue::from_static("attachment"),
    };
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/keyword-match",
    tag = "analysis",
    request_body = KeywordMatchRequest,
    responses(
        (status = 200, description = "Keyword match result", body = KeywordMatch),
        (status = 400, description = "Invalid job description", body = ErrorResponse)
    )
)]
pub async fn keyword_match(Json(payload): Json<KeywordMatchRequest>) -> Response {
    if let Err(error) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, error);
    }
    let result = match_keywords(&resume_corpus(&payload.resume), &payload.job_description);
    info!(score = result.score, "keyword match computed");
    Json(result).into_response()
}
