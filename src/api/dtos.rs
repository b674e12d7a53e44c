use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::editor::FormatCommand;
use crate::export::{ExportBlock, ExportFormat};
use crate::resume::Resume;
use crate::suggestions::SuggestionPayload;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// One of `summary`, `description` or `skills`.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub job_title: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionResponse {
    /// Strings, or skill sets for `skills`.
    pub suggestions: Vec<SuggestionPayload>,
    /// Rich text ready to insert, one per suggestion.
    pub markup: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CanonicalizeRequest {
    pub html: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalizeResponse {
    pub html: String,
    pub is_empty: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportBlocksRequest {
    pub resume: Resume,
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExportBlocksResponse {
    pub filename: String,
    pub blocks: Vec<ExportBlock>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportTextRequest {
    pub resume: Resume,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatchRequest {
    pub resume: Resume,
    pub job_description: String,
}

impl KeywordMatchRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.job_description.trim().is_empty() {
            return Err("Job description cannot be empty".to_string());
        }
        if self.job_description.len() > MAX_JOB_DESCRIPTION_LEN {
            return Err("Job description too long".to_string());
        }
        Ok(())
    }
}

const MAX_JOB_DESCRIPTION_LEN: usize = 20_000;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfigResponse {
    pub character_limit: usize,
    pub commands: Vec<String>,
}

impl EditorConfigResponse {
    pub fn new(character_limit: usize) -> Self {
        Self {
            character_limit,
            commands: FormatCommand::TOOLBAR
                .iter()
                .map(|command| command.as_str().to_string())
                .collect(),
        }
    }
}
