//! Suggestion source and ingestion into rich text.

pub mod catalog;
pub mod ingest;

use thiserror::Error;

pub use catalog::{JobTitle, SuggestionKind, Suggestions, suggestions};
pub use ingest::{SuggestionPayload, append_skills, to_markup};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("Invalid suggestion type")]
    InvalidKind(String),
}
