//! Rich text and resumes flattened into document blocks.

pub mod assembler;
pub mod blocks;
pub mod resume;

pub use assembler::{
    DocumentAssembler, ExportArtifact, ExportError, PlainTextAssembler, export_resume,
};
pub use blocks::{ExportBlock, ExtractOptions, extract_blocks, strip_tags};
pub use resume::{ExportFormat, export_filename, resume_blocks, resume_corpus};
