use thiserror::Error;
use tracing::{debug, warn};

use crate::export::blocks::ExportBlock;
use crate::export::resume::{ExportFormat, export_filename, resume_blocks};
use crate::resume::Resume;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("resume has no content to export")]
    EmptyDocument,
    #[error("document assembly failed: {0}")]
    Assembly(String),
}

/// Turns export blocks into a finished document.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentAssembler {
    fn format(&self) -> ExportFormat;

    fn assemble(&self, blocks: &[ExportBlock]) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn export_resume(
    resume: &Resume,
    assembler: &dyn DocumentAssembler,
) -> Result<ExportArtifact, ExportError> {
    let blocks = resume_blocks(resume);
    if blocks.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let format = assembler.format();
    let bytes = assembler.assemble(&blocks).inspect_err(|error| {
        warn!(%format, %error, "resume export failed");
    })?;

    let filename = export_filename(&resume.personal_info, format);
    debug!(%filename, blocks = blocks.len(), bytes = bytes.len(), "resume exported");

    Ok(ExportArtifact {
        filename,
        content_type: format.content_type(),
        bytes,
    })
}

/// Renders blocks as plain UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextAssembler;

impl PlainTextAssembler {
    pub fn render(blocks: &[ExportBlock]) -> String {
        let mut out = String::new();
        for block in blocks {
            match block {
                ExportBlock::Heading { text, level } => {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    if *level <= 1 {
                        out.push_str(&text.to_uppercase());
                        out.push('\n');
                    } else {
                        out.push_str(text);
                        out.push('\n');
                        out.push_str(&"-".repeat(text.chars().count()));
                        out.push('\n');
                    }
                }
                ExportBlock::Paragraph { text, .. } => {
                    out.push_str(text);
                    out.push('\n');
                }
                ExportBlock::ListItem { text, indent_level } => {
                    out.push_str(&"  ".repeat(*indent_level));
                    out.push_str("• ");
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out
    }
}

impl DocumentAssembler for PlainTextAssembler {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn assemble(&self, blocks: &[ExportBlock]) -> Result<Vec<u8>, ExportError> {
        Ok(Self::render(blocks).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_rendering() {
        let blocks = vec![
            ExportBlock::heading("Jane Roe", 1),
            ExportBlock::bold("Engineer"),
            ExportBlock::heading("Skills", 2),
            ExportBlock::list_item("Rust", 0),
            ExportBlock::list_item("Tokio", 1),
        ];
        assert_eq!(
            PlainTextAssembler::render(&blocks),
            "JANE ROE\nEngineer\n\nSkills\n------\n• Rust\n  • Tokio\n"
        );
    }

    #[test]
    fn test_export_resume_plain_text() {
        let artifact = export_resume(&Resume::sample(), &PlainTextAssembler).unwrap();
        assert_eq!(artifact.filename, "John_Doe_Resume.txt");
        assert_eq!(artifact.content_type, "text/plain; charset=utf-8");

        let text = String::from_utf8(artifact.bytes).unwrap();
        assert!(text.starts_with("JOHN DOE\nSoftware Engineer\n"));
        assert!(text.contains("Work Experience\n---------------\n"));
    }

    #[test]
    fn test_export_passes_blocks_to_assembler() {
        let mut assembler = MockDocumentAssembler::new();
        assembler.expect_format().return_const(ExportFormat::Docx);
        assembler
            .expect_assemble()
            .withf(|blocks| blocks.first() == Some(&ExportBlock::heading("John Doe", 1)))
            .times(1)
            .returning(|_| Ok(vec![1, 2, 3]));

        let artifact = export_resume(&Resume::sample(), &assembler).unwrap();
        assert_eq!(artifact.filename, "John_Doe_Resume.docx");
        assert_eq!(artifact.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_assembler_failure_leaves_resume_untouched() {
        let resume = Resume::sample();
        let before = resume.clone();

        let mut assembler = MockDocumentAssembler::new();
        assembler.expect_format().return_const(ExportFormat::Pdf);
        assembler
            .expect_assemble()
            .returning(|_| Err(ExportError::Assembly("font missing".to_string())));

        let error = export_resume(&resume, &assembler).unwrap_err();
        assert_eq!(error, ExportError::Assembly("font missing".to_string()));
        assert_eq!(resume, before);
    }

    #[test]
    fn test_empty_resume_is_rejected() {
        let assembler = MockDocumentAssembler::new();
        assert_eq!(
            export_resume(&Resume::default(), &assembler),
            Err(ExportError::EmptyDocument)
        );
    }
}
