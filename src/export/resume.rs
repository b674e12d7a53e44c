use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::export::blocks::{
    ExportBlock, ExtractOptions, collapse_whitespace, extract_blocks, strip_tags,
};
use crate::resume::{PersonalInfo, Resume};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Docx,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Text => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

const SUMMARY_HEADING: &str = "Professional Summary";

fn joined(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn rich_text_blocks(html: &str) -> Vec<ExportBlock> {
    extract_blocks(html, ExtractOptions::default())
}

/// Orders a whole resume into export blocks.
pub fn resume_blocks(resume: &Resume) -> Vec<ExportBlock> {
    let info = &resume.personal_info;
    let mut blocks = Vec::new();

    let name = info.full_name();
    if !name.is_empty() {
        blocks.push(ExportBlock::heading(name, 1));
    }
    if !info.title.trim().is_empty() {
        blocks.push(ExportBlock::bold(info.title.trim()));
    }

    let contact = joined(&[info.email.as_str(), info.phone.as_str(), info.location.as_str()]);
    if !contact.is_empty() {
        blocks.push(ExportBlock::paragraph(contact));
    }
    for link in &info.links {
        let (title, url) = (link.title.trim(), link.url.trim());
        match (title.is_empty(), url.is_empty()) {
            (_, true) => {}
            (true, false) => blocks.push(ExportBlock::paragraph(url)),
            (false, false) => blocks.push(ExportBlock::paragraph(format!("{title}: {url}"))),
        }
    }

    let summary = rich_text_blocks(&info.summary);
    if !summary.is_empty() {
        blocks.push(ExportBlock::heading(SUMMARY_HEADING, 2));
        blocks.extend(summary);
    }

    for section in &resume.sections {
        if !section.title.trim().is_empty() {
            blocks.push(ExportBlock::heading(section.title.trim(), 2));
        }
        for item in &section.items {
            if !item.title.trim().is_empty() {
                blocks.push(ExportBlock::bold(item.title.trim()));
            }
            let details = joined(&[item.subtitle.as_str(), item.date.as_str()]);
            if !details.is_empty() {
                blocks.push(ExportBlock::paragraph(details));
            }
            blocks.extend(rich_text_blocks(&item.description));
        }
    }
    blocks
}

/// Flattened plain text of a resume, for keyword analysis.
pub fn resume_corpus(resume: &Resume) -> String {
    let info = &resume.personal_info;
    let mut parts = vec![
        info.first_name.clone(),
        info.last_name.clone(),
        info.title.clone(),
        strip_tags(&info.summary),
    ];
    for section in &resume.sections {
        parts.push(section.title.clone());
        for item in &section.items {
            parts.push(item.title.clone());
            parts.push(item.subtitle.clone());
            parts.push(strip_tags(&item.description));
        }
    }
    collapse_whitespace(&parts.join(" "))
}

fn filename_part(part: &str) -> String {
    part.split_whitespace().collect::<Vec<_>>().join("_")
}

/// `{firstName}_{lastName}_Resume.{ext}`, skipping blank name parts.
pub fn export_filename(info: &PersonalInfo, format: ExportFormat) -> String {
    let parts: Vec<String> = [info.first_name.as_str(), info.last_name.as_str()]
        .into_iter()
        .map(filename_part)
        .filter(|part| !part.is_empty())
        .collect();

    let stem = if parts.is_empty() {
        "My_Resume".to_string()
    } else {
        format!("{}_Resume", parts.join("_"))
    };
    format!("{stem}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{ResumeItem, ResumeSection};

    #[test]
    fn test_sample_resume_blocks() {
        let blocks = resume_blocks(&Resume::sample());

        assert_eq!(blocks[0], ExportBlock::heading("John Doe", 1));
        assert_eq!(blocks[1], ExportBlock::bold("Software Engineer"));
        assert_eq!(
            blocks[2],
            ExportBlock::paragraph("john.doe@example.com | (555) 123-4567 | San Francisco, CA")
        );
        assert_eq!(
            blocks[3],
            ExportBlock::paragraph("LinkedIn: https://linkedin.com/in/johndoe")
        );
        assert_eq!(blocks[5], ExportBlock::heading("Professional Summary", 2));
        assert_eq!(blocks[7], ExportBlock::heading("Work Experience", 2));
        assert_eq!(blocks[8], ExportBlock::bold("Senior Software Engineer"));
        assert_eq!(
            blocks[9],
            ExportBlock::paragraph("Tech Company Inc. | Jan 2020 - Present")
        );

        // skill items have no date or description
        let last = blocks.last().unwrap();
        assert_eq!(last, &ExportBlock::paragraph("Git, Docker, AWS, CI/CD, Agile/Scrum"));
    }

    #[test]
    fn test_empty_fields_produce_no_blocks() {
        let resume = Resume {
            sections: vec![ResumeSection {
                id: "s".to_string(),
                title: String::new(),
                items: vec![ResumeItem::default()],
            }],
            ..Resume::default()
        };
        assert!(resume_blocks(&resume).is_empty());
    }

    #[test]
    fn test_rich_text_description_becomes_list() {
        let mut resume = Resume::default();
        resume.sections.push(ResumeSection {
            id: "exp".to_string(),
            title: "Experience".to_string(),
            items: vec![ResumeItem {
                title: "Engineer".to_string(),
                description: "<ul><li>Did X</li><li>Did <b>Y</b></li></ul>".to_string(),
                ..ResumeItem::default()
            }],
        });

        assert_eq!(
            resume_blocks(&resume),
            vec![
                ExportBlock::heading("Experience", 2),
                ExportBlock::bold("Engineer"),
                ExportBlock::list_item("Did X", 0),
                ExportBlock::list_item("Did Y", 0),
            ]
        );
    }

    #[test]
    fn test_corpus_strips_markup() {
        let mut resume = Resume::sample();
        resume.personal_info.summary = "<p>Loves <b>Rust</b></p>".to_string();
        let corpus = resume_corpus(&resume);
        assert!(corpus.starts_with("John Doe Software Engineer Loves Rust Work Experience"));
        assert!(!corpus.contains('<'));
        assert!(!corpus.contains("  "));
    }

    #[test]
    fn test_export_filename() {
        let mut info = Resume::sample().personal_info;
        assert_eq!(export_filename(&info, ExportFormat::Pdf), "John_Doe_Resume.pdf");

        info.first_name = "Mary Ann".to_string();
        assert_eq!(export_filename(&info, ExportFormat::Docx), "Mary_Ann_Doe_Resume.docx");

        info.first_name.clear();
        assert_eq!(export_filename(&info, ExportFormat::Text), "Doe_Resume.txt");

        info.last_name = " ".to_string();
        assert_eq!(export_filename(&info, ExportFormat::Pdf), "My_Resume.pdf");
    }
}
