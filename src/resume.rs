use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A resume document. `summary` and item descriptions hold rich text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub sections: Vec<ResumeSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub links: Vec<Link>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ResumeSection {
    pub id: String,
    pub title: String,
    pub items: Vec<ResumeItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ResumeItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub description: String,
}

impl ResumeItem {
    fn new(id: &str, title: &str, subtitle: &str, date: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            date: date.to_string(),
            description: description.to_string(),
        }
    }
}

impl Resume {
    /// The starter resume shown to new users.
    pub fn sample() -> Self {
        Self {
            personal_info: PersonalInfo {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                title: "Software Engineer".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                location: "San Francisco, CA".to_string(),
                summary: "Experienced software engineer with a passion for building scalable web applications and solving complex problems.".to_string(),
                links: vec![
                    Link {
                        id: "link-1".to_string(),
                        title: "LinkedIn".to_string(),
                        url: "https://linkedin.com/in/johndoe".to_string(),
                    },
                    Link {
                        id: "link-2".to_string(),
                        title: "GitHub".to_string(),
                        url: "https://github.com/johndoe".to_string(),
                    },
                ],
            },
            sections: vec![
                ResumeSection {
                    id: "experience".to_string(),
                    title: "Work Experience".to_string(),
                    items: vec![
                        ResumeItem::new(
                            "exp-1",
                            "Senior Software Engineer",
                            "Tech Company Inc.",
                            "Jan 2020 - Present",
                            "Led development of a microservices architecture. Improved system performance by 40%. Mentored junior developers.",
                        ),
                        ResumeItem::new(
                            "exp-2",
                            "Software Engineer",
                            "Startup XYZ",
                            "Jun 2017 - Dec 2019",
                            "Developed and maintained RESTful APIs. Implemented CI/CD pipelines. Collaborated with cross-functional teams.",
                        ),
                    ],
                },
                ResumeSection {
                    id: "education".to_string(),
                    title: "Education".to_string(),
                    items: vec![
                        ResumeItem::new(
                            "edu-1",
                            "Master of Computer Science",
                            "University of Technology",
                            "2015 - 2017",
                            "Specialized in Artificial Intelligence and Machine Learning. GPA: 3.8/4.0",
                        ),
                        ResumeItem::new(
                            "edu-2",
                            "Bachelor of Science in Computer Science",
                            "State University",
                            "2011 - 2015",
                            "Dean's List. Participated in ACM programming competitions.",
                        ),
                    ],
                },
                ResumeSection {
                    id: "skills".to_string(),
                    title: "Skills".to_string(),
                    items: vec![
                        ResumeItem::new(
                            "skill-1",
                            "Programming Languages",
                            "JavaScript, TypeScript, Python, Java",
                            "",
                            "",
                        ),
                        ResumeItem::new(
                            "skill-2",
                            "Frameworks & Libraries",
                            "React, Node.js, Express, Next.js",
                            "",
                            "",
                        ),
                        ResumeItem::new(
                            "skill-3",
                            "Tools & Technologies",
                            "Git, Docker, AWS, CI/CD, Agile/Scrum",
                            "",
                            "",
                        ),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_round_trip() {
        let resume = Resume::sample();
        let json = serde_json::to_value(&resume).unwrap();
        assert_eq!(json["personalInfo"]["firstName"], "John");
        assert_eq!(json["sections"][0]["items"][0]["subtitle"], "Tech Company Inc.");

        let back: Resume = serde_json::from_value(json).unwrap();
        assert_eq!(back, resume);
    }

    #[test]
    fn test_missing_fields_default() {
        let resume: Resume =
            serde_json::from_str(r#"{"personalInfo":{"firstName":"Ada"}}"#).unwrap();
        assert_eq!(resume.personal_info.first_name, "Ada");
        assert!(resume.personal_info.links.is_empty());
        assert!(resume.sections.is_empty());
    }

    #[test]
    fn test_full_name_skips_blanks() {
        let mut info = Resume::sample().personal_info;
        assert_eq!(info.full_name(), "John Doe");
        info.first_name = "  ".to_string();
        assert_eq!(info.full_name(), "Doe");
    }
}
