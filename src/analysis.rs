//! Keyword match between a job description and a resume.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Failed to compile non-word regex"));

const MAX_KEYWORDS: usize = 20;
const MIN_KEYWORD_LEN: usize = 4;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "for", "nor", "on", "at", "to", "from", "by", "with",
        "in", "out", "over", "under", "again", "further", "then", "once", "here", "there", "when",
        "where", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
        "such", "no", "not", "only", "own", "same", "so", "than", "too", "very", "can", "will",
        "just", "should", "now", "if", "of", "as", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "do", "does", "did", "doing", "would", "could", "must",
        "shall", "may", "might", "that", "this", "these", "those", "we", "you", "they", "i", "he",
        "she", "it", "who", "whom", "whose", "which", "what", "whatever", "whoever", "whomever",
        "job", "description", "company", "position", "role", "candidate", "applicant",
        "application", "resume", "apply", "please", "thank", "opportunity", "about", "us", "our",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Percentage of keywords found, 0 to 100.
    pub score: u32,
}

/// Most frequent meaningful words of a job description, at most twenty.
pub fn top_keywords(job_description: &str) -> Vec<String> {
    let lowered = job_description.to_lowercase();
    let cleaned = NON_WORD_REGEX.replace_all(&lowered, " ");

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, word) in cleaned.split_whitespace().enumerate() {
        if word.chars().count() < MIN_KEYWORD_LEN || STOP_WORDS.contains(word) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _, _)| word.to_string())
        .collect()
}

pub fn keyword_match(corpus: &str, job_description: &str) -> KeywordMatch {
    let keywords = top_keywords(job_description);
    let corpus = corpus.to_lowercase();

    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = keywords
        .into_iter()
        .partition(|keyword| corpus.contains(keyword.as_str()));

    let total = matched_keywords.len() + missing_keywords.len();
    let score = if total == 0 {
        0
    } else {
        (matched_keywords.len() as f64 / total as f64 * 100.0).round() as u32
    };

    KeywordMatch {
        matched_keywords,
        missing_keywords,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_keywords_rank_by_frequency() {
        let keywords =
            top_keywords("Rust developer. Rust services, Kubernetes; the developer owns Rust.");
        assert_eq!(keywords, vec!["rust", "developer", "services", "kubernetes", "owns"]);
    }

    #[test]
    fn test_short_and_stop_words_excluded() {
        let keywords = top_keywords("We are looking for a candidate with SQL and Python skills");
        assert_eq!(keywords, vec!["looking", "python", "skills"]);
    }

    #[test]
    fn test_at_most_twenty_keywords() {
        let description = (0..30)
            .map(|i| format!("keyword{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(top_keywords(&description).len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_keyword_match_score() {
        let result = keyword_match(
            "Senior engineer building Rust services",
            "Rust services with Kafka",
        );
        assert_eq!(result.matched_keywords, vec!["rust", "services"]);
        assert_eq!(result.missing_keywords, vec!["kafka"]);
        assert_eq!(result.score, 67);
    }

    #[test]
    fn test_empty_description_scores_zero() {
        let result = keyword_match("anything", "the and of");
        assert!(result.matched_keywords.is_empty());
        assert_eq!(result.score, 0);
    }
}
