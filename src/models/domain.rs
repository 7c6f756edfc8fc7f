use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Origins permitted to call the relay
///
/// Built once from the comma-separated `ALLOWED_ORIGINS` value and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOrigins {
    origins: HashSet<String>,
}

impl AllowedOrigins {
    /// Parse a comma-separated list, trimming whitespace and dropping empty entries
    pub fn parse(raw: &str) -> Self {
        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Self { origins }
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.origins.contains(origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Outbound body for the sentence-similarity task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub inputs: SimilarityInputs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityInputs {
    pub source_sentence: String,
    pub sentences: Vec<String>,
}

impl SimilarityRequest {
    /// Pair the résumé (source) against a single job description (candidate)
    pub fn new(resume: &str, jd: &str) -> Self {
        Self {
            inputs: SimilarityInputs {
                source_sentence: resume.to_string(),
                sentences: vec![jd.to_string()],
            },
        }
    }
}
