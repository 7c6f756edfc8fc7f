use crate::models::MatchResponse;

/// Keywords reported on every successful match
pub const MISSING_KEYWORDS: [&str; 3] = ["Docker", "Kubernetes", "CI/CD"];

/// Advisory text reported on every successful match
pub const SUGGESTIONS: [&str; 3] = [
    "Include more cloud-related experience.",
    "Highlight agile methodologies.",
    "Mention containerization tools.",
];

/// Suggestion returned when the inference API answers with a non-success status
pub const UPSTREAM_ERROR_SUGGESTION: &str = "Error generating similarity score.";

/// Suggestion returned when the inference API body cannot be read as a score
pub const PARSE_FAILURE_SUGGESTION: &str = "Similarity parsing failed.";

/// Convert a similarity in [-1, 1] to a match score, rounded to 2 decimals
///
/// score = round(similarity * 100, 2)
#[inline]
pub fn similarity_to_score(similarity: f64) -> f64 {
    round_to_hundredths(similarity * 100.0)
}

/// Round the exact binary value to 2 decimals, ties to even
///
/// Decimal formatting works on the exact value, so 40.525 (stored as
/// 40.52499...) stays 40.52 instead of picking up scaling error.
#[inline]
fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Build the response for a successful similarity lookup
pub fn scored_response(similarity: f64) -> MatchResponse {
    MatchResponse {
        score: similarity_to_score(similarity),
        missing_keywords: MISSING_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Build the zero-score response used when the inference API is reachable but unusable
pub fn degraded_response(suggestion: &str) -> MatchResponse {
    MatchResponse {
        score: 0.0,
        missing_keywords: Vec::new(),
        suggestions: vec![suggestion.to_string()],
    }
}
