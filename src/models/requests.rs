use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to score a résumé against a job description
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1, message = "resume must not be empty"))]
    pub resume: String,
    #[validate(length(min = 1, message = "jd must not be empty"))]
    pub jd: String,
}
