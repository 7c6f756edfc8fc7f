// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AllowedOrigins, SimilarityInputs, SimilarityRequest};
pub use requests::MatchRequest;
pub use responses::{ErrorDetail, HealthResponse, MatchResponse};
