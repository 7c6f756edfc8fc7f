// Core logic exports
pub mod redact;
pub mod scoring;

pub use redact::{mask_authorization, mask_secret, redact_headers};
pub use scoring::{degraded_response, scored_response, similarity_to_score};
