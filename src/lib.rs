//! Match Relay - scores a résumé against a job description
//!
//! The relay validates the request, checks the caller's origin against an
//! allow-list, asks a sentence-similarity inference API for a score and maps
//! the result onto a fixed response shape.

pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::config::Settings;
pub use crate::core::{degraded_response, scored_response, similarity_to_score};
pub use crate::errors::RelayError;
pub use crate::models::{AllowedOrigins, MatchRequest, MatchResponse};
pub use crate::routes::AppState;
pub use crate::services::{HuggingFaceClient, HuggingFaceError};
