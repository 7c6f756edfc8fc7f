// Service exports
pub mod huggingface;

pub use huggingface::{parse_similarity, HuggingFaceClient, HuggingFaceError};
