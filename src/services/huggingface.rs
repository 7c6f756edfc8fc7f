use crate::core::mask_authorization;
use crate::models::SimilarityRequest;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the inference API
#[derive(Debug, Error)]
pub enum HuggingFaceError {
    /// Connection failure or timeout; the API never produced a response
    #[error("HTTP request failed: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Sentence-similarity client for the Hugging Face Inference API
///
/// The underlying `reqwest::Client` pools connections and is shared by all
/// request handlers.
pub struct HuggingFaceClient {
    api_url: String,
    api_token: String,
    client: Client,
}

impl HuggingFaceClient {
    /// Create a new client; `timeout` bounds the whole outbound call
    pub fn new(api_url: String, api_token: String, timeout: Duration) -> Result<Self, HuggingFaceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HuggingFaceError::ClientBuild)?;

        Ok(Self {
            api_url,
            api_token,
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Score `resume` against `jd`, returning the raw similarity in [-1, 1]
    pub async fn similarity(&self, resume: &str, jd: &str) -> Result<f64, HuggingFaceError> {
        let payload = SimilarityRequest::new(resume, jd);
        let authorization = format!("Bearer {}", self.api_token);

        tracing::info!(
            url = %self.api_url,
            authorization = %mask_authorization(&authorization),
            source_len = resume.len(),
            candidates = payload.inputs.sentences.len(),
            "Sending similarity request to inference API"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", authorization)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::info!(status = status.as_u16(), body = %body, "Inference API responded");

        // Only 200 carries scores; any other status, 2xx included, is an API error
        if status != StatusCode::OK {
            return Err(HuggingFaceError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        parse_similarity(&body)
    }
}

/// Read the first score out of a sentence-similarity response body
pub fn parse_similarity(body: &str) -> Result<f64, HuggingFaceError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| HuggingFaceError::InvalidResponse(format!("body is not JSON: {}", e)))?;

    json.as_array()
        .and_then(|scores| scores.first())
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            HuggingFaceError::InvalidResponse(format!("expected an array of scores, got {}", json))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const TOKEN: &str = "hf_testtoken123";

    fn client_for(url: String) -> HuggingFaceClient {
        HuggingFaceClient::new(url, TOKEN.to_string(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_similarity() {
        assert_eq!(parse_similarity("[0.87]").unwrap(), 0.87);
        assert_eq!(parse_similarity("[0.5, 0.1]").unwrap(), 0.5);
        assert_eq!(parse_similarity("[1]").unwrap(), 1.0);
    }

    #[test]
    fn test_parse_similarity_rejects_unexpected_shapes() {
        for body in ["{}", "[]", "[\"0.8\"]", "not json", "0.87", "{\"error\": \"loading\"}"] {
            assert!(
                matches!(parse_similarity(body), Err(HuggingFaceError::InvalidResponse(_))),
                "body {:?} should be rejected",
                body
            );
        }
    }

    #[actix_web::test]
    async fn test_similarity_sends_expected_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/all-MiniLM-L6-v2")
            .match_header("authorization", "Bearer hf_testtoken123")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "inputs": {
                    "source_sentence": "Python developer",
                    "sentences": ["Looking for Python engineer"]
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[0.87]")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(format!("{}/models/all-MiniLM-L6-v2", server.url()));
        let similarity = client
            .similarity("Python developer", "Looking for Python engineer")
            .await
            .unwrap();

        assert_eq!(similarity, 0.87);
        mock.assert_async().await;
    }

    #[actix_web::test]
    async fn test_similarity_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(503)
            .with_body("{\"error\": \"Model is currently loading\"}")
            .create_async()
            .await;

        let client = client_for(server.url());
        match client.similarity("a", "b").await {
            Err(HuggingFaceError::ApiError { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("loading"));
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_similarity_other_success_status_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(201)
            .with_body("[0.5]")
            .create_async()
            .await;

        let client = client_for(server.url());
        match client.similarity("a", "b").await {
            Err(HuggingFaceError::ApiError { status, .. }) => assert_eq!(status, 201),
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_similarity_unparseable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = client_for(server.url());
        let result = client.similarity("a", "b").await;
        assert!(matches!(result, Err(HuggingFaceError::InvalidResponse(_))));
    }

    #[actix_web::test]
    async fn test_similarity_connection_refused() {
        // Bind then drop to get a local port with nothing listening
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let client = client_for(format!("http://{}/", addr));
        let result = client.similarity("a", "b").await;
        assert!(matches!(result, Err(HuggingFaceError::Unreachable(_))));
    }

    #[actix_web::test]
    async fn test_similarity_timeout() {
        // Accepted by the kernel backlog but never answered
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = HuggingFaceClient::new(
            format!("http://{}/", addr),
            TOKEN.to_string(),
            Duration::from_millis(200),
        )
        .unwrap();

        match client.similarity("a", "b").await {
            Err(HuggingFaceError::Unreachable(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }
        drop(listener);
    }
}
