use crate::core::scoring::{degraded_response, scored_response, PARSE_FAILURE_SUGGESTION, UPSTREAM_ERROR_SUGGESTION};
use crate::errors::RelayError;
use crate::models::{AllowedOrigins, MatchRequest};
use crate::routes::{client_addr, log_inbound};
use crate::services::{HuggingFaceClient, HuggingFaceError};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

/// Application state shared across all handlers
///
/// Built once at startup; nothing in here is mutated while serving.
#[derive(Clone)]
pub struct AppState {
    pub hugging_face: Arc<HuggingFaceClient>,
    pub allowed_origins: Arc<AllowedOrigins>,
}

impl AppState {
    pub fn new(hugging_face: HuggingFaceClient, allowed_origins: AllowedOrigins) -> Self {
        Self {
            hugging_face: Arc::new(hugging_face),
            allowed_origins: Arc::new(allowed_origins),
        }
    }
}

/// Configure the match route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/match", web::post().to(match_resume));
}

/// Match endpoint
///
/// POST /match
///
/// Request body:
/// ```json
/// {
///   "resume": "string",
///   "jd": "string"
/// }
/// ```
async fn match_resume(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, RelayError> {
    let span = tracing::info_span!("match", request_id = %uuid::Uuid::new_v4());
    relay(state.get_ref(), req.into_inner(), &http_req)
        .instrument(span)
        .await
}

async fn relay(
    state: &AppState,
    req: MatchRequest,
    http_req: &HttpRequest,
) -> Result<HttpResponse, RelayError> {
    log_inbound(http_req, Some(&req));

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {}", errors);
        return Err(RelayError::Validation(errors.to_string()));
    }

    let origin = http_req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());

    match origin {
        Some(origin) if state.allowed_origins.contains(origin) => {}
        _ => {
            tracing::warn!(
                origin = origin.unwrap_or("<none>"),
                client = %client_addr(http_req),
                "Rejected match request from forbidden origin"
            );
            return Err(RelayError::OriginForbidden);
        }
    }

    let response = match state.hugging_face.similarity(&req.resume, &req.jd).await {
        Ok(similarity) => scored_response(similarity),
        Err(HuggingFaceError::ApiError { status, body }) => {
            tracing::error!("Hugging Face API error: {}, {}", status, body);
            degraded_response(UPSTREAM_ERROR_SUGGESTION)
        }
        Err(HuggingFaceError::InvalidResponse(reason)) => {
            tracing::error!("Error decoding similarity response: {}", reason);
            degraded_response(PARSE_FAILURE_SUGGESTION)
        }
        Err(e) => {
            tracing::error!(url = %state.hugging_face.api_url(), "Failed to contact Hugging Face API: {}", e);
            return Err(RelayError::UpstreamUnreachable);
        }
    };

    tracing::info!("Returning response: {:?}", response);

    Ok(HttpResponse::Ok().json(response))
}
