// Route exports
pub mod health;
pub mod matches;

use crate::core::redact_headers;
use crate::errors::RelayError;
use crate::models::{AllowedOrigins, MatchRequest};
use actix_cors::Cors;
use actix_web::{error, web, HttpRequest};

pub use matches::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).configure(matches::configure);
}

/// CORS policy for the allow-listed origins
///
/// Listed origins may use any method and header, with credentials. Other
/// origins are not rejected here: they reach the handler, which answers with
/// 403, and get no CORS headers.
pub fn cors(allowed_origins: &AllowedOrigins) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .block_on_origin_mismatch(false)
}

/// JSON extractor settings: every body error becomes a 422
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// Turn JSON extractor failures into validation errors
///
/// The handler never runs for these requests, so the inbound summary is
/// logged here.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_inbound(req, None);
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    RelayError::Validation(format!("Invalid request body: {}", err)).into()
}

/// Log method, URL, client and masked headers of an inbound request
///
/// Body field lengths are included once the body has been decoded.
pub(crate) fn log_inbound(http_req: &HttpRequest, body: Option<&MatchRequest>) {
    let url = {
        let connection = http_req.connection_info();
        format!("{}://{}{}", connection.scheme(), connection.host(), http_req.uri())
    };

    tracing::info!(
        method = %http_req.method(),
        url = %url,
        client = %client_addr(http_req),
        headers = ?redact_headers(http_req.headers()),
        resume_len = body.map(|b| b.resume.len()),
        jd_len = body.map(|b| b.jd.len()),
        "Received match request"
    );
}

pub(crate) fn client_addr(http_req: &HttpRequest) -> String {
    http_req
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
