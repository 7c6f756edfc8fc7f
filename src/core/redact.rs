use actix_web::http::header::HeaderMap;

/// Header names whose values never reach the logs in plaintext
const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "proxy-authorization", "cookie", "x-api-key"];

/// Number of leading characters of a secret kept visible in logs
const VISIBLE_PREFIX: usize = 4;

/// Mask a secret for logging, keeping at most a short prefix
///
/// Secrets shorter than twice the visible prefix are fully masked.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() < VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    let prefix: String = secret.chars().take(VISIBLE_PREFIX).collect();
    format!("{}****", prefix)
}

/// Mask an `Authorization` header value, keeping the scheme readable
pub fn mask_authorization(value: &str) -> String {
    match value.split_once(' ') {
        Some((scheme, credential)) => format!("{} {}", scheme, mask_secret(credential.trim())),
        None => mask_secret(value),
    }
}

/// Render request headers for logging with sensitive values masked
pub fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut rendered: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| {
            let name = name.as_str().to_string();
            let value = value.to_str().unwrap_or("<non-utf8>");
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                mask_authorization(value)
            } else {
                value.to_string()
            };
            (name, value)
        })
        .collect();
    rendered.sort();
    rendered
}
