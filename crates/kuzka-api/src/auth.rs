//! HTTP basic auth for admin routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

use crate::config::AdminCredentials;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts `(user, password)` from an `Authorization: Basic ...` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Builds the header value for the given credentials.
pub fn basic_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

fn authorized(credentials: &AdminCredentials, headers: &HeaderMap) -> bool {
    basic_credentials(headers)
        .map(|(user, password)| credentials.matches(&user, &password))
        .unwrap_or(false)
}

/// Middleware rejecting requests without the admin credential.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !authorized(&state.config.credentials, request.headers()) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request without valid admin credentials"
        );
        return ApiError::Unauthorized.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_header_roundtrip() {
        let parsed = basic_credentials(&headers(&basic_header("admin", "p:ss"))).unwrap();
        assert_eq!(parsed, ("admin".to_string(), "p:ss".to_string()));
    }

    #[test]
    fn test_known_encoding() {
        // "admin:secret"
        assert_eq!(basic_header("admin", "secret"), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(basic_credentials(&headers("Bearer YWRtaW46c2VjcmV0")).is_none());
        assert!(basic_credentials(&headers("Basic not-base64!")).is_none());
        assert!(basic_credentials(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_authorized() {
        let creds = AdminCredentials::new("admin", "secret");
        assert!(authorized(&creds, &headers("basic YWRtaW46c2VjcmV0")));
        assert!(!authorized(&creds, &headers(&basic_header("admin", "nope"))));
        assert!(!authorized(&creds, &HeaderMap::new()));
    }
}
