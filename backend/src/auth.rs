//! Shared-token access gate.
//!
//! When the configuration carries an `authToken`, a request must present
//! the exact token in the Authorization header or the `auth` query
//! parameter. Plain string equality; no Bearer prefix handling, no token
//! rotation, no hashing.

use axum::http::{header, HeaderMap};
use serde::Deserialize;

use crate::error::ApiError;

/// Query-string half of the access gate (`?auth=<token>`).
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub auth: Option<String>,
}

/// Check a request against the configured token, if any. Open access when
/// no token is configured.
pub fn check_access(
    expected: Option<&str>,
    headers: &HeaderMap,
    query: &AuthQuery,
) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let header_token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if header_token == Some(expected) || query.auth.as_deref() == Some(expected) {
        return Ok(());
    }

    Err(ApiError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_open_when_no_token_configured() {
        let result = check_access(None, &HeaderMap::new(), &AuthQuery::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_matching_header_passes() {
        let headers = headers_with_auth("sekrit");
        assert!(check_access(Some("sekrit"), &headers, &AuthQuery::default()).is_ok());
    }

    #[test]
    fn test_matching_query_param_passes() {
        let query = AuthQuery {
            auth: Some("sekrit".to_string()),
        };
        assert!(check_access(Some("sekrit"), &HeaderMap::new(), &query).is_ok());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let result = check_access(Some("sekrit"), &HeaderMap::new(), &AuthQuery::default());
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn test_mismatched_credentials_rejected() {
        let headers = headers_with_auth("wrong");
        let query = AuthQuery {
            auth: Some("also-wrong".to_string()),
        };
        let result = check_access(Some("sekrit"), &headers, &query);
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn test_bearer_prefixed_header_is_not_a_match() {
        // Comparison is exact; a Bearer-prefixed value is a different string.
        let headers = headers_with_auth("Bearer sekrit");
        let result = check_access(Some("sekrit"), &headers, &AuthQuery::default());
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
