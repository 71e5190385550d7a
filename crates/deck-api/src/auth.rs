//! Shared-secret authorization for mutation endpoints.
//!
//! Create and delete require a recognized secret in the [`API_KEY_HEADER`]
//! header. Update deliberately does not: any team member may advance a
//! task's status without credentials.

use axum::http::HeaderMap;

use deck_config::AuthConfig;

use crate::error::ApiError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Which recognized secret the caller presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Manager,
    Team,
}

/// Check the shared-secret header against the recognized secrets.
///
/// Runs before any store access; an empty configured manager secret disables
/// the manager path entirely rather than matching empty headers.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` when the header is missing or matches
/// neither secret.
pub fn authorize(headers: &HeaderMap, auth: &AuthConfig) -> Result<Caller, ApiError> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if presented.is_empty() {
        return Err(ApiError::Unauthorized(format!(
            "missing {API_KEY_HEADER} header"
        )));
    }
    if auth.has_manager_secret() && presented == auth.manager_secret {
        return Ok(Caller::Manager);
    }
    if presented == auth.team_secret {
        return Ok(Caller::Team);
    }
    Err(ApiError::Unauthorized("unrecognized api key".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> AuthConfig {
        AuthConfig {
            manager_secret: "mgr".into(),
            team_secret: "team".into(),
        }
    }

    fn headers_with(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn manager_secret_wins() {
        assert_eq!(
            authorize(&headers_with("mgr"), &config()).unwrap(),
            Caller::Manager
        );
    }

    #[test]
    fn team_secret_recognized() {
        assert_eq!(
            authorize(&headers_with("team"), &config()).unwrap(),
            Caller::Team
        );
    }

    #[test]
    fn missing_header_rejected() {
        let result = authorize(&HeaderMap::new(), &config());
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn wrong_secret_rejected() {
        let result = authorize(&headers_with("guess"), &config());
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn empty_manager_secret_never_matches() {
        let config = AuthConfig {
            manager_secret: String::new(),
            team_secret: "team".into(),
        };
        // The empty string must not be accepted just because the manager
        // secret is unconfigured.
        let result = authorize(&headers_with(""), &config);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
