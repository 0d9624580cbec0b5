//! Authentication wire shapes.

use serde::Deserialize;

/// Successful response from `/auth/login`, `/auth/register` and
/// `/auth/google/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Backend-supplied user object, passed through untouched.
    #[serde(default)]
    pub user: serde_json::Value,
}

/// Successful response from `/auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_without_refresh_token() {
        let session: AuthSession = serde_json::from_value(serde_json::json!({
            "access_token": "abc",
            "user": {"id": 7}
        }))
        .unwrap();
        assert_eq!(session.access_token, "abc");
        assert!(session.refresh_token.is_none());
        assert_eq!(session.user["id"], 7);
    }

    #[test]
    fn test_refresh_response() {
        let parsed: RefreshResponse = serde_json::from_value(serde_json::json!({
            "access_token": "new",
            "refresh_token": "next"
        }))
        .unwrap();
        assert_eq!(parsed.access_token, "new");
        assert_eq!(parsed.refresh_token.as_deref(), Some("next"));
    }
}
