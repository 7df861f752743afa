//! Cloud API client for access-token management

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// An access token as returned by the cloud API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// Client application the token was issued to
    pub client: String,
    /// The token string itself
    pub token: String,
    /// RFC 3339 expiration timestamp; absent for non-expiring tokens
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Errors from the cloud API
#[derive(Debug, Error)]
pub enum CloudError {
    /// The request could not be sent or the response not read
    #[error("cloud request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status
    #[error("cloud returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },
    /// The command surface exists but the operation does not yet
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

/// The token-listing surface of the cloud API.
///
/// Commands depend on this trait rather than on [`ApiClient`] directly,
/// so tests can substitute a canned implementation for the remote
/// service.
pub trait TokenApi {
    /// List all access tokens for the account
    fn list_tokens(&self, username: &str, password: &str)
        -> Result<Vec<AccessToken>, CloudError>;
}

/// HTTP client for the cloud API
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Create a client against the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
        }
    }
}

impl TokenApi for ApiClient {
    fn list_tokens(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Vec<AccessToken>, CloudError> {
        use base64::Engine;

        let url = format!("{}/v1/access_tokens", self.base_url.trim_end_matches('/'));
        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));

        log::debug!("GET {url}");
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Basic {credentials}"))
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => CloudError::Api {
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                other => CloudError::Transport(other.to_string()),
            })?;

        response
            .into_json()
            .map_err(|e| CloudError::Transport(e.to_string()))
    }
}

/// Order tokens by expiration, newest first; tokens without an
/// expiration sort last.
pub fn sort_tokens(tokens: &mut [AccessToken]) {
    tokens.sort_by(|a, b| b.expires_at.cmp(&a.expires_at));
}

/// Fetch the account's tokens and return them newest-first
pub fn list_sorted(
    api: &dyn TokenApi,
    username: &str,
    password: &str,
) -> Result<Vec<AccessToken>, CloudError> {
    let mut tokens = api.list_tokens(username, password)?;
    sort_tokens(&mut tokens);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(client: &str, expires_at: Option<&str>) -> AccessToken {
        AccessToken {
            client: client.to_string(),
            token: format!("token-{client}"),
            expires_at: expires_at.map(str::to_string),
        }
    }

    #[test]
    fn test_tokens_sort_newest_first() {
        let mut tokens = vec![
            token("old", Some("2014-04-27T02:20:36.000Z")),
            token("new", Some("2026-01-01T00:00:00.000Z")),
            token("mid", Some("2020-06-15T12:00:00.000Z")),
        ];

        sort_tokens(&mut tokens);

        let order: Vec<&str> = tokens.iter().map(|t| t.client.as_str()).collect();
        assert_eq!(order, ["new", "mid", "old"]);
    }

    #[test]
    fn test_missing_expiration_sorts_last() {
        let mut tokens = vec![
            token("forever", None),
            token("dated", Some("2014-04-27T02:20:36.000Z")),
        ];

        sort_tokens(&mut tokens);

        assert_eq!(tokens[0].client, "dated");
        assert_eq!(tokens[1].client, "forever");
    }

    #[test]
    fn test_list_sorted_uses_the_api_seam() {
        struct Canned;
        impl TokenApi for Canned {
            fn list_tokens(
                &self,
                _username: &str,
                _password: &str,
            ) -> Result<Vec<AccessToken>, CloudError> {
                Ok(vec![
                    token("old", Some("2014-01-01T00:00:00.000Z")),
                    token("new", Some("2025-01-01T00:00:00.000Z")),
                ])
            }
        }

        let tokens = list_sorted(&Canned, "user", "pass").unwrap();
        assert_eq!(tokens[0].client, "new");
    }

    #[test]
    fn test_token_wire_shape() {
        let json = r#"[
            {"client": "user", "token": "123abc", "expires_at": "2014-04-27T02:20:36.000Z"},
            {"client": "cli", "token": "456def"}
        ]"#;

        let tokens: Vec<AccessToken> = serde_json::from_str(json).unwrap();
        assert_eq!(tokens[0].expires_at.as_deref(), Some("2014-04-27T02:20:36.000Z"));
        assert_eq!(tokens[1].expires_at, None);
    }
}
