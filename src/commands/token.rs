//! Access-token command implementations

use dialoguer::{Input, Password};

use crate::cloud::{self, AccessToken, CloudError, TokenApi};
use crate::config::Config;

/// Run the token list command
pub fn run_list(api: &dyn TokenApi, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (username, password) = prompt_credentials()?;

    eprintln!("Checking with the cloud...");
    let tokens = cloud::list_sorted(api, &username, &password)?;

    if tokens.is_empty() {
        println!("No access tokens on this account");
        return Ok(());
    }

    let now = humantime::format_rfc3339_millis(std::time::SystemTime::now()).to_string();
    println!(
        "{}",
        render_tokens(&tokens, config.access_token.as_deref(), &now)
    );
    Ok(())
}

/// Fail-fast stub; revocation is not wired up yet
pub fn run_revoke(_token: &str) -> Result<(), Box<dyn std::error::Error>> {
    Err(CloudError::NotImplemented("token revoke").into())
}

/// Fail-fast stub; token creation is not wired up yet
pub fn run_new() -> Result<(), Box<dyn std::error::Error>> {
    Err(CloudError::NotImplemented("token new").into())
}

fn prompt_credentials() -> Result<(String, String), Box<dyn std::error::Error>> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    Ok((username, password))
}

/// Render sorted tokens the way the cloud console shows them.
///
/// The token the CLI itself authenticates with is marked `*`; tokens
/// whose expiration precedes `now` (both RFC 3339 strings, compared
/// lexicographically) are marked ` (expired)`.
fn render_tokens(tokens: &[AccessToken], current: Option<&str>, now: &str) -> String {
    let mut lines = Vec::new();
    for token in tokens {
        let mut heading = token.client.clone();
        if Some(token.token.as_str()) == current {
            heading.push('*');
        }
        if let Some(expires_at) = &token.expires_at {
            if now > expires_at.as_str() {
                heading.push_str(" (expired)");
            }
        }

        lines.push(heading);
        lines.push(format!(" Token:      {}", token.token));
        lines.push(format!(
            " Expires At: {}",
            token.expires_at.as_deref().unwrap_or("never")
        ));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2026-08-05T00:00:00.000Z";

    fn token(client: &str, token_str: &str, expires_at: Option<&str>) -> AccessToken {
        AccessToken {
            client: client.to_string(),
            token: token_str.to_string(),
            expires_at: expires_at.map(str::to_string),
        }
    }

    #[test]
    fn test_current_token_is_starred() {
        let tokens = [token("corelink-cli", "123abc", Some("2030-01-01T00:00:00.000Z"))];
        let rendered = render_tokens(&tokens, Some("123abc"), NOW);

        assert!(rendered.starts_with("corelink-cli*\n"));
        assert!(rendered.contains(" Token:      123abc"));
    }

    #[test]
    fn test_expired_token_is_marked() {
        let tokens = [token("old-app", "456def", Some("2014-04-27T02:20:36.000Z"))];
        let rendered = render_tokens(&tokens, None, NOW);

        assert!(rendered.starts_with("old-app (expired)\n"));
        assert!(rendered.contains(" Expires At: 2014-04-27T02:20:36.000Z"));
    }

    #[test]
    fn test_unexpired_unrelated_token_is_plain() {
        let tokens = [token("dashboard", "789ghi", Some("2030-01-01T00:00:00.000Z"))];
        let rendered = render_tokens(&tokens, Some("123abc"), NOW);

        assert!(rendered.starts_with("dashboard\n"));
    }

    #[test]
    fn test_non_expiring_token_renders_never() {
        let tokens = [token("ci", "abcdef", None)];
        let rendered = render_tokens(&tokens, None, NOW);

        assert!(rendered.contains(" Expires At: never"));
        assert!(!rendered.contains("(expired)"));
    }
}
