use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Connection details for the hosted auth service (a Supabase-style REST
/// API). Resolved from settings per call, like every other endpoint.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: String,
    pub anon_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

pub async fn sign_in(
    config: &AuthConfig,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let client = Client::new();
    let resp = client
        .post(format!(
            "{}/auth/v1/token?grant_type=password",
            config.base_url
        ))
        .header("apikey", &config.anon_key)
        .json(&Credentials { email, password })
        .send()
        .await?;
    read_session(resp).await
}

pub async fn sign_up(
    config: &AuthConfig,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let client = Client::new();
    let resp = client
        .post(format!("{}/auth/v1/signup", config.base_url))
        .header("apikey", &config.anon_key)
        .json(&Credentials { email, password })
        .send()
        .await?;
    read_session(resp).await
}

pub async fn current_user(config: &AuthConfig, access_token: &str) -> Result<User, AuthError> {
    let client = Client::new();
    let resp = client
        .get(format!("{}/auth/v1/user", config.base_url))
        .header("apikey", &config.anon_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(api_error(resp).await);
    }
    Ok(resp.json().await?)
}

pub async fn sign_out(config: &AuthConfig, access_token: &str) -> Result<(), AuthError> {
    let client = Client::new();
    let resp = client
        .post(format!("{}/auth/v1/logout", config.base_url))
        .header("apikey", &config.anon_key)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(api_error(resp).await);
    }
    Ok(())
}

async fn read_session(resp: reqwest::Response) -> Result<Session, AuthError> {
    if !resp.status().is_success() {
        return Err(api_error(resp).await);
    }
    Ok(resp.json().await?)
}

async fn api_error(resp: reqwest::Response) -> AuthError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    AuthError::Api {
        status,
        message: api_message(status, &body),
    }
}

/// Pull a readable message out of an auth error body. The service has used
/// several field names for this across versions.
fn api_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| format!("Authentication failed (status {})", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_prefers_error_description() {
        let body = r#"{"error_description": "Invalid login credentials", "msg": "other"}"#;
        assert_eq!(api_message(400, body), "Invalid login credentials");
    }

    #[test]
    fn test_api_message_falls_back_to_msg() {
        let body = r#"{"msg": "Email not confirmed"}"#;
        assert_eq!(api_message(400, body), "Email not confirmed");
    }

    #[test]
    fn test_api_message_handles_non_json_body() {
        assert_eq!(
            api_message(502, "<html>bad gateway</html>"),
            "Authentication failed (status 502)"
        );
    }
}
