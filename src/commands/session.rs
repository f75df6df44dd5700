use crate::auth::{self, AuthConfig, AuthError};
use crate::db::Database;
use serde::Serialize;
use tauri::State;

/// Settings keys for the hosted auth service and the persisted session.
const AUTH_URL_KEY: &str = "auth_url";
const AUTH_ANON_KEY: &str = "auth_anon_key";
const ACCESS_TOKEN_KEY: &str = "auth_access_token";

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub email: Option<String>,
}

fn resolve_auth(db: &Database) -> Result<AuthConfig, String> {
    let base_url = db
        .get_setting(AUTH_URL_KEY)
        .ok()
        .flatten()
        .ok_or("Auth service not configured")?;
    let anon_key = db
        .get_setting(AUTH_ANON_KEY)
        .ok()
        .flatten()
        .ok_or("Auth service not configured")?;
    Ok(AuthConfig { base_url, anon_key })
}

fn remember_token(db: &Database, session: &auth::Session) {
    if let Some(token) = &session.access_token {
        if let Err(e) = db.set_setting(ACCESS_TOKEN_KEY, token) {
            tracing::warn!(error = %e, "failed to persist session token");
        }
    }
}

/// Gate check run before the dashboard renders. `None` means the frontend
/// must fall back to the auth view.
#[tauri::command]
pub async fn get_session(db: State<'_, Database>) -> Result<Option<SessionInfo>, String> {
    let token = match db.get_setting(ACCESS_TOKEN_KEY).ok().flatten() {
        Some(token) => token,
        None => return Ok(None),
    };
    let config = match resolve_auth(&db) {
        Ok(config) => config,
        Err(_) => return Ok(None),
    };

    match auth::current_user(&config, &token).await {
        Ok(user) => Ok(Some(SessionInfo { email: user.email })),
        Err(AuthError::Api { status: 401, .. }) => {
            // Stored token was rejected; forget it.
            db.delete_setting(ACCESS_TOKEN_KEY).ok();
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(error = %e, "session check failed");
            Ok(None)
        }
    }
}

#[tauri::command]
pub async fn login(
    db: State<'_, Database>,
    email: String,
    password: String,
) -> Result<SessionInfo, String> {
    let config = resolve_auth(&db)?;
    let session = auth::sign_in(&config, &email, &password)
        .await
        .map_err(|e| e.to_string())?;
    remember_token(&db, &session);
    Ok(SessionInfo {
        email: session.user.and_then(|u| u.email),
    })
}

#[tauri::command]
pub async fn signup(
    db: State<'_, Database>,
    email: String,
    password: String,
) -> Result<SessionInfo, String> {
    let config = resolve_auth(&db)?;
    let session = auth::sign_up(&config, &email, &password)
        .await
        .map_err(|e| e.to_string())?;
    remember_token(&db, &session);
    Ok(SessionInfo {
        email: session.user.and_then(|u| u.email),
    })
}

/// Best effort against the auth service; the local token always goes.
#[tauri::command]
pub async fn logout(db: State<'_, Database>) -> Result<(), String> {
    let token = db.get_setting(ACCESS_TOKEN_KEY).ok().flatten();
    if let (Some(token), Ok(config)) = (token, resolve_auth(&db)) {
        if let Err(e) = auth::sign_out(&config, &token).await {
            tracing::warn!(error = %e, "sign-out request failed");
        }
    }
    db.delete_setting(ACCESS_TOKEN_KEY).ok();
    Ok(())
}
