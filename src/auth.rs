use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::{
    config::AppConfig,
    error::{ApiError, ApiResult},
    models::AdminSession,
    repository::RepositoryState,
};

/// Hex-encoded SHA-256 digest of a password. The stored admin credential is
/// this hash, never the plaintext.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Mints an opaque session token: 32 random bytes, URL-safe base64 without
/// padding, so it survives query strings unescaped.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The hash the supplied password must match: the stored one if an admin ever
/// changed the password, otherwise the hash of the configured default.
async fn effective_password_hash(repo: &RepositoryState, config: &AppConfig) -> ApiResult<String> {
    match repo.admin_password_hash().await? {
        Some(hash) => Ok(hash),
        None => Ok(hash_password(&config.admin_password)),
    }
}

/// Checks the password and, on success, persists and returns a fresh session
/// token. A wrong password is `Unauthorized`.
pub async fn login(
    repo: &RepositoryState,
    config: &AppConfig,
    password: &str,
) -> ApiResult<String> {
    let expected = effective_password_hash(repo, config).await?;
    if hash_password(password) != expected {
        return Err(ApiError::Unauthorized("Falsches Passwort"));
    }

    let session = AdminSession {
        token: generate_token(),
        created_at: Utc::now(),
        active: true,
    };
    repo.insert_session(session.clone()).await?;
    tracing::info!("admin session created");
    Ok(session.token)
}

/// Validates a session token, failing closed on anything unknown or inactive.
///
/// Expiry is lazy: when a session older than the timeout is presented, this
/// deactivates it on the spot and reports invalid. The session row is never
/// swept by a background job.
pub async fn verify_session(
    repo: &RepositoryState,
    timeout_minutes: i64,
    token: &str,
) -> ApiResult<bool> {
    let Some(session) = repo.find_session(token).await? else {
        return Ok(false);
    };
    if !session.active {
        return Ok(false);
    }
    if Utc::now() - session.created_at > Duration::minutes(timeout_minutes) {
        repo.deactivate_session(token).await?;
        tracing::debug!("admin session expired lazily");
        return Ok(false);
    }
    Ok(true)
}

/// Deactivates the session. Idempotent; unknown tokens are a silent no-op.
pub async fn logout(repo: &RepositoryState, token: &str) -> ApiResult<()> {
    repo.deactivate_session(token).await?;
    Ok(())
}

/// Replaces the stored password hash. Requires a live session AND the correct
/// current password; either failure is `Unauthorized`.
pub async fn change_password(
    repo: &RepositoryState,
    config: &AppConfig,
    token: &str,
    old_password: &str,
    new_password: &str,
) -> ApiResult<()> {
    if !verify_session(repo, config.session_timeout_minutes, token).await? {
        return Err(ApiError::Unauthorized("Nicht angemeldet"));
    }
    let expected = effective_password_hash(repo, config).await?;
    if hash_password(old_password) != expected {
        return Err(ApiError::Unauthorized("Altes Passwort ist falsch"));
    }
    repo.set_admin_password_hash(&hash_password(new_password))
        .await?;
    tracing::info!("admin password changed");
    Ok(())
}

/// AdminToken Extractor
///
/// The resolved, verified session token of an authenticated admin request.
/// Using it as a handler argument (or inside the admin route-layer guard)
/// performs the whole check: token resolution, session lookup, lazy expiry.
#[derive(Debug, Clone)]
pub struct AdminToken(pub String);

/// Pulls the raw token out of the request: `?token=` query parameter first
/// (the frontend's convention), `Authorization: Bearer` as the fallback.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(query) = parts.uri.query() {
        if let Some(value) = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("token="))
        {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

impl<S> FromRequestParts<S> for AdminToken
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let token =
            extract_token(parts).ok_or(ApiError::Unauthorized("Kein Token übermittelt"))?;

        if verify_session(&repo, config.session_timeout_minutes, &token).await? {
            Ok(AdminToken(token))
        } else {
            Err(ApiError::Unauthorized("Session ungültig oder abgelaufen"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex_sha256() {
        // sha256("gltz2025")
        assert_eq!(
            hash_password("gltz2025"),
            "e8132661317061ab4a170ce4e24fe2e5a275650577a257c150e56735fdba0430"
        );
        assert_eq!(hash_password("a").len(), 64);
    }

    #[test]
    fn tokens_are_url_safe_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        // 32 bytes => 43 base64 chars without padding
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
