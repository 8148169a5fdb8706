use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use base64::Engine;

use crate::auth::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires an authenticated caller.
/// Returns 401 when the identity cookie is missing or unreadable.
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        extract_cookie(parts, &state.config.auth.cookie_name)
            .and_then(decode_identity)
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional identity extractor — returns None instead of 401 when the
/// caller is anonymous.
pub struct MaybeUser(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity =
            extract_cookie(parts, &state.config.auth.cookie_name).and_then(decode_identity);
        Ok(MaybeUser(identity))
    }
}

/// The auth gateway stores the resolved identity as base64-encoded JSON.
/// Token integrity is its concern, not ours.
fn decode_identity(token: &str) -> Option<Identity> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(token).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn extract_cookie<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name {
                Some(val)
            } else {
                None
            }
        })
}
