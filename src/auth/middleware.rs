use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::warn;

use super::SESSION_COOKIE;
use crate::database::schema::types::UserRole;
use crate::error::ApiError;
use crate::models::Principal;
use crate::AppState;

/// Session token from `Authorization: Bearer ...`, else from the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, token)| token)
            .filter(|token| !token.is_empty())
    })
}

/// An authenticated principal whose role is exactly `admin`.
///
/// Missing, invalid or non-admin sessions are all rejected with 403 before
/// the handler runs.
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub Principal);

impl FromRequestParts<AppState> for AdminPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or_else(|| ApiError::Forbidden("Admin access required.".to_string()))?;

        let claims = state.jwt_service.decode_token(token)?;

        if !claims.has_role(UserRole::Admin) {
            warn!(
                user_id = claims.sub,
                role = %claims.role,
                "Non-admin principal attempted admin access"
            );
            return Err(ApiError::Forbidden("Admin access required.".to_string()));
        }

        Ok(AdminPrincipal(claims.principal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(COOKIE, HeaderValue::from_static("session=xyz"));
        assert_eq!(session_token(&headers), Some("abc"));
    }

    #[test]
    fn test_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session=tok.en.value; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("tok.en.value"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        headers.insert(COOKIE, HeaderValue::from_static("sessionid=nope"));
        assert_eq!(session_token(&headers), None);
    }
}
