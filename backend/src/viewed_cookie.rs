use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
};

use crate::tokens::ClientToken;

const VIEWED_COOKIE_NAME: &str = "viewed";

/// Pulls the opaque view-token id out of the `viewed` cookie, if any.
#[derive(Debug, Clone)]
pub struct ExtractViewedToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractViewedToken
where
    S: Send + Sync,
{
    type Rejection = ();

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .headers
                .get(header::COOKIE)
                .and_then(|cookies| cookies.to_str().ok())
                .and_then(find_viewed_cookie),
        ))
    }
}

fn find_viewed_cookie(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == VIEWED_COOKIE_NAME).then(|| value.to_string())
    })
}

pub fn viewed_cookie_header(token: &ClientToken, now: i64) -> Option<HeaderValue> {
    let max_age = token.expires_unix.saturating_sub(now).max(0);

    HeaderValue::from_str(&format!(
        "{VIEWED_COOKIE_NAME}={}; Max-Age={max_age}; Path=/; SameSite=Lax",
        token.id
    ))
    .ok()
}
