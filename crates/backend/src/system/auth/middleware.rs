use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::system::state::AppState;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that resolves the caller through the configured AuthProvider
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    // Owned copy: the request body is not Sync, so no borrow of `req` may cross an await
    let token = bearer_token(req.headers()).map(str::to_owned);

    let user = match state.auth.authenticate(token.as_deref()).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Rejected {} {}: {}", req.method(), req.uri().path(), e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    // Handlers read the caller via the CurrentUser extractor
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer eyJ.abc"));
        assert_eq!(bearer_token(&headers), Some("eyJ.abc"));
    }
}
