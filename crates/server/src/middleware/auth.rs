//! # Session Authentication Middleware
//!
//! Resolves the bearer session token into an [`Identity`] and passes it to
//! handlers as a request extension. Requests without a live session are
//! rejected before any handler runs.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    sessions::{self, SessionToken},
    AppState,
};

/// Session authentication middleware
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Loads the session, enforcing the idle timeout
/// 3. Adds the identity snapshot and the token to request extensions
/// 4. Rejects requests with invalid/missing/expired tokens
pub async fn session_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        Some(header) => {
            match header.to_str() {
                Ok(h) => h,
                Err(_) => {
                    return auth_error_response("Invalid authorization header encoding");
                },
            }
        },
        None => {
            return auth_error_response("Missing authorization header");
        },
    };

    let token = match sessions::extract_bearer_token(auth_header) {
        Some(token) => token,
        None => {
            return auth_error_response("Invalid authorization header format");
        },
    };

    let token = match Uuid::parse_str(&token) {
        Ok(token) => token,
        Err(_) => {
            return auth_error_response("Invalid session token");
        },
    };

    // Fail closed: any failure to establish the session denies the request
    let identity = match sessions::load_session(&state.db, token).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::debug!(error = %e, "Session rejected");
            return auth_error_response(&e.message());
        },
    };

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(SessionToken(token));

    next.run(request).await
}

/// Create standardized authentication error response
fn auth_error_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        axum::Json(json!({
            "success": false,
            "code": "UNAUTHORIZED",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use crate::sessions::extract_bearer_token;

    #[test]
    fn test_extract_bearer_token_edge_cases() {
        assert!(extract_bearer_token("Bearer test").is_some());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("").is_none());
        assert!(extract_bearer_token("Basic abc123").is_none());
    }
}
