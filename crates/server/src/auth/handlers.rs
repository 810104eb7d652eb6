//! # Authentication Handlers
//!
//! HTTP request handlers for login, logout and the current identity.
//! Login is an email lookup: the convenience list endpoint exposes the
//! known users so a client can offer a picker.

use axum::Json;
use entity::{users, Users};
use error::Result;
use sea_orm::{EntityTrait, QueryOrder};
use tracing::info;
use validator::Validate;

use crate::{
    dto::auth::{AuthSuccessResponse, IdentityResponse, LoginRequest, SuccessResponse, UserListResponse, UserOption},
    identity::{resolve_identity, Identity},
    sessions::{create_session, revoke_session, SessionToken},
    AppState,
};

/// List known users for the login picker, ordered by name.
pub async fn list_users_handler_inner(state: &AppState) -> Result<Json<UserListResponse>> {
    let user_rows = Users::find()
        .order_by_asc(users::Column::Name)
        .all(&state.db)
        .await?;

    let user_options = user_rows
        .into_iter()
        .map(|u| {
            UserOption {
                user_id: u.user_id,
                name:    u.name,
                email:   u.email,
            }
        })
        .collect();

    Ok(Json(UserListResponse {
        success: true,
        users:   user_options,
    }))
}

/// Inner handler for the login endpoint
///
/// Resolves the email into an identity, derives the role from team
/// membership and opens a session.
pub async fn login_handler_inner(state: &AppState, req: LoginRequest) -> Result<Json<AuthSuccessResponse>> {
    req.validate()?;

    let identity = resolve_identity(&state.db, &req.email).await?;
    let token = create_session(&state.db, &identity).await?;

    info!(user_id = %identity.user_id, role = %identity.role, "User logged in");

    Ok(Json(AuthSuccessResponse {
        success: true,
        token:   token.to_string(),
        user:    IdentityResponse::from(&identity),
    }))
}

/// Inner handler for the logout endpoint
pub async fn logout_handler_inner(state: &AppState, token: SessionToken) -> Result<Json<SuccessResponse>> {
    revoke_session(&state.db, token.0).await?;

    Ok(Json(SuccessResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

/// Inner handler returning the caller's identity snapshot
pub async fn me_handler_inner(identity: Identity) -> Result<Json<IdentityResponse>> {
    Ok(Json(IdentityResponse::from(&identity)))
}
