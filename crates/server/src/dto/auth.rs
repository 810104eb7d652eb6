//! # Authentication Data Transfer Objects
//!
//! Request and response types for the login, logout and identity endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::identity::{Identity, Role};

/// Request body for login. There is no password: identity is established
/// by email lookup and role derivation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// One entry of the login convenience list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOption {
    pub user_id: i32,
    pub name:    String,
    pub email:   String,
}

/// The login convenience list, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub users:   Vec<UserOption>,
}

/// The resolved identity as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityResponse {
    pub user_id: i32,
    pub name:    String,
    pub email:   String,
    pub role:    Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id,
            name:    identity.name.clone(),
            email:   identity.email.clone(),
            role:    identity.role,
            team_id: identity.team_id.clone(),
        }
    }
}

/// Response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSuccessResponse {
    /// Indicates operation success
    pub success: bool,

    /// Opaque session token to present as `Authorization: Bearer <token>`
    pub token: String,

    /// The authenticated identity
    pub user: IdentityResponse,
}

/// Generic success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    /// Indicates operation success
    pub success: bool,

    /// Human-readable message
    pub message: String,
}
