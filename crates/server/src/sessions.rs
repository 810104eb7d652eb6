//! # Session Management
//!
//! DB-backed browser sessions keyed by an opaque UUID bearer token. The
//! session row snapshots the identity resolved at login; the snapshot is
//! immutable for the session's lifetime and re-derived only on the next
//! login. Sessions expire after 8 hours of inactivity and are deleted on
//! logout.

use chrono::{DateTime, Duration, Utc};
use entity::{user_sessions, UserSessions};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::identity::{Identity, Role};

/// Idle timeout: a session unused for this long is expired.
pub const SESSION_IDLE_TIMEOUT_HOURS: i64 = 8;

/// The bearer token of the current request, stored as a request extension
/// alongside the [`Identity`] so logout can revoke its own session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(pub Uuid);

/// Whether a session with the given `last_used_at` has idled out at `now`.
#[must_use]
pub fn is_expired(last_used_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - last_used_at > Duration::hours(SESSION_IDLE_TIMEOUT_HOURS)
}

/// Extract the token from a `Bearer <token>` authorization header value.
#[must_use]
pub fn extract_bearer_token(header: &str) -> Option<String> {
    let rest = header.strip_prefix("Bearer")?;
    let token = rest.trim();
    if token.is_empty() {
        None
    }
    else {
        Some(token.to_string())
    }
}

/// Create a session for a freshly resolved identity.
///
/// Returns the opaque token the client presents on subsequent requests.
pub async fn create_session(db: &DbConn, identity: &Identity) -> Result<Uuid> {
    let token = Uuid::new_v4();
    let now = Utc::now();

    let session = user_sessions::ActiveModel {
        id:           Set(token),
        user_id:      Set(identity.user_id),
        user_name:    Set(identity.name.clone()),
        user_email:   Set(identity.email.clone()),
        role:         Set(identity.role.as_str().to_string()),
        team_id:      Set(identity.team_id.clone()),
        created_at:   Set(now),
        last_used_at: Set(now),
    };

    session
        .insert(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create session: {}", e)))?;

    info!(user_id = %identity.user_id, role = %identity.role, "Session created");

    Ok(token)
}

/// Load the identity snapshot for a session token.
///
/// Expired or unknown tokens are an authentication failure; loading a live
/// session touches `last_used_at` so activity keeps it alive.
pub async fn load_session(db: &DbConn, token: Uuid) -> Result<Identity> {
    let session = UserSessions::find_by_id(token)
        .one(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid session"))?;

    let now = Utc::now();
    if is_expired(session.last_used_at, now) {
        UserSessions::delete_by_id(token).exec(db).await?;
        return Err(AppError::unauthorized("Session expired"));
    }

    let role = Role::parse(&session.role)
        .ok_or_else(|| AppError::internal(format!("Session {} holds unknown role '{}'", token, session.role)))?;

    let identity = Identity {
        user_id: session.user_id,
        name:    session.user_name.clone(),
        email:   session.user_email.clone(),
        role,
        team_id: session.team_id.clone(),
    };

    let mut active: user_sessions::ActiveModel = session.into();
    active.last_used_at = Set(now);
    active.update(db).await?;

    Ok(identity)
}

/// Delete a session on logout. Revoking an already-gone token succeeds.
pub async fn revoke_session(db: &DbConn, token: Uuid) -> Result<()> {
    let result = UserSessions::delete_by_id(token).exec(db).await?;

    info!(deleted = result.rows_affected, "Session revoked");

    Ok(())
}
