//! # Identity Resolution
//!
//! Maps an email address to a user record and derives the caller's role
//! from team membership. There are no passwords and no stored role field:
//! no membership makes a Requester, membership on the help-desk team makes
//! a HelpDesk triager, and any other membership makes a Support agent
//! bound to that team.

use entity::{team_members, teams, users, TeamMembers, Users};
use error::{AppError, Result};
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

/// Derived role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// End user who files tickets
    Requester,
    /// Agent of a non-help-desk team who works assigned tickets
    Support,
    /// Triage role that routes tickets to teams
    HelpDesk,
}

impl Role {
    /// Stable token stored in session rows.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Requester => "Requester",
            Role::Support => "Support",
            Role::HelpDesk => "HelpDesk",
        }
    }

    /// Case-insensitive parse of a role token.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "requester" => Some(Role::Requester),
            "support" => Some(Role::Support),
            "helpdesk" => Some(Role::HelpDesk),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.as_str()) }
}

/// Resolved identity for the duration of a session.
///
/// Handlers receive this as an explicit request extension — identity is
/// never read from ambient global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID
    pub user_id: i32,
    /// Display name
    pub name:    String,
    /// Login email
    pub email:   String,
    /// Derived role
    pub role:    Role,
    /// Bound team for Support agents; `None` otherwise
    pub team_id: Option<String>,
}

impl Identity {
    /// Whether this identity is a Support agent of the given team.
    #[must_use]
    pub fn is_agent_of(&self, team_id: &str) -> bool {
        self.role == Role::Support && self.team_id.as_deref() == Some(team_id)
    }
}

/// Derive a role from an optional team membership.
///
/// Support agents keep their team binding; Requester and HelpDesk carry no
/// team in the identity record.
#[must_use]
pub fn derive_role(membership_team_id: Option<&str>) -> (Role, Option<String>) {
    match membership_team_id {
        None => (Role::Requester, None),
        Some(team_id) if teams::team_id_is_help_desk(team_id) => (Role::HelpDesk, None),
        Some(team_id) => (Role::Support, Some(team_id.to_string())),
    }
}

/// Resolve an email address into an [`Identity`].
///
/// The email is trimmed and matched exactly; an unknown email is an
/// authentication failure, not a not-found.
pub async fn resolve_identity(db: &DbConn, email: &str) -> Result<Identity> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    let user = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email"))?;

    let membership = TeamMembers::find()
        .filter(team_members::Column::UserId.eq(user.user_id))
        .one(db)
        .await?;

    let (role, team_id) = derive_role(membership.as_ref().map(|m| m.team_id.as_str()));

    Ok(Identity {
        user_id: user.user_id,
        name: user.name,
        email: user.email,
        role,
        team_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_membership_is_requester() {
        let (role, team) = derive_role(None);
        assert_eq!(role, Role::Requester);
        assert!(team.is_none());
    }

    #[test]
    fn test_help_desk_membership_any_case() {
        let (role, team) = derive_role(Some("IT_HELP_DESK"));
        assert_eq!(role, Role::HelpDesk);
        assert!(team.is_none());

        let (role, _) = derive_role(Some("it_help_desk"));
        assert_eq!(role, Role::HelpDesk);
    }

    #[test]
    fn test_other_membership_is_support_with_team() {
        let (role, team) = derive_role(Some("NETWORK"));
        assert_eq!(role, Role::Support);
        assert_eq!(team.as_deref(), Some("NETWORK"));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Requester, Role::Support, Role::HelpDesk] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("helpdesk"), Some(Role::HelpDesk));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_is_agent_of() {
        let agent = Identity {
            user_id: 3,
            name:    "Nina Okafor".to_string(),
            email:   "nina@example.com".to_string(),
            role:    Role::Support,
            team_id: Some("NETWORK".to_string()),
        };
        assert!(agent.is_agent_of("NETWORK"));
        assert!(!agent.is_agent_of("SOFTWARE"));

        let triager = Identity {
            user_id: 4,
            name:    "Harriet Vane".to_string(),
            email:   "harriet@example.com".to_string(),
            role:    Role::HelpDesk,
            team_id: None,
        };
        assert!(!triager.is_agent_of("NETWORK"));
    }
}
