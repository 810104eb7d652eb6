//! Teams Entity
//!
//! Represents support teams. The primary key is a string code such as
//! `NETWORK` or `IT_HELP_DESK`; a code containing `HELP_DESK` marks the
//! triage team. `team_email_address` is the notification recipient used
//! when a ticket is routed to the team.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_id:            String,
    pub team_name:          String,
    pub team_description:   Option<String>,
    pub team_email_address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_members::Entity")]
    TeamMembers,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
}

impl Related<super::team_members::Entity> for Entity {
    fn to() -> RelationDef { Relation::TeamMembers.def() }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tickets.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Substring convention marking the help-desk (triage) team.
pub const HELP_DESK_MARKER: &str = "HELP_DESK";

impl Model {
    /// Whether this team is the help-desk triage team.
    #[must_use]
    pub fn is_help_desk(&self) -> bool { team_id_is_help_desk(&self.team_id) }
}

/// Whether a team id denotes the help-desk team (case-insensitive match).
#[must_use]
pub fn team_id_is_help_desk(team_id: &str) -> bool {
    team_id.to_ascii_uppercase().contains(HELP_DESK_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_desk_marker_match() {
        assert!(team_id_is_help_desk("IT_HELP_DESK"));
        assert!(team_id_is_help_desk("help_desk"));
        assert!(team_id_is_help_desk("Global_Help_Desk_Emea"));
    }

    #[test]
    fn test_non_help_desk_team() {
        assert!(!team_id_is_help_desk("NETWORK"));
        assert!(!team_id_is_help_desk("HELPERS"));
        assert!(!team_id_is_help_desk(""));
    }
}
