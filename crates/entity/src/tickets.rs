//! Tickets Entity
//!
//! The authoritative ticket table: status, assignment, tagging and the
//! advisory fields written by the external intelligence service
//! (`suggested_answer`, `suggested_assigned_team_id`). A ticket always has
//! a requester; `assigned_team_id` stays null until triage.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub ticket_id:                  i32,
    pub requester_id:               i32,
    pub subject:                    String,
    pub body:                       String,
    pub answer:                     Option<String>,
    pub suggested_answer:           Option<String>,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind:                       Option<String>,
    pub priority:                   String,
    pub assigned_team_id:           Option<String>,
    pub suggested_assigned_team_id: Option<String>,
    pub status:                     TicketStatus,
    pub created_at:                 chrono::DateTime<chrono::Utc>,
    pub tag_1:                      Option<String>,
    pub tag_2:                      Option<String>,
    pub tag_3:                      Option<String>,
    pub tag_4:                      Option<String>,
    pub tag_5:                      Option<String>,
    pub tag_6:                      Option<String>,
    pub tag_7:                      Option<String>,
    pub tag_8:                      Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RequesterId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Requester,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::AssignedTeamId",
        to = "super::teams::Column::TeamId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AssignedTeam,
    #[sea_orm(has_many = "super::ticket_embeddings::Entity")]
    TicketEmbeddings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Requester.def() }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef { Relation::AssignedTeam.def() }
}

impl Related<super::ticket_embeddings::Entity> for Entity {
    fn to() -> RelationDef { Relation::TicketEmbeddings.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Ticket lifecycle status.
///
/// Stored as canonical uppercase tokens. All parsing is case-insensitive;
/// no other value is ever written to the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    /// Filed by a requester, not yet triaged
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// Routed to a support team by the help desk
    #[sea_orm(string_value = "ASSIGNED")]
    Assigned,
    /// A support agent of the assigned team is working it
    #[sea_orm(string_value = "INPROGRESS")]
    InProgress,
    /// Answered; terminal
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
    /// Withdrawn or abandoned; terminal
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

impl TicketStatus {
    /// Canonical stored token.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::Assigned => "ASSIGNED",
            TicketStatus::InProgress => "INPROGRESS",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Canceled => "CANCELED",
        }
    }

    /// Case-insensitive parse of a status token.
    ///
    /// Returns `None` for anything outside the closed set — callers decide
    /// whether that means an empty result (filters) or a rejection.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Some(TicketStatus::Open),
            "ASSIGNED" => Some(TicketStatus::Assigned),
            "INPROGRESS" => Some(TicketStatus::InProgress),
            "RESOLVED" => Some(TicketStatus::Resolved),
            "CANCELED" => Some(TicketStatus::Canceled),
            _ => None,
        }
    }

    /// Terminal states accept no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool { matches!(self, TicketStatus::Resolved | TicketStatus::Canceled) }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.as_str()) }
}

impl Model {
    /// The ticket's non-empty tags in slot order.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        [
            &self.tag_1, &self.tag_2, &self.tag_3, &self.tag_4, &self.tag_5, &self.tag_6, &self.tag_7, &self.tag_8,
        ]
        .into_iter()
        .filter_map(|t| t.clone())
        .filter(|t| !t.is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(TicketStatus::parse("open"), Some(TicketStatus::Open));
        assert_eq!(TicketStatus::parse("InProgress"), Some(TicketStatus::InProgress));
        assert_eq!(TicketStatus::parse(" RESOLVED "), Some(TicketStatus::Resolved));
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(TicketStatus::parse("CLOSED"), None);
        assert_eq!(TicketStatus::parse(""), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(TicketStatus::Resolved.is_terminal());
        assert!(TicketStatus::Canceled.is_terminal());
        assert!(!TicketStatus::Open.is_terminal());
        assert!(!TicketStatus::Assigned.is_terminal());
        assert!(!TicketStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_tags_skip_empty_slots() {
        let ticket = Model {
            ticket_id:                  1,
            requester_id:               7,
            subject:                    "Printer broken".to_string(),
            body:                       "won't turn on".to_string(),
            answer:                     None,
            suggested_answer:           None,
            kind:                       Some("request".to_string()),
            priority:                   "Medium".to_string(),
            assigned_team_id:           None,
            suggested_assigned_team_id: None,
            status:                     TicketStatus::Open,
            created_at:                 chrono::Utc::now(),
            tag_1:                      Some("hardware".to_string()),
            tag_2:                      None,
            tag_3:                      Some("printer".to_string()),
            tag_4:                      Some(String::new()),
            tag_5:                      None,
            tag_6:                      None,
            tag_7:                      None,
            tag_8:                      None,
        };

        assert_eq!(ticket.tags(), vec!["hardware".to_string(), "printer".to_string()]);
    }
}
