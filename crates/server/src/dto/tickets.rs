//! # Ticket Data Transfer Objects
//!
//! Request and response types for the ticket lifecycle endpoints.

use entity::tickets;
use error::PaginationMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::intelligence::{SimilarTicket, SolutionSuggestion, TeamSuggestion};

/// Request to create a new ticket
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateTicketRequest {
    /// Short summary of the issue
    #[validate(length(
        min = 1,
        max = 255,
        message = "Subject must be between 1 and 255 characters"
    ))]
    pub subject: String,

    /// Full problem description
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,

    /// Priority label; defaults to Medium
    pub priority: Option<String>,

    /// Ticket kind; defaults to request
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Up to 8 free-form tags
    #[serde(default)]
    #[validate(length(max = 8, message = "At most 8 tags are allowed"))]
    pub tags: Vec<String>,
}

/// Request to route a ticket to a team
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct AssignTicketRequest {
    /// Target team code
    #[validate(length(min = 1, message = "Team ID is required"))]
    pub team_id: String,
}

/// Request to resolve a ticket with an answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ResolveTicketRequest {
    /// The recorded answer
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
}

/// Request body for the advisory endpoints (suggest/similar)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SuggestRequest {
    /// How many candidates the remote service should consider
    pub top_k: Option<u32>,
}

/// Query parameters for the ticket list
#[derive(Debug, Clone, Deserialize)]
pub struct TicketListQuery {
    /// Status filter token, matched case-insensitively. An unknown token
    /// yields an empty result, not an error.
    pub status:   Option<String>,
    /// Page number (1-based, default: 1)
    pub page:     Option<u64>,
    /// Items per page (default: 10, max: 100)
    pub per_page: Option<u64>,
}

impl TicketListQuery {
    /// Get page number (1-based, default: 1)
    pub fn page(&self) -> u64 { self.page.unwrap_or(1).max(1) }

    /// Get items per page (default: 10, max: 100)
    pub fn per_page(&self) -> u64 { self.per_page.unwrap_or(10).clamp(1, 100) }
}

/// Response for a single ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketResponse {
    pub ticket_id:          i32,
    pub requester_id:       i32,
    pub subject:            String,
    pub body:               String,
    pub status:             entity::TicketStatus,
    pub priority:           String,
    #[serde(rename = "type")]
    pub kind:               Option<String>,
    pub assigned_team_id:   Option<String>,
    pub assigned_team_name: Option<String>,
    pub suggested_team_id:  Option<String>,
    pub suggested_answer:   Option<String>,
    pub answer:             Option<String>,
    pub tags:               Vec<String>,
    pub created_at:         chrono::DateTime<chrono::Utc>,
}

impl TicketResponse {
    /// Build a response from the entity model plus the resolved team name.
    #[must_use]
    pub fn from_model(ticket: &tickets::Model, assigned_team_name: Option<String>) -> Self {
        Self {
            ticket_id: ticket.ticket_id,
            requester_id: ticket.requester_id,
            subject: ticket.subject.clone(),
            body: ticket.body.clone(),
            status: ticket.status,
            priority: ticket.priority.clone(),
            kind: ticket.kind.clone(),
            assigned_team_id: ticket.assigned_team_id.clone(),
            assigned_team_name,
            suggested_team_id: ticket.suggested_assigned_team_id.clone(),
            suggested_answer: ticket.suggested_answer.clone(),
            answer: ticket.answer.clone(),
            tags: ticket.tags(),
            created_at: ticket.created_at,
        }
    }
}

/// Response for the paginated ticket list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketListResponse {
    /// Whether the operation was successful
    pub success:    bool,
    /// Tickets on this page, newest first
    pub tickets:    Vec<TicketResponse>,
    /// Pagination info
    pub pagination: PaginationMeta,
}

impl TicketListResponse {
    /// The empty page returned for unknown status filters.
    #[must_use]
    pub fn empty(page: u64, per_page: u64) -> Self {
        Self {
            success:    true,
            tickets:    Vec::new(),
            pagination: PaginationMeta::new(page, per_page, 0),
        }
    }
}

/// Response wrapping a single mutated ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketActionResponse {
    pub success: bool,
    pub ticket:  TicketResponse,
}

/// Response for the team suggestion endpoint; `suggestion` is absent when
/// the remote service had nothing to offer (or failed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestTeamResponse {
    pub success:    bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<TeamSuggestion>,
}

/// Response for the solution suggestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestSolutionResponse {
    pub success:    bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<SolutionSuggestion>,
}

/// Response for the similarity search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarTicketsResponse {
    pub success: bool,
    pub results: Vec<SimilarTicket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let q = TicketListQuery {
            status:   None,
            page:     None,
            per_page: None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 10);
    }

    #[test]
    fn test_list_query_clamps() {
        let q = TicketListQuery {
            status:   None,
            page:     Some(0),
            per_page: Some(1000),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 100);

        let q = TicketListQuery {
            status:   None,
            page:     Some(3),
            per_page: Some(0),
        };
        assert_eq!(q.page(), 3);
        assert_eq!(q.per_page(), 1);
    }

    #[test]
    fn test_empty_list_response() {
        let response = TicketListResponse::empty(2, 10);
        assert!(response.success);
        assert!(response.tickets.is_empty());
        assert_eq!(response.pagination.total_items, 0);
        assert_eq!(response.pagination.total_pages, 0);
    }
}
