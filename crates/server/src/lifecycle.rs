//! # Ticket Lifecycle Manager
//!
//! The single place where status transitions are validated and applied.
//! States move `OPEN → ASSIGNED → INPROGRESS → RESOLVED`, with `CANCELED`
//! reachable from any non-terminal state; `RESOLVED` and `CANCELED` accept
//! nothing further.
//!
//! Every applied transition is one conditional
//! `UPDATE tickets SET … WHERE ticket_id = ? AND status IN (…)`. Zero rows
//! affected after an existence check means another actor got there first;
//! the caller sees a conflict and no mutation happened. That closes the
//! lost-update race between concurrent actors without any application-level
//! locking.

use chrono::Utc;
use entity::{ticket_embeddings, tickets, Teams, Tickets, TicketStatus};
use error::{AppError, Result};
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};
use sea_orm::sea_query::Expr;
use tracing::info;

use crate::identity::{Identity, Role};

/// Maximum number of free-form tags a ticket carries.
pub const MAX_TAGS: usize = 8;

/// Input for ticket creation, already shaped by the DTO layer.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub subject:  String,
    pub body:     String,
    pub priority: Option<String>,
    pub kind:     Option<String>,
    pub tags:     Vec<String>,
}

// ---------------------------------------------------------------------------
// Pure legality checks. Kept separate from the applied transitions so the
// transition table is testable without a database.
// ---------------------------------------------------------------------------

/// `assign` is legal while the ticket is untriaged or merely routed;
/// re-routing a mis-triaged ticket is allowed until work starts.
#[must_use]
pub fn assign_allowed(status: TicketStatus) -> bool {
    matches!(status, TicketStatus::Open | TicketStatus::Assigned)
}

/// `start work` is legal only on a routed ticket.
#[must_use]
pub fn start_allowed(status: TicketStatus) -> bool { status == TicketStatus::Assigned }

/// `resolve` is legal only on a ticket being worked.
#[must_use]
pub fn resolve_allowed(status: TicketStatus) -> bool { status == TicketStatus::InProgress }

/// `cancel` is legal from any non-terminal state.
#[must_use]
pub fn cancel_allowed(status: TicketStatus) -> bool { !status.is_terminal() }

/// Who may cancel: the requester for their own tickets, Support for
/// tickets routed to their team, HelpDesk for anything.
#[must_use]
pub fn can_cancel(identity: &Identity, ticket: &tickets::Model) -> bool {
    match identity.role {
        Role::Requester => ticket.requester_id == identity.user_id,
        Role::Support => {
            ticket
                .assigned_team_id
                .as_deref()
                .is_some_and(|team| identity.is_agent_of(team))
        },
        Role::HelpDesk => true,
    }
}

/// Reject callers that do not hold the required role.
pub fn require_role(identity: &Identity, role: Role) -> Result<()> {
    if identity.role == role {
        Ok(())
    }
    else {
        Err(AppError::forbidden(format!(
            "This action requires the {} role",
            role
        )))
    }
}

/// Reject Support callers that are not agents of the ticket's assigned team.
pub fn require_assigned_agent(identity: &Identity, ticket: &tickets::Model) -> Result<()> {
    require_role(identity, Role::Support)?;
    match ticket.assigned_team_id.as_deref() {
        Some(team) if identity.is_agent_of(team) => Ok(()),
        Some(_) => Err(AppError::forbidden("Ticket is assigned to a different team")),
        None => Err(AppError::conflict("Ticket has not been assigned to a team")),
    }
}

fn tag_slot(tags: &[String], index: usize) -> Option<String> { tags.get(index).map(|t| t.trim().to_string()) }

// ---------------------------------------------------------------------------
// Applied transitions
// ---------------------------------------------------------------------------

/// Create a new ticket for the requester.
///
/// The ticket body is also stored as a `ticket_embeddings` chunk so the
/// external similarity service can embed it later.
pub async fn create(db: &DbConn, identity: &Identity, new: NewTicket) -> Result<tickets::Model> {
    require_role(identity, Role::Requester)?;

    let subject = new.subject.trim().to_string();
    let body = new.body.trim().to_string();
    if subject.is_empty() {
        return Err(AppError::validation("Subject is required"));
    }
    if body.is_empty() {
        return Err(AppError::validation("Body is required"));
    }
    if new.tags.len() > MAX_TAGS {
        return Err(AppError::validation(format!("At most {} tags are allowed", MAX_TAGS)));
    }

    let ticket = tickets::ActiveModel {
        requester_id: Set(identity.user_id),
        subject: Set(subject),
        body: Set(body.clone()),
        kind: Set(Some(new.kind.unwrap_or_else(|| "request".to_string()))),
        priority: Set(new.priority.unwrap_or_else(|| "Medium".to_string())),
        status: Set(TicketStatus::Open),
        created_at: Set(Utc::now()),
        tag_1: Set(tag_slot(&new.tags, 0)),
        tag_2: Set(tag_slot(&new.tags, 1)),
        tag_3: Set(tag_slot(&new.tags, 2)),
        tag_4: Set(tag_slot(&new.tags, 3)),
        tag_5: Set(tag_slot(&new.tags, 4)),
        tag_6: Set(tag_slot(&new.tags, 5)),
        tag_7: Set(tag_slot(&new.tags, 6)),
        tag_8: Set(tag_slot(&new.tags, 7)),
        ..Default::default()
    };

    let created = ticket
        .insert(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ticket: {}", e)))?;

    let chunk = ticket_embeddings::ActiveModel {
        ticket_id: Set(created.ticket_id),
        chunk_text: Set(body),
        ..Default::default()
    };
    chunk
        .insert(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to store ticket text chunk: {}", e)))?;

    info!(ticket_id = %created.ticket_id, requester_id = %identity.user_id, "Ticket created");

    Ok(created)
}

/// Route a ticket to a team (HelpDesk only).
pub async fn assign(db: &DbConn, identity: &Identity, ticket_id: i32, team_id: &str) -> Result<tickets::Model> {
    require_role(identity, Role::HelpDesk)?;

    let ticket = find_ticket(db, ticket_id).await?;

    let team = Teams::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;

    if !assign_allowed(ticket.status) {
        return Err(AppError::conflict(format!(
            "Ticket cannot be assigned while {}",
            ticket.status
        )));
    }

    let result = Tickets::update_many()
        .col_expr(tickets::Column::Status, TicketStatus::Assigned.as_enum())
        .col_expr(tickets::Column::AssignedTeamId, Expr::value(team.team_id.clone()))
        .filter(tickets::Column::TicketId.eq(ticket_id))
        .filter(tickets::Column::Status.is_in([TicketStatus::Open, TicketStatus::Assigned]))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::conflict("Ticket already updated"));
    }

    info!(ticket_id = %ticket_id, team_id = %team.team_id, user_id = %identity.user_id, "Ticket assigned");

    find_ticket(db, ticket_id).await
}

/// Move an assigned ticket into progress (Support agent of the team).
pub async fn start_work(db: &DbConn, identity: &Identity, ticket_id: i32) -> Result<tickets::Model> {
    let ticket = find_ticket(db, ticket_id).await?;
    require_assigned_agent(identity, &ticket)?;

    if !start_allowed(ticket.status) {
        return Err(AppError::conflict(format!(
            "Work can only start on an assigned ticket, not {}",
            ticket.status
        )));
    }

    let result = Tickets::update_many()
        .col_expr(tickets::Column::Status, TicketStatus::InProgress.as_enum())
        .filter(tickets::Column::TicketId.eq(ticket_id))
        .filter(tickets::Column::Status.eq(TicketStatus::Assigned))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::conflict("Ticket already updated"));
    }

    info!(ticket_id = %ticket_id, user_id = %identity.user_id, "Work started");

    find_ticket(db, ticket_id).await
}

/// Record an answer and resolve the ticket (Support agent of the team).
pub async fn resolve(db: &DbConn, identity: &Identity, ticket_id: i32, answer: &str) -> Result<tickets::Model> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(AppError::validation("Answer is required"));
    }

    let ticket = find_ticket(db, ticket_id).await?;
    require_assigned_agent(identity, &ticket)?;

    if !resolve_allowed(ticket.status) {
        return Err(AppError::conflict(format!(
            "Only a ticket in progress can be resolved, not {}",
            ticket.status
        )));
    }

    let result = Tickets::update_many()
        .col_expr(tickets::Column::Status, TicketStatus::Resolved.as_enum())
        .col_expr(tickets::Column::Answer, Expr::value(answer.to_string()))
        .filter(tickets::Column::TicketId.eq(ticket_id))
        .filter(tickets::Column::Status.eq(TicketStatus::InProgress))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::conflict("Ticket already updated"));
    }

    info!(ticket_id = %ticket_id, user_id = %identity.user_id, "Ticket resolved");

    find_ticket(db, ticket_id).await
}

/// Cancel a non-terminal ticket.
pub async fn cancel(db: &DbConn, identity: &Identity, ticket_id: i32) -> Result<tickets::Model> {
    let ticket = find_ticket(db, ticket_id).await?;

    if !can_cancel(identity, &ticket) {
        return Err(AppError::forbidden("You may not cancel this ticket"));
    }

    if !cancel_allowed(ticket.status) {
        return Err(AppError::conflict(format!("Ticket is already {}", ticket.status)));
    }

    let result = Tickets::update_many()
        .col_expr(tickets::Column::Status, TicketStatus::Canceled.as_enum())
        .filter(tickets::Column::TicketId.eq(ticket_id))
        .filter(tickets::Column::Status.is_in([
            TicketStatus::Open,
            TicketStatus::Assigned,
            TicketStatus::InProgress,
        ]))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::conflict("Ticket already updated"));
    }

    info!(ticket_id = %ticket_id, user_id = %identity.user_id, "Ticket canceled");

    find_ticket(db, ticket_id).await
}

/// Clear the advisory suggestion fields (HelpDesk only). Not a status
/// transition — the lifecycle state is untouched.
pub async fn dismiss_suggestion(db: &DbConn, identity: &Identity, ticket_id: i32) -> Result<tickets::Model> {
    require_role(identity, Role::HelpDesk)?;

    let ticket = find_ticket(db, ticket_id).await?;

    let mut active: tickets::ActiveModel = ticket.into();
    active.suggested_assigned_team_id = Set(None);
    active.suggested_answer = Set(None);
    let updated = active
        .update(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to dismiss suggestion: {}", e)))?;

    info!(ticket_id = %ticket_id, user_id = %identity.user_id, "Suggestion dismissed");

    Ok(updated)
}

/// Fetch a ticket or report not-found.
pub async fn find_ticket(db: &DbConn, ticket_id: i32) -> Result<tickets::Model> {
    Tickets::find_by_id(ticket_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: TicketStatus, requester_id: i32, team: Option<&str>) -> tickets::Model {
        tickets::Model {
            ticket_id: 42,
            requester_id,
            subject: "Printer broken".to_string(),
            body: "won't turn on".to_string(),
            answer: None,
            suggested_answer: None,
            kind: Some("request".to_string()),
            priority: "Medium".to_string(),
            assigned_team_id: team.map(|t| t.to_string()),
            suggested_assigned_team_id: None,
            status,
            created_at: Utc::now(),
            tag_1: None,
            tag_2: None,
            tag_3: None,
            tag_4: None,
            tag_5: None,
            tag_6: None,
            tag_7: None,
            tag_8: None,
        }
    }

    fn requester(user_id: i32) -> Identity {
        Identity {
            user_id,
            name: "Priya Raman".to_string(),
            email: "priya@example.com".to_string(),
            role: Role::Requester,
            team_id: None,
        }
    }

    fn agent(team: &str) -> Identity {
        Identity {
            user_id: 9,
            name: "Nina Okafor".to_string(),
            email: "nina@example.com".to_string(),
            role: Role::Support,
            team_id: Some(team.to_string()),
        }
    }

    fn triager() -> Identity {
        Identity {
            user_id: 2,
            name: "Harriet Vane".to_string(),
            email: "harriet@example.com".to_string(),
            role: Role::HelpDesk,
            team_id: None,
        }
    }

    #[test]
    fn test_transition_table() {
        use TicketStatus::*;

        // assign: OPEN and ASSIGNED only
        assert!(assign_allowed(Open));
        assert!(assign_allowed(Assigned));
        assert!(!assign_allowed(InProgress));
        assert!(!assign_allowed(Resolved));
        assert!(!assign_allowed(Canceled));

        // start work: ASSIGNED only — in particular not OPEN
        assert!(!start_allowed(Open));
        assert!(start_allowed(Assigned));
        assert!(!start_allowed(InProgress));
        assert!(!start_allowed(Resolved));
        assert!(!start_allowed(Canceled));

        // resolve: INPROGRESS only
        assert!(!resolve_allowed(Open));
        assert!(!resolve_allowed(Assigned));
        assert!(resolve_allowed(InProgress));
        assert!(!resolve_allowed(Resolved));
        assert!(!resolve_allowed(Canceled));

        // cancel: any non-terminal state
        assert!(cancel_allowed(Open));
        assert!(cancel_allowed(Assigned));
        assert!(cancel_allowed(InProgress));
        assert!(!cancel_allowed(Resolved));
        assert!(!cancel_allowed(Canceled));
    }

    #[test]
    fn test_cancel_authorization_matrix() {
        let own = ticket(TicketStatus::Open, 7, None);
        let other = ticket(TicketStatus::Open, 8, None);
        let routed = ticket(TicketStatus::Assigned, 8, Some("NETWORK"));

        // Requester: own tickets only
        assert!(can_cancel(&requester(7), &own));
        assert!(!can_cancel(&requester(7), &other));

        // Support: own team's tickets only
        assert!(can_cancel(&agent("NETWORK"), &routed));
        assert!(!can_cancel(&agent("SOFTWARE"), &routed));
        assert!(!can_cancel(&agent("NETWORK"), &own));

        // HelpDesk: anything
        assert!(can_cancel(&triager(), &own));
        assert!(can_cancel(&triager(), &routed));
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&triager(), Role::HelpDesk).is_ok());
        assert!(require_role(&requester(1), Role::HelpDesk).is_err());
        assert!(require_role(&agent("NETWORK"), Role::Support).is_ok());
    }

    #[test]
    fn test_require_assigned_agent() {
        let routed = ticket(TicketStatus::Assigned, 8, Some("NETWORK"));
        assert!(require_assigned_agent(&agent("NETWORK"), &routed).is_ok());

        // wrong team is an authorization failure
        let err = require_assigned_agent(&agent("SOFTWARE"), &routed).unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");

        // unassigned ticket cannot be worked at all
        let open = ticket(TicketStatus::Open, 8, None);
        let err = require_assigned_agent(&agent("NETWORK"), &open).unwrap_err();
        assert_eq!(err.code(), "CONFLICT");

        // non-support roles are rejected outright
        let err = require_assigned_agent(&triager(), &routed).unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn test_tag_slots() {
        let tags = vec!["a".to_string(), " b ".to_string()];
        assert_eq!(tag_slot(&tags, 0).as_deref(), Some("a"));
        assert_eq!(tag_slot(&tags, 1).as_deref(), Some("b"));
        assert_eq!(tag_slot(&tags, 2), None);
    }
}
