//! # Ticket Handlers
//!
//! HTTP request handlers for the ticket lifecycle and advisory endpoints.
//! Transition legality and authorization live in [`crate::lifecycle`]; the
//! handlers here shape requests and responses, resolve display names and
//! fire best-effort notifications.

use std::collections::HashMap;

use axum::Json;
use entity::{teams, tickets, Teams, Tickets, TicketStatus};
use error::{AppError, PaginationMeta, Result};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::warn;
use validator::Validate;

use crate::{
    dto::tickets::{
        AssignTicketRequest,
        CreateTicketRequest,
        ResolveTicketRequest,
        SimilarTicketsResponse,
        SuggestRequest,
        SuggestSolutionResponse,
        SuggestTeamResponse,
        TicketActionResponse,
        TicketListQuery,
        TicketListResponse,
        TicketResponse,
    },
    identity::{Identity, Role},
    intelligence::{NotificationKind, NotificationRequest},
    lifecycle::{self, NewTicket},
    AppState,
};

/// Role-scoped ticket list with status filter and pagination.
///
/// Requesters see their own tickets, Support agents their team's, HelpDesk
/// everything. An unknown status token yields an empty page rather than an
/// error.
pub async fn list_tickets_handler_inner(
    state: &AppState,
    identity: Identity,
    query: TicketListQuery,
) -> Result<Json<TicketListResponse>> {
    let page = query.page();
    let per_page = query.per_page();

    let mut base_query = Tickets::find();

    match identity.role {
        Role::Requester => {
            base_query = base_query.filter(tickets::Column::RequesterId.eq(identity.user_id));
        },
        Role::Support => {
            let team_id = identity
                .team_id
                .as_deref()
                .ok_or_else(|| AppError::internal("Support identity is missing its team"))?;
            base_query = base_query.filter(tickets::Column::AssignedTeamId.eq(team_id));
        },
        Role::HelpDesk => {},
    }

    if let Some(ref raw_status) = query.status {
        match TicketStatus::parse(raw_status) {
            Some(parsed) => {
                base_query = base_query.filter(tickets::Column::Status.eq(parsed));
            },
            None => {
                // Unknown filter token: empty result, not a query error
                return Ok(Json(TicketListResponse::empty(page, per_page)));
            },
        }
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count tickets: {}", e)))?;

    let ticket_rows = base_query
        .order_by_desc(tickets::Column::CreatedAt)
        .paginate(&state.db, per_page)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch tickets: {}", e)))?;

    let team_names = team_name_map(state, &ticket_rows).await?;
    let ticket_responses: Vec<TicketResponse> = ticket_rows
        .iter()
        .map(|t| TicketResponse::from_model(t, lookup_team_name(&team_names, t)))
        .collect();

    Ok(Json(TicketListResponse {
        success:    true,
        tickets:    ticket_responses,
        pagination: PaginationMeta::new(page, per_page, total),
    }))
}

/// Create a ticket (Requester only).
///
/// The local store is the system of record; the remote intelligence
/// service is only told about the new ticket so it can index it.
pub async fn create_ticket_handler_inner(
    state: &AppState,
    identity: Identity,
    req: CreateTicketRequest,
) -> Result<Json<TicketActionResponse>> {
    req.validate()?;

    let ticket = lifecycle::create(
        &state.db,
        &identity,
        NewTicket {
            subject:  req.subject,
            body:     req.body,
            priority: req.priority,
            kind:     req.kind,
            tags:     req.tags,
        },
    )
    .await?;

    if !state.intelligence.create_ticket(&ticket).await {
        warn!(ticket_id = %ticket.ticket_id, "Ticket was not indexed by the intelligence service");
    }

    Ok(Json(TicketActionResponse {
        success: true,
        ticket:  TicketResponse::from_model(&ticket, None),
    }))
}

/// Route a ticket to a team (HelpDesk only).
pub async fn assign_ticket_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
    req: AssignTicketRequest,
) -> Result<Json<TicketActionResponse>> {
    req.validate()?;

    let ticket = lifecycle::assign(&state.db, &identity, ticket_id, &req.team_id).await?;

    notify_assigned_team(state, &ticket).await;

    respond_with_team_name(state, ticket).await
}

/// Start work on an assigned ticket (Support agent of the team).
pub async fn start_work_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
) -> Result<Json<TicketActionResponse>> {
    let ticket = lifecycle::start_work(&state.db, &identity, ticket_id).await?;

    respond_with_team_name(state, ticket).await
}

/// Resolve a ticket with an answer (Support agent of the team).
pub async fn resolve_ticket_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
    req: ResolveTicketRequest,
) -> Result<Json<TicketActionResponse>> {
    req.validate()?;

    let ticket = lifecycle::resolve(&state.db, &identity, ticket_id, &req.answer).await?;

    notify_requester(state, &ticket, NotificationKind::TicketResolved).await;

    respond_with_team_name(state, ticket).await
}

/// Cancel a non-terminal ticket.
pub async fn cancel_ticket_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
) -> Result<Json<TicketActionResponse>> {
    let ticket = lifecycle::cancel(&state.db, &identity, ticket_id).await?;

    notify_requester(state, &ticket, NotificationKind::TicketCanceled).await;

    respond_with_team_name(state, ticket).await
}

/// Clear the advisory suggestion fields (HelpDesk only).
pub async fn dismiss_suggestion_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
) -> Result<Json<TicketActionResponse>> {
    let ticket = lifecycle::dismiss_suggestion(&state.db, &identity, ticket_id).await?;

    respond_with_team_name(state, ticket).await
}

/// Ask the intelligence service for a team suggestion (HelpDesk only).
/// A failed or empty remote answer renders as no suggestion.
pub async fn suggest_team_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
    req: SuggestRequest,
) -> Result<Json<SuggestTeamResponse>> {
    lifecycle::require_role(&identity, Role::HelpDesk)?;
    lifecycle::find_ticket(&state.db, ticket_id).await?;

    let suggestion = state.intelligence.suggest_team(ticket_id, req.top_k).await;

    Ok(Json(SuggestTeamResponse {
        success: true,
        suggestion,
    }))
}

/// Ask the intelligence service for a solution draft (Support agent of the
/// assigned team).
pub async fn suggest_solution_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
    req: SuggestRequest,
) -> Result<Json<SuggestSolutionResponse>> {
    let ticket = lifecycle::find_ticket(&state.db, ticket_id).await?;
    lifecycle::require_assigned_agent(&identity, &ticket)?;

    let suggestion = state.intelligence.suggest_solution(ticket_id, req.top_k).await;

    Ok(Json(SuggestSolutionResponse {
        success: true,
        suggestion,
    }))
}

/// Rank similar tickets (Support agent of the assigned team).
pub async fn find_similar_handler_inner(
    state: &AppState,
    identity: Identity,
    ticket_id: i32,
    req: SuggestRequest,
) -> Result<Json<SimilarTicketsResponse>> {
    let ticket = lifecycle::find_ticket(&state.db, ticket_id).await?;
    lifecycle::require_assigned_agent(&identity, &ticket)?;

    let results = state.intelligence.find_similar(ticket_id, req.top_k).await;

    Ok(Json(SimilarTicketsResponse {
        success: true,
        results,
    }))
}

/// Resolve team display names for a page of tickets in one query.
async fn team_name_map(state: &AppState, ticket_rows: &[tickets::Model]) -> Result<HashMap<String, String>> {
    let team_ids: Vec<String> = ticket_rows
        .iter()
        .filter_map(|t| t.assigned_team_id.clone())
        .collect();

    let mut names = HashMap::new();
    if team_ids.is_empty() {
        return Ok(names);
    }

    for team in Teams::find()
        .filter(teams::Column::TeamId.is_in(team_ids))
        .all(&state.db)
        .await?
    {
        names.insert(team.team_id, team.team_name);
    }

    Ok(names)
}

fn lookup_team_name(names: &HashMap<String, String>, ticket: &tickets::Model) -> Option<String> {
    ticket
        .assigned_team_id
        .as_ref()
        .and_then(|id| names.get(id).cloned())
}

/// Build the single-ticket response, resolving the assigned team name.
async fn respond_with_team_name(state: &AppState, ticket: tickets::Model) -> Result<Json<TicketActionResponse>> {
    let team_name = match ticket.assigned_team_id.as_deref() {
        Some(team_id) => {
            Teams::find_by_id(team_id)
                .one(&state.db)
                .await?
                .map(|t| t.team_name)
        },
        None => None,
    };

    Ok(Json(TicketActionResponse {
        success: true,
        ticket:  TicketResponse::from_model(&ticket, team_name),
    }))
}

/// Best-effort notification to the team a ticket was just routed to.
/// Failures are logged by the client and never affect the response.
async fn notify_assigned_team(state: &AppState, ticket: &tickets::Model) {
    let Some(team_id) = ticket.assigned_team_id.as_deref() else {
        return;
    };

    let team = match Teams::find_by_id(team_id).one(&state.db).await {
        Ok(Some(team)) => team,
        Ok(None) => return,
        Err(e) => {
            warn!(ticket_id = %ticket.ticket_id, error = %e, "Could not load team for notification");
            return;
        },
    };

    let Some(recipient) = team.team_email_address else {
        return;
    };

    let request = NotificationRequest {
        ticket_id: ticket.ticket_id,
        recipient,
        user_name: team.team_name,
    };
    state
        .intelligence
        .notify(NotificationKind::TicketAssignedTeam, &request)
        .await;
}

/// Best-effort notification to the ticket's requester.
async fn notify_requester(state: &AppState, ticket: &tickets::Model, kind: NotificationKind) {
    let user = match entity::Users::find_by_id(ticket.requester_id).one(&state.db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(ticket_id = %ticket.ticket_id, "Requester no longer exists, skipping notification");
            return;
        },
        Err(e) => {
            warn!(ticket_id = %ticket.ticket_id, error = %e, "Could not load requester for notification");
            return;
        },
    };

    let request = NotificationRequest {
        ticket_id: ticket.ticket_id,
        recipient: user.email,
        user_name: user.name,
    };
    state.intelligence.notify(kind, &request).await;
}
