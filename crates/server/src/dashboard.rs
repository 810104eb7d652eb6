//! # Dashboard Aggregator
//!
//! Read-side projections: ticket counts by status, scoped by role, plus the
//! per-team summary and queue listing the help desk works from. Every
//! handler recomputes from the store on each request — there is no caching
//! layer and nothing here mutates state.

use axum::Json;
use entity::{helpdesk_tickets, teams, tickets, HelpdeskTickets, Teams, Tickets, TicketStatus};
use error::{AppError, Result};
use sea_orm::{ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::{
    dto::dashboard::{DashboardResponse, DashboardStats, QueueResponse},
    identity::{Identity, Role},
    lifecycle,
    AppState,
};

/// Global totals for the help-desk view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    /// All tickets
    pub total:       u64,
    /// Tickets not yet routed to any team
    pub unassigned:  u64,
    /// Tickets being handled (ASSIGNED or INPROGRESS)
    pub in_progress: u64,
    pub resolved:    u64,
    pub canceled:    u64,
}

/// Per-team workload summary for the help-desk view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub team_id:          String,
    pub team_name:        String,
    pub team_description: Option<String>,
    /// All tickets ever routed to the team
    pub total:            u64,
    /// Tickets currently with the team (ASSIGNED or INPROGRESS)
    pub active:           u64,
}

/// The complete help-desk dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpDeskStats {
    #[serde(flatten)]
    pub totals: GlobalStats,
    pub teams:  Vec<TeamSummary>,
}

/// Status breakdown scoped to a requester or a support team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedStats {
    pub total:       u64,
    pub open:        u64,
    pub assigned:    u64,
    pub in_progress: u64,
    pub resolved:    u64,
    pub canceled:    u64,
}

async fn scoped_stats(db: &DbConn, scope: sea_orm::sea_query::SimpleExpr) -> Result<ScopedStats> {
    let base = Tickets::find().filter(scope);

    let total = base.clone().count(db).await?;
    let open = base
        .clone()
        .filter(tickets::Column::Status.eq(TicketStatus::Open))
        .count(db)
        .await?;
    let assigned = base
        .clone()
        .filter(tickets::Column::Status.eq(TicketStatus::Assigned))
        .count(db)
        .await?;
    let in_progress = base
        .clone()
        .filter(tickets::Column::Status.eq(TicketStatus::InProgress))
        .count(db)
        .await?;
    let resolved = base
        .clone()
        .filter(tickets::Column::Status.eq(TicketStatus::Resolved))
        .count(db)
        .await?;
    let canceled = base
        .filter(tickets::Column::Status.eq(TicketStatus::Canceled))
        .count(db)
        .await?;

    Ok(ScopedStats {
        total,
        open,
        assigned,
        in_progress,
        resolved,
        canceled,
    })
}

/// Counts scoped to the requester's own tickets.
pub async fn requester_stats(db: &DbConn, user_id: i32) -> Result<ScopedStats> {
    scoped_stats(db, tickets::Column::RequesterId.eq(user_id)).await
}

/// Counts scoped to the support agent's team.
pub async fn support_stats(db: &DbConn, team_id: &str) -> Result<ScopedStats> {
    scoped_stats(db, tickets::Column::AssignedTeamId.eq(team_id)).await
}

/// Global totals plus the per-team workload summary.
pub async fn helpdesk_stats(db: &DbConn) -> Result<HelpDeskStats> {
    let total = Tickets::find().count(db).await?;
    let unassigned = Tickets::find()
        .filter(tickets::Column::AssignedTeamId.is_null())
        .count(db)
        .await?;
    let in_progress = Tickets::find()
        .filter(tickets::Column::Status.is_in([TicketStatus::Assigned, TicketStatus::InProgress]))
        .count(db)
        .await?;
    let resolved = Tickets::find()
        .filter(tickets::Column::Status.eq(TicketStatus::Resolved))
        .count(db)
        .await?;
    let canceled = Tickets::find()
        .filter(tickets::Column::Status.eq(TicketStatus::Canceled))
        .count(db)
        .await?;

    let team_rows = Teams::find()
        .order_by_asc(teams::Column::TeamName)
        .all(db)
        .await?;

    let mut team_summaries = Vec::with_capacity(team_rows.len());
    for team in team_rows {
        let team_total = Tickets::find()
            .filter(tickets::Column::AssignedTeamId.eq(&team.team_id))
            .count(db)
            .await?;
        let active = Tickets::find()
            .filter(tickets::Column::AssignedTeamId.eq(&team.team_id))
            .filter(tickets::Column::Status.is_in([TicketStatus::Assigned, TicketStatus::InProgress]))
            .count(db)
            .await?;

        team_summaries.push(TeamSummary {
            team_id:          team.team_id,
            team_name:        team.team_name,
            team_description: team.team_description,
            total:            team_total,
            active,
        });
    }

    Ok(HelpDeskStats {
        totals: GlobalStats {
            total,
            unassigned,
            in_progress,
            resolved,
            canceled,
        },
        teams:  team_summaries,
    })
}

/// The help-desk queue from the read-only `helpdesk_tickets` view,
/// newest first.
pub async fn helpdesk_queue(db: &DbConn) -> Result<Vec<helpdesk_tickets::Model>> {
    Ok(HelpdeskTickets::find()
        .order_by_desc(helpdesk_tickets::Column::TicketId)
        .all(db)
        .await?)
}

/// The dashboard endpoint, dispatched on the caller's role.
pub async fn dashboard_handler_inner(state: &AppState, identity: Identity) -> Result<Json<DashboardResponse>> {
    let stats = match identity.role {
        Role::HelpDesk => DashboardStats::Global(helpdesk_stats(&state.db).await?),
        Role::Requester => DashboardStats::Scoped(requester_stats(&state.db, identity.user_id).await?),
        Role::Support => {
            let team_id = identity
                .team_id
                .as_deref()
                .ok_or_else(|| AppError::internal("Support identity is missing its team"))?;
            DashboardStats::Scoped(support_stats(&state.db, team_id).await?)
        },
    };

    Ok(Json(DashboardResponse {
        success: true,
        role: identity.role,
        stats,
    }))
}

/// The help-desk queue endpoint (HelpDesk only).
pub async fn queue_handler_inner(state: &AppState, identity: Identity) -> Result<Json<QueueResponse>> {
    lifecycle::require_role(&identity, Role::HelpDesk)?;

    let ticket_rows = helpdesk_queue(&state.db).await?;

    Ok(Json(QueueResponse {
        success: true,
        tickets: ticket_rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpdesk_stats_serializes_flat() {
        let stats = HelpDeskStats {
            totals: GlobalStats {
                total:       10,
                unassigned:  2,
                in_progress: 3,
                resolved:    4,
                canceled:    1,
            },
            teams:  vec![TeamSummary {
                team_id:          "NETWORK".to_string(),
                team_name:        "Network".to_string(),
                team_description: None,
                total:            5,
                active:           2,
            }],
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 10);
        assert_eq!(json["unassigned"], 2);
        assert_eq!(json["teams"][0]["team_id"], "NETWORK");
    }
}
