//! # Lifecycle Integration Tests
//!
//! End-to-end checks of the ticket state machine against a real database.
//! All tests skip when `DATABASE_URL` is unset; fixtures use unique
//! identifiers so the suite is safe on a shared database.

mod common;

use entity::{Tickets, TicketStatus};
use sea_orm::EntityTrait;
use server::{dashboard, identity, lifecycle, sessions};

macro_rules! require_db {
    () => {
        match common::setup().await {
            Some(db) => db,
            None => {
                eprintln!("skipping: DATABASE_URL not set");
                return;
            },
        }
    };
}

#[tokio::test]
async fn test_create_ticket_opens_with_requester() {
    let db = require_db!();
    let user = common::seed_user(&db, "priya").await;
    let identity = common::requester_identity(&user);

    let ticket = lifecycle::create(
        &db,
        &identity,
        lifecycle::NewTicket {
            subject:  "Printer broken".to_string(),
            body:     "won't turn on".to_string(),
            priority: None,
            kind:     None,
            tags:     vec!["hardware".to_string()],
        },
    )
    .await
    .expect("create should succeed");

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.requester_id, user.user_id);
    assert!(ticket.assigned_team_id.is_none());
    assert_eq!(ticket.priority, "Medium");
    assert_eq!(ticket.tags(), vec!["hardware".to_string()]);
}

#[tokio::test]
async fn test_create_rejects_blank_fields() {
    let db = require_db!();
    let user = common::seed_user(&db, "oleg").await;
    let identity = common::requester_identity(&user);

    let err = lifecycle::create(
        &db,
        &identity,
        lifecycle::NewTicket {
            subject:  "   ".to_string(),
            body:     "body".to_string(),
            priority: None,
            kind:     None,
            tags:     vec![],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_assign_then_start_then_resolve() {
    let db = require_db!();
    let requester = common::seed_user(&db, "req").await;
    let triager = common::seed_user(&db, "triage").await;
    let agent_user = common::seed_user(&db, "agent").await;
    let team = common::seed_team(&db, "network").await;

    let ticket = common::seed_ticket(&db, requester.user_id, TicketStatus::Open, None).await;

    // HelpDesk routes the ticket
    let helpdesk = common::helpdesk_identity(&triager);
    let ticket = lifecycle::assign(&db, &helpdesk, ticket.ticket_id, &team.team_id)
        .await
        .expect("assign should succeed");
    assert_eq!(ticket.status, TicketStatus::Assigned);
    assert_eq!(ticket.assigned_team_id.as_deref(), Some(team.team_id.as_str()));

    // An agent of a different team may not start work
    let outsider = common::support_identity(&agent_user, "SOME_OTHER_TEAM");
    let err = lifecycle::start_work(&db, &outsider, ticket.ticket_id).await.unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");
    let unchanged = Tickets::find_by_id(ticket.ticket_id).one(&db).await.unwrap().unwrap();
    assert_eq!(unchanged.status, TicketStatus::Assigned);

    // The team's own agent starts and resolves
    let agent = common::support_identity(&agent_user, &team.team_id);
    let ticket = lifecycle::start_work(&db, &agent, ticket.ticket_id)
        .await
        .expect("start should succeed");
    assert_eq!(ticket.status, TicketStatus::InProgress);

    let ticket = lifecycle::resolve(&db, &agent, ticket.ticket_id, "Power cable was unplugged")
        .await
        .expect("resolve should succeed");
    assert_eq!(ticket.status, TicketStatus::Resolved);
    assert_eq!(ticket.answer.as_deref(), Some("Power cable was unplugged"));
}

#[tokio::test]
async fn test_start_work_on_open_ticket_is_rejected() {
    let db = require_db!();
    let requester = common::seed_user(&db, "req").await;
    let agent_user = common::seed_user(&db, "agent").await;
    let team = common::seed_team(&db, "desktop").await;

    let ticket = common::seed_ticket(&db, requester.user_id, TicketStatus::Open, None).await;

    let agent = common::support_identity(&agent_user, &team.team_id);
    let err = lifecycle::start_work(&db, &agent, ticket.ticket_id).await.unwrap_err();
    // The ticket has no assigned team yet, so this is a state conflict
    assert_eq!(err.code(), "CONFLICT");

    let unchanged = Tickets::find_by_id(ticket.ticket_id).one(&db).await.unwrap().unwrap();
    assert_eq!(unchanged.status, TicketStatus::Open);
}

#[tokio::test]
async fn test_concurrent_start_work_single_winner() {
    let db = require_db!();
    let requester = common::seed_user(&db, "req").await;
    let first_user = common::seed_user(&db, "agent1").await;
    let second_user = common::seed_user(&db, "agent2").await;
    let team = common::seed_team(&db, "network").await;

    let ticket = common::seed_ticket(&db, requester.user_id, TicketStatus::Assigned, Some(&team.team_id)).await;

    let first = common::support_identity(&first_user, &team.team_id);
    let second = common::support_identity(&second_user, &team.team_id);

    let (a, b) = tokio::join!(
        lifecycle::start_work(&db, &first, ticket.ticket_id),
        lifecycle::start_work(&db, &second, ticket.ticket_id),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one start-work call must win");

    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert_eq!(loser.code(), "CONFLICT");

    let settled = Tickets::find_by_id(ticket.ticket_id).one(&db).await.unwrap().unwrap();
    assert_eq!(settled.status, TicketStatus::InProgress);
}

#[tokio::test]
async fn test_cancel_rules() {
    let db = require_db!();
    let requester = common::seed_user(&db, "req").await;
    let other = common::seed_user(&db, "other").await;
    let triager = common::seed_user(&db, "triage").await;

    // Requester cancels own open ticket
    let ticket = common::seed_ticket(&db, requester.user_id, TicketStatus::Open, None).await;
    let canceled = lifecycle::cancel(&db, &common::requester_identity(&requester), ticket.ticket_id)
        .await
        .expect("own cancel should succeed");
    assert_eq!(canceled.status, TicketStatus::Canceled);

    // A terminal ticket cannot be canceled again
    let err = lifecycle::cancel(&db, &common::helpdesk_identity(&triager), ticket.ticket_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");

    // A requester may not cancel someone else's ticket
    let foreign = common::seed_ticket(&db, other.user_id, TicketStatus::Open, None).await;
    let err = lifecycle::cancel(&db, &common::requester_identity(&requester), foreign.ticket_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");

    // HelpDesk may cancel anything non-terminal
    let canceled = lifecycle::cancel(&db, &common::helpdesk_identity(&triager), foreign.ticket_id)
        .await
        .expect("helpdesk cancel should succeed");
    assert_eq!(canceled.status, TicketStatus::Canceled);
}

#[tokio::test]
async fn test_assign_unknown_team_is_not_found() {
    let db = require_db!();
    let requester = common::seed_user(&db, "req").await;
    let triager = common::seed_user(&db, "triage").await;

    let ticket = common::seed_ticket(&db, requester.user_id, TicketStatus::Open, None).await;

    let err = lifecycle::assign(&db, &common::helpdesk_identity(&triager), ticket.ticket_id, "NO_SUCH_TEAM")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");

    let unchanged = Tickets::find_by_id(ticket.ticket_id).one(&db).await.unwrap().unwrap();
    assert_eq!(unchanged.status, TicketStatus::Open);
    assert!(unchanged.assigned_team_id.is_none());
}

#[tokio::test]
async fn test_role_derivation_from_membership() {
    let db = require_db!();

    // No membership → Requester
    let plain = common::seed_user(&db, "plain").await;
    let identity = identity::resolve_identity(&db, &plain.email).await.unwrap();
    assert_eq!(identity.role, identity::Role::Requester);
    assert!(identity.team_id.is_none());

    // Help-desk membership → HelpDesk
    let triage_team = common::seed_team(&db, "it_help_desk").await;
    assert!(triage_team.is_help_desk());
    let triager = common::seed_user(&db, "triage").await;
    common::seed_membership(&db, &triage_team.team_id, triager.user_id).await;
    let identity = identity::resolve_identity(&db, &triager.email).await.unwrap();
    assert_eq!(identity.role, identity::Role::HelpDesk);

    // Any other membership → Support bound to the team
    let team = common::seed_team(&db, "software").await;
    let agent = common::seed_user(&db, "agent").await;
    common::seed_membership(&db, &team.team_id, agent.user_id).await;
    let identity = identity::resolve_identity(&db, &agent.email).await.unwrap();
    assert_eq!(identity.role, identity::Role::Support);
    assert_eq!(identity.team_id.as_deref(), Some(team.team_id.as_str()));

    // Unknown email is an authentication failure
    let err = identity::resolve_identity(&db, "nobody@test.local").await.unwrap_err();
    assert_eq!(err.code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_session_round_trip() {
    let db = require_db!();
    let user = common::seed_user(&db, "sess").await;
    let identity = common::requester_identity(&user);

    let token = sessions::create_session(&db, &identity).await.unwrap();

    let loaded = sessions::load_session(&db, token).await.unwrap();
    assert_eq!(loaded, identity);

    sessions::revoke_session(&db, token).await.unwrap();
    let err = sessions::load_session(&db, token).await.unwrap_err();
    assert_eq!(err.code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_support_dashboard_counts() {
    let db = require_db!();
    let requester = common::seed_user(&db, "req").await;
    let team = common::seed_team(&db, "counts").await;

    common::seed_ticket(&db, requester.user_id, TicketStatus::Assigned, Some(&team.team_id)).await;
    common::seed_ticket(&db, requester.user_id, TicketStatus::InProgress, Some(&team.team_id)).await;
    common::seed_ticket(&db, requester.user_id, TicketStatus::Resolved, Some(&team.team_id)).await;

    let stats = dashboard::support_stats(&db, &team.team_id).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.assigned, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.open, 0);
    assert_eq!(stats.canceled, 0);
}

#[tokio::test]
async fn test_helpdesk_team_summary_matches_created_load() {
    let db = require_db!();
    let requester = common::seed_user(&db, "req").await;
    let team = common::seed_team(&db, "summary").await;

    common::seed_ticket(&db, requester.user_id, TicketStatus::Assigned, Some(&team.team_id)).await;
    common::seed_ticket(&db, requester.user_id, TicketStatus::InProgress, Some(&team.team_id)).await;
    common::seed_ticket(&db, requester.user_id, TicketStatus::Canceled, Some(&team.team_id)).await;
    // And one unassigned ticket that must show up in the global gauge
    common::seed_ticket(&db, requester.user_id, TicketStatus::Open, None).await;

    let stats = dashboard::helpdesk_stats(&db).await.unwrap();

    let summary = stats
        .teams
        .iter()
        .find(|t| t.team_id == team.team_id)
        .expect("seeded team must appear in the summary");
    assert_eq!(summary.total, 3);
    assert_eq!(summary.active, 2);

    assert!(stats.totals.unassigned >= 1);
    assert!(stats.totals.total >= 4);
}

#[tokio::test]
async fn test_requester_scoped_counts() {
    let db = require_db!();
    let requester = common::seed_user(&db, "scoped").await;
    let bystander = common::seed_user(&db, "bystander").await;

    common::seed_ticket(&db, requester.user_id, TicketStatus::Open, None).await;
    common::seed_ticket(&db, requester.user_id, TicketStatus::Canceled, None).await;
    common::seed_ticket(&db, bystander.user_id, TicketStatus::Open, None).await;

    let stats = dashboard::requester_stats(&db, requester.user_id).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.open, 1);
    assert_eq!(stats.canceled, 1);
}
