//! # Common Test Utilities
//!
//! Shared infrastructure for the server integration tests: database setup
//! against `DATABASE_URL` (tests skip gracefully when it is unset) and row
//! fixtures with collision-free identifiers so suites can run concurrently
//! against a shared database.

use std::sync::Once;

use chrono::Utc;
use entity::{team_members, teams, tickets, users, TicketStatus};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DbConn, Set};
use server::identity::{Identity, Role};
use uuid::Uuid;

/// Initialize test logging (run once per test session)
static INIT: Once = Once::new();

/// Initialize test environment including structured logging
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Connect to the test database and bring the schema up to date.
///
/// Returns `None` when `DATABASE_URL` is not set so callers can skip.
pub async fn setup() -> Option<DbConn> {
    init_test_env();

    let database_url = std::env::var("DATABASE_URL").ok()?;
    let conn = Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    migration::Migrator::up(&conn, None)
        .await
        .expect("Failed to run migrations");

    Some(conn)
}

/// A unique identifier with a readable prefix, safe for shared databases.
pub fn unique(prefix: &str) -> String { format!("{}_{}", prefix, Uuid::new_v4().simple()) }

/// Insert a user and return the row.
pub async fn seed_user(db: &DbConn, name: &str) -> users::Model {
    users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@test.local", unique(name))),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed user")
}

/// Insert a team with a unique code and return the row.
pub async fn seed_team(db: &DbConn, prefix: &str) -> teams::Model {
    let team_id = unique(prefix).to_uppercase();
    teams::ActiveModel {
        team_id:            Set(team_id.clone()),
        team_name:          Set(format!("{} team", prefix)),
        team_description:   Set(Some("test team".to_string())),
        team_email_address: Set(Some(format!("{}@test.local", team_id.to_lowercase()))),
    }
    .insert(db)
    .await
    .expect("Failed to seed team")
}

/// Link a user to a team.
pub async fn seed_membership(db: &DbConn, team_id: &str, user_id: i32) -> team_members::Model {
    team_members::ActiveModel {
        team_id: Set(team_id.to_string()),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed membership")
}

/// Insert a ticket in the given state and return the row.
pub async fn seed_ticket(
    db: &DbConn,
    requester_id: i32,
    status: TicketStatus,
    assigned_team_id: Option<&str>,
) -> tickets::Model {
    tickets::ActiveModel {
        requester_id: Set(requester_id),
        subject: Set("Printer broken".to_string()),
        body: Set("won't turn on".to_string()),
        kind: Set(Some("request".to_string())),
        priority: Set("Medium".to_string()),
        status: Set(status),
        assigned_team_id: Set(assigned_team_id.map(|t| t.to_string())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed ticket")
}

/// An identity fixture for a requester.
pub fn requester_identity(user: &users::Model) -> Identity {
    Identity {
        user_id: user.user_id,
        name:    user.name.clone(),
        email:   user.email.clone(),
        role:    Role::Requester,
        team_id: None,
    }
}

/// An identity fixture for a support agent of the given team.
pub fn support_identity(user: &users::Model, team_id: &str) -> Identity {
    Identity {
        user_id: user.user_id,
        name:    user.name.clone(),
        email:   user.email.clone(),
        role:    Role::Support,
        team_id: Some(team_id.to_string()),
    }
}

/// An identity fixture for a help-desk triager.
pub fn helpdesk_identity(user: &users::Model) -> Identity {
    Identity {
        user_id: user.user_id,
        name:    user.name.clone(),
        email:   user.email.clone(),
        role:    Role::HelpDesk,
        team_id: None,
    }
}
