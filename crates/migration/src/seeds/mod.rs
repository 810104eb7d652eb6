//! # Seed Data Management
//!
//! Seeds the database with demo reference data: the help-desk team, a few
//! support teams, and users covering every derived role. Seeds are
//! idempotent — a provider that finds existing rows reports zero inserts
//! and changes nothing.

use std::time::Instant;

use ::error::{AppError, SeedResult};
use entity::{team_members, teams, users, Teams, Users};
use sea_orm::{ActiveModelTrait, DbConn, EntityTrait, PaginatorTrait, Set};

/// Trait for seed data providers
#[async_trait::async_trait]
pub trait SeedProvider {
    /// The name of this seed
    fn name(&self) -> &str;

    /// Runs the seed operation
    ///
    /// # Errors
    ///
    /// Returns an error if the seed operation fails.
    async fn run(&self, db: &DbConn) -> Result<SeedResult, AppError>;
}

/// Seeds the team directory, including the triage team.
pub struct TeamsSeed;

const DEFAULT_TEAMS: &[(&str, &str, &str, &str)] = &[
    (
        "IT_HELP_DESK",
        "IT Help Desk",
        "Front line triage: routes incoming tickets to the right team",
        "helpdesk@deskline.local",
    ),
    (
        "NETWORK",
        "Network",
        "Switches, routers, VPN and connectivity issues",
        "network@deskline.local",
    ),
    (
        "DESKTOP_SUPPORT",
        "Desktop Support",
        "Workstations, printers and peripherals",
        "desktop@deskline.local",
    ),
    (
        "SOFTWARE",
        "Software",
        "Business application support and licensing",
        "software@deskline.local",
    ),
];

#[async_trait::async_trait]
impl SeedProvider for TeamsSeed {
    fn name(&self) -> &str { "teams" }

    async fn run(&self, db: &DbConn) -> Result<SeedResult, AppError> {
        let started = Instant::now();

        let existing = Teams::find().count(db).await?;
        if existing > 0 {
            return Ok(SeedResult::success(self.name(), 0, started.elapsed().as_millis() as u64));
        }

        let mut inserted = 0;
        for (team_id, name, description, email) in DEFAULT_TEAMS {
            let team = teams::ActiveModel {
                team_id:            Set((*team_id).to_string()),
                team_name:          Set((*name).to_string()),
                team_description:   Set(Some((*description).to_string())),
                team_email_address: Set(Some((*email).to_string())),
            };
            team.insert(db)
                .await
                .map_err(|e| AppError::database(format!("Failed to seed team {}: {}", team_id, e)))?;
            inserted += 1;
        }

        tracing::info!(inserted, "Seeded teams");
        Ok(SeedResult::success(self.name(), inserted, started.elapsed().as_millis() as u64))
    }
}

/// Seeds demo users and team memberships covering all three derived roles:
/// a help-desk triager, one support agent per team, and two requesters
/// with no membership at all.
pub struct UsersSeed;

const DEFAULT_USERS: &[(&str, &str, Option<&str>)] = &[
    ("Harriet Vane", "harriet.vane@deskline.local", Some("IT_HELP_DESK")),
    ("Nina Okafor", "nina.okafor@deskline.local", Some("NETWORK")),
    ("Dario Fo", "dario.fo@deskline.local", Some("DESKTOP_SUPPORT")),
    ("Sam Whittle", "sam.whittle@deskline.local", Some("SOFTWARE")),
    ("Priya Raman", "priya.raman@deskline.local", None),
    ("Oleg Antonov", "oleg.antonov@deskline.local", None),
];

#[async_trait::async_trait]
impl SeedProvider for UsersSeed {
    fn name(&self) -> &str { "users" }

    async fn run(&self, db: &DbConn) -> Result<SeedResult, AppError> {
        let started = Instant::now();

        let existing = Users::find().count(db).await?;
        if existing > 0 {
            return Ok(SeedResult::success(self.name(), 0, started.elapsed().as_millis() as u64));
        }

        let mut inserted = 0;
        for (name, email, membership) in DEFAULT_USERS {
            let user = users::ActiveModel {
                name: Set((*name).to_string()),
                email: Set((*email).to_string()),
                ..Default::default()
            };
            let user = user
                .insert(db)
                .await
                .map_err(|e| AppError::database(format!("Failed to seed user {}: {}", email, e)))?;
            inserted += 1;

            if let Some(team_id) = membership {
                let member = team_members::ActiveModel {
                    team_id: Set((*team_id).to_string()),
                    user_id: Set(user.user_id),
                    ..Default::default()
                };
                member
                    .insert(db)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to seed membership for {}: {}", email, e)))?;
                inserted += 1;
            }
        }

        tracing::info!(inserted, "Seeded users and memberships");
        Ok(SeedResult::success(self.name(), inserted, started.elapsed().as_millis() as u64))
    }
}

/// Runs all registered seed providers
///
/// # Arguments
///
/// * `db` - The database connection
/// * `verbose` - Whether to log per-seed results
///
/// # Errors
///
/// Returns an error if any seed operation fails.
pub async fn run_all_seeds(db: &DbConn, verbose: bool) -> Result<Vec<SeedResult>, AppError> {
    let providers: Vec<Box<dyn SeedProvider + Send + Sync>> = vec![Box::new(TeamsSeed), Box::new(UsersSeed)];

    let mut results = Vec::new();
    for provider in providers {
        let result = provider.run(db).await?;
        if verbose {
            tracing::info!(
                seed = %result.seed_name,
                inserted = result.inserted_count,
                duration_ms = result.duration_ms,
                "Seed completed"
            );
        }
        results.push(result);
    }

    Ok(results)
}
