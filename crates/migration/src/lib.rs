//! # Database Migrations
//!
//! Sea-ORM migrations for the Deskline schema. Migrations are executed in
//! the order they appear in [`Migrator::migrations`]; the migrator tracks
//! applied migrations in the database.

pub use sea_orm_migration::prelude::*;

pub mod seeds;

mod m20250801_000001_enable_pgvector;
mod m20250801_000002_create_users_table;
mod m20250801_000003_create_teams_table;
mod m20250801_000004_create_team_members_table;
mod m20250801_000005_create_tickets_table;
mod m20250801_000006_create_ticket_embeddings_table;
mod m20250801_000007_create_user_sessions_table;
mod m20250801_000008_create_helpdesk_tickets_view;

/// The main migrator that coordinates all migration operations
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// Add new migrations to this list as they are created.
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_enable_pgvector::Migration),
            Box::new(m20250801_000002_create_users_table::Migration),
            Box::new(m20250801_000003_create_teams_table::Migration),
            Box::new(m20250801_000004_create_team_members_table::Migration),
            Box::new(m20250801_000005_create_tickets_table::Migration),
            Box::new(m20250801_000006_create_ticket_embeddings_table::Migration),
            Box::new(m20250801_000007_create_user_sessions_table::Migration),
            Box::new(m20250801_000008_create_helpdesk_tickets_view::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_registered_in_order() {
        let migrations = Migrator::migrations();
        assert_eq!(migrations.len(), 8);
    }
}
