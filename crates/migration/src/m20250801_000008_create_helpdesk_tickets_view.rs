//! Migration: Create the helpdesk_tickets view
//!
//! A denormalized, read-only projection of tickets joined with requester
//! and team names. The help-desk queue listing reads it directly; the
//! status enum is cast to text so the view stays decoupled from the enum
//! type.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE VIEW helpdesk_tickets AS
                SELECT t.ticket_id,
                       t.subject       AS title,
                       u.name          AS "user",
                       t.status::text  AS status,
                       t.priority      AS priority,
                       tm.team_name    AS assigned_to,
                       t.created_at    AS created_at,
                       t.body          AS description,
                       t.answer        AS answer
                FROM tickets t
                JOIN users u ON u.user_id = t.requester_id
                LEFT JOIN teams tm ON tm.team_id = t.assigned_team_id
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP VIEW IF EXISTS helpdesk_tickets")
            .await?;

        Ok(())
    }
}
