use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250801_000005_create_tickets_table::Tickets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketEmbeddings::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketEmbeddings::Id))
                    .col(integer(TicketEmbeddings::TicketId))
                    .col(text(TicketEmbeddings::ChunkText))
                    .to_owned(),
            )
            .await?;

        // The vector column is owned by the external similarity service;
        // sea-query has no vector type, so it is added raw.
        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE ticket_embeddings ADD COLUMN IF NOT EXISTS embedding vector(1536)")
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_ticket_embeddings_ticket_id")
                    .from(TicketEmbeddings::Table, TicketEmbeddings::TicketId)
                    .to(Tickets::Table, Tickets::TicketId)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ticket_embeddings_ticket_id")
                    .table(TicketEmbeddings::Table)
                    .col(TicketEmbeddings::TicketId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketEmbeddings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TicketEmbeddings {
    Table,
    Id,
    TicketId,
    ChunkText,
}
