use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

use crate::{m20250801_000002_create_users_table::Users, m20250801_000003_create_teams_table::Teams};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Closed status set; tokens are canonical uppercase
        manager
            .create_type(
                Type::create()
                    .as_enum(TicketStatus::Table)
                    .values(vec![
                        TicketStatus::Open,
                        TicketStatus::Assigned,
                        TicketStatus::InProgress,
                        TicketStatus::Resolved,
                        TicketStatus::Canceled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(pk_auto(Tickets::TicketId))
                    .col(integer(Tickets::RequesterId))
                    .col(string(Tickets::Subject))
                    .col(text(Tickets::Body))
                    .col(text_null(Tickets::Answer))
                    .col(text_null(Tickets::SuggestedAnswer))
                    .col(string_null(Tickets::Type))
                    .col(string(Tickets::Priority).default("Medium"))
                    .col(string_null(Tickets::AssignedTeamId))
                    .col(string_null(Tickets::SuggestedAssignedTeamId))
                    .col(enumeration(
                        Tickets::Status,
                        TicketStatus::Table,
                        vec![
                            TicketStatus::Open,
                            TicketStatus::Assigned,
                            TicketStatus::InProgress,
                            TicketStatus::Resolved,
                            TicketStatus::Canceled,
                        ],
                    ))
                    .col(
                        timestamp_with_time_zone(Tickets::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_null(Tickets::Tag1))
                    .col(string_null(Tickets::Tag2))
                    .col(string_null(Tickets::Tag3))
                    .col(string_null(Tickets::Tag4))
                    .col(string_null(Tickets::Tag5))
                    .col(string_null(Tickets::Tag6))
                    .col(string_null(Tickets::Tag7))
                    .col(string_null(Tickets::Tag8))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_tickets_requester_id")
                    .from(Tickets::Table, Tickets::RequesterId)
                    .to(Users::Table, Users::UserId)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_tickets_assigned_team_id")
                    .from(Tickets::Table, Tickets::AssignedTeamId)
                    .to(Teams::Table, Teams::TeamId)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        // Indexes for the role-scoped listings and dashboard counts
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_requester_id")
                    .table(Tickets::Table)
                    .col(Tickets::RequesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_assigned_team_id")
                    .table(Tickets::Table)
                    .col(Tickets::AssignedTeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_status")
                    .table(Tickets::Table)
                    .col(Tickets::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TicketStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Tickets {
    Table,
    TicketId,
    RequesterId,
    Subject,
    Body,
    Answer,
    SuggestedAnswer,
    Type,
    Priority,
    AssignedTeamId,
    SuggestedAssignedTeamId,
    Status,
    CreatedAt,
    #[sea_orm(iden = "tag_1")]
    Tag1,
    #[sea_orm(iden = "tag_2")]
    Tag2,
    #[sea_orm(iden = "tag_3")]
    Tag3,
    #[sea_orm(iden = "tag_4")]
    Tag4,
    #[sea_orm(iden = "tag_5")]
    Tag5,
    #[sea_orm(iden = "tag_6")]
    Tag6,
    #[sea_orm(iden = "tag_7")]
    Tag7,
    #[sea_orm(iden = "tag_8")]
    Tag8,
}

#[derive(DeriveIden)]
pub enum TicketStatus {
    #[sea_orm(iden = "ticket_status")]
    Table,
    #[sea_orm(iden = "OPEN")]
    Open,
    #[sea_orm(iden = "ASSIGNED")]
    Assigned,
    #[sea_orm(iden = "INPROGRESS")]
    InProgress,
    #[sea_orm(iden = "RESOLVED")]
    Resolved,
    #[sea_orm(iden = "CANCELED")]
    Canceled,
}
