use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250801_000002_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserSessions::Table)
                    .if_not_exists()
                    // The UUID itself is the opaque bearer token
                    .col(uuid(UserSessions::Id).primary_key())
                    .col(integer(UserSessions::UserId))
                    .col(string(UserSessions::UserName))
                    .col(string(UserSessions::UserEmail))
                    .col(string(UserSessions::Role))
                    .col(string_null(UserSessions::TeamId))
                    .col(
                        timestamp_with_time_zone(UserSessions::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(UserSessions::LastUsedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_user_sessions_user_id")
                    .from(UserSessions::Table, UserSessions::UserId)
                    .to(Users::Table, Users::UserId)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_sessions_user_id")
                    .table(UserSessions::Table)
                    .col(UserSessions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSessions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserSessions {
    Table,
    Id,
    UserId,
    UserName,
    UserEmail,
    Role,
    TeamId,
    CreatedAt,
    LastUsedAt,
}
