use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    // String code such as NETWORK or IT_HELP_DESK
                    .col(string(Teams::TeamId).primary_key())
                    .col(string(Teams::TeamName))
                    .col(string_null(Teams::TeamDescription))
                    .col(string_null(Teams::TeamEmailAddress))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Teams {
    Table,
    TeamId,
    TeamName,
    TeamDescription,
    TeamEmailAddress,
}
