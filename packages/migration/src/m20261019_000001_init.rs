use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    CreatedAt,
    NextExpiration,
    CompletedAt,
}

#[derive(Iden)]
enum Turns {
    Table,
    Id,
    GameId,
    AccountId,
    IsComplete,
    IsDrawing,
    Drawing,
    Label,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::NextExpiration)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // turns
        manager
            .create_table(
                Table::create()
                    .table(Turns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Turns::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Turns::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Turns::AccountId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Turns::IsComplete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Turns::IsDrawing).boolean().not_null())
                    .col(ColumnDef::new(Turns::Drawing).text().null())
                    .col(ColumnDef::new(Turns::Label).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_game_id")
                            .from(Turns::Table, Turns::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Current-turn lookup: MIN(id) over incomplete turns of one game.
        manager
            .create_index(
                Index::create()
                    .name("ix_turns_game_complete_id")
                    .table(Turns::Table)
                    .col(Turns::GameId)
                    .col(Turns::IsComplete)
                    .col(Turns::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_turns_account_id")
                    .table(Turns::Table)
                    .col(Turns::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ix_turns_account_id")
                    .table(Turns::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_turns_game_complete_id")
                    .table(Turns::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Turns::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}
