use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create people table
        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(People::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(People::FullName).string().null())
                    .col(ColumnDef::new(People::Gender).string().null())
                    .col(ColumnDef::new(People::Height).integer().null())
                    .col(ColumnDef::new(People::Weight).integer().null())
                    .to_owned(),
            )
            .await?;

        // Create sports table
        manager
            .create_table(
                Table::create()
                    .table(Sports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sports::SportName).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create events table
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::SportId).integer().null())
                    .col(ColumnDef::new(Events::EventName).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_sport_id")
                            .from(Events::Table, Events::SportId)
                            .to(Sports::Table, Sports::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create games table
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::GamesName).string().not_null())
                    .col(ColumnDef::new(Games::Season).string().null())
                    .col(ColumnDef::new(Games::Year).integer().null())
                    .to_owned(),
            )
            .await?;

        // Create games_competitors table
        manager
            .create_table(
                Table::create()
                    .table(GamesCompetitors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamesCompetitors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GamesCompetitors::PersonId).integer().not_null())
                    .col(ColumnDef::new(GamesCompetitors::GamesId).integer().not_null())
                    .col(ColumnDef::new(GamesCompetitors::Age).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_competitors_person_id")
                            .from(GamesCompetitors::Table, GamesCompetitors::PersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_competitors_games_id")
                            .from(GamesCompetitors::Table, GamesCompetitors::GamesId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_games_competitors_person_games")
                            .col(GamesCompetitors::PersonId)
                            .col(GamesCompetitors::GamesId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create medals table
        manager
            .create_table(
                Table::create()
                    .table(Medals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Medals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Medals::MedalName).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create competitor_events table
        manager
            .create_table(
                Table::create()
                    .table(CompetitorEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompetitorEvents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompetitorEvents::CompetitorId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CompetitorEvents::EventId).integer().null())
                    .col(ColumnDef::new(CompetitorEvents::MedalId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_competitor_events_competitor_id")
                            .from(CompetitorEvents::Table, CompetitorEvents::CompetitorId)
                            .to(GamesCompetitors::Table, GamesCompetitors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_competitor_events_event_id")
                            .from(CompetitorEvents::Table, CompetitorEvents::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_competitor_events_medal_id")
                            .from(CompetitorEvents::Table, CompetitorEvents::MedalId)
                            .to(Medals::Table, Medals::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .index(
                        Index::create()
                            .name("idx_competitor_events_competitor_id")
                            .col(CompetitorEvents::CompetitorId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompetitorEvents::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Medals::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GamesCompetitors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sports::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum People {
    Table,
    Id,
    FullName,
    Gender,
    Height,
    Weight,
}

#[derive(DeriveIden)]
enum Sports {
    Table,
    Id,
    SportName,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    SportId,
    EventName,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    GamesName,
    Season,
    Year,
}

#[derive(DeriveIden)]
enum GamesCompetitors {
    Table,
    Id,
    PersonId,
    GamesId,
    Age,
}

#[derive(DeriveIden)]
enum Medals {
    Table,
    Id,
    MedalName,
}

#[derive(DeriveIden)]
enum CompetitorEvents {
    Table,
    Id,
    CompetitorId,
    EventId,
    MedalId,
}
