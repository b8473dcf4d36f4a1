use sea_orm_migration::{prelude::*, schema::*};

use crate::m20220101_000001_create_table::Cats;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Shared fighting styles; the name holds one of the fixed codes
        manager
            .create_table(
                Table::create()
                    .table(FightingStyles::Table)
                    .if_not_exists()
                    .col(pk_auto(FightingStyles::Id))
                    .col(string_len(FightingStyles::Name, 50))
                    .col(boolean(FightingStyles::GroundAllowed).default(false))
                    .to_owned(),
            )
            .await?;

        // Create cats_fighting_styles table (join table)
        manager
            .create_table(
                Table::create()
                    .table(CatsFightingStyles::Table)
                    .if_not_exists()
                    .col(integer(CatsFightingStyles::CatId))
                    .col(integer(CatsFightingStyles::FightingStyleId))
                    .primary_key(
                        Index::create()
                            .name("pk_cats_fighting_styles")
                            .col(CatsFightingStyles::CatId)
                            .col(CatsFightingStyles::FightingStyleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cats_fighting_styles_cat")
                            .from(CatsFightingStyles::Table, CatsFightingStyles::CatId)
                            .to(Cats::Table, Cats::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cats_fighting_styles_fighting_style")
                            .from(CatsFightingStyles::Table, CatsFightingStyles::FightingStyleId)
                            .to(FightingStyles::Table, FightingStyles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatsFightingStyles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FightingStyles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum FightingStyles {
    Table,
    Id,
    Name,
    GroundAllowed,
}

#[derive(DeriveIden)]
enum CatsFightingStyles {
    Table,
    CatId,
    FightingStyleId,
}
