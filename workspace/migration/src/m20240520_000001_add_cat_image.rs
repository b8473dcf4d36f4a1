use sea_orm_migration::prelude::*;

use crate::m20220101_000001_create_table::Cats;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Relative path of the uploaded image under the media root
        manager
            .alter_table(
                Table::alter()
                    .table(Cats::Table)
                    .add_column(ColumnDef::new(Alias::new("image")).string_len(255).null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Cats::Table)
                    .drop_column(Alias::new("image"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
