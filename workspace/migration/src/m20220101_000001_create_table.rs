use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Email, 255).unique_key())
                    .col(string(Users::Password))
                    .col(string_len(Users::Name, 255))
                    .col(boolean(Users::IsActive).default(true))
                    .col(boolean(Users::IsStaff).default(false))
                    .col(boolean(Users::IsSuperuser).default(false))
                    .col(date_time(Users::DateJoined))
                    .to_owned(),
            )
            .await?;

        // Create auth_tokens table (one token per user)
        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(string_len(AuthTokens::Key, 64).primary_key())
                    .col(integer(AuthTokens::UserId).unique_key())
                    .col(date_time(AuthTokens::Created))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_tokens_user")
                            .from(AuthTokens::Table, AuthTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create cats table
        manager
            .create_table(
                Table::create()
                    .table(Cats::Table)
                    .if_not_exists()
                    .col(pk_auto(Cats::Id))
                    .col(integer(Cats::UserId))
                    .col(string_len(Cats::Name, 50))
                    .col(text(Cats::Description))
                    .col(double(Cats::Weight))
                    .col(string_len(Cats::Color, 50))
                    .col(boolean(Cats::Dangerous).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cats_user")
                            .from(Cats::Table, Cats::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create abilities table
        manager
            .create_table(
                Table::create()
                    .table(Abilities::Table)
                    .if_not_exists()
                    .col(pk_auto(Abilities::Id))
                    .col(string_len(Abilities::Name, 255))
                    .col(integer(Abilities::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_abilities_user")
                            .from(Abilities::Table, Abilities::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create cats_abilities table (join table)
        manager
            .create_table(
                Table::create()
                    .table(CatsAbilities::Table)
                    .if_not_exists()
                    .col(integer(CatsAbilities::CatId))
                    .col(integer(CatsAbilities::AbilityId))
                    .primary_key(
                        Index::create()
                            .name("pk_cats_abilities")
                            .col(CatsAbilities::CatId)
                            .col(CatsAbilities::AbilityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cats_abilities_cat")
                            .from(CatsAbilities::Table, CatsAbilities::CatId)
                            .to(Cats::Table, Cats::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cats_abilities_ability")
                            .from(CatsAbilities::Table, CatsAbilities::AbilityId)
                            .to(Abilities::Table, Abilities::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for owner-scoped lookups by name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_abilities_user_name")
                    .table(Abilities::Table)
                    .col(Abilities::UserId)
                    .col(Abilities::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to respect foreign key constraints
        manager
            .drop_table(Table::drop().table(CatsAbilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Abilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    Password,
    Name,
    IsActive,
    IsStaff,
    IsSuperuser,
    DateJoined,
}

#[derive(DeriveIden)]
enum AuthTokens {
    Table,
    Key,
    UserId,
    Created,
}

#[derive(DeriveIden)]
pub(crate) enum Cats {
    Table,
    Id,
    UserId,
    Name,
    Description,
    Weight,
    Color,
    Dangerous,
}

#[derive(DeriveIden)]
enum Abilities {
    Table,
    Id,
    Name,
    UserId,
}

#[derive(DeriveIden)]
enum CatsAbilities {
    Table,
    CatId,
    AbilityId,
}
