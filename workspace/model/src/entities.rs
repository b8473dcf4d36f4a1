//! Root for all SeaORM entity modules of the cat API.
//! Cats and abilities are owned by a user; fighting styles are shared.
//! Many-to-many associations go through explicit join entities.

pub mod ability;
pub mod auth_token;
pub mod cat;
pub mod cat_ability;
pub mod cat_fighting_style;
pub mod fighting_style;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::ability::Entity as Ability;
    pub use super::auth_token::Entity as AuthToken;
    pub use super::cat::Entity as Cat;
    pub use super::cat_ability::Entity as CatAbility;
    pub use super::cat_fighting_style::Entity as CatFightingStyle;
    pub use super::fighting_style::Entity as FightingStyle;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
    };

    use super::*;
    use fighting_style::FightingStyleCode;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    async fn create_cat(db: &DatabaseConnection, user_id: i32, name: &str) -> cat::Model {
        cat::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            description: Set("sample description".to_string()),
            weight: Set(5.0),
            color: Set("black".to_string()),
            dangerous: Set(true),
            image: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create cat")
    }

    #[tokio::test]
    async fn test_create_user_with_email_successful() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let user = user::create_user(&db, "test@example.com", Some("test123"), "")
            .await
            .expect("Failed to create user");

        assert_eq!(user.email, "test@example.com");
        assert!(user.check_password("test123"));
        assert!(user.is_active);
        assert!(!user.is_staff);
        Ok(())
    }

    #[tokio::test]
    async fn test_new_user_normalized_email() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let samples = [
            ("test1@ExAmPle.cOm", "test1@example.com"),
            ("Test2@exaMPLe.cOM", "Test2@example.com"),
            ("TEST3@EXAMpLE.COM", "TEST3@example.com"),
        ];
        for (email, expected) in samples {
            let user = user::create_user(&db, email, Some("pass123"), "")
                .await
                .expect("Failed to create user");
            assert_eq!(user.email, expected);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_new_user_without_email_fails() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let result = user::create_user(&db, "", Some("pass123"), "").await;

        assert!(matches!(result, Err(user::UserError::MissingEmail)));
        assert_eq!(User::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_superuser() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let user = user::create_superuser(&db, "test@example.com", "pass123")
            .await
            .expect("Failed to create superuser");

        assert!(user.is_superuser);
        assert!(user.is_staff);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_cat_displays_name() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let owner = user::create_user(&db, "test@example.com", Some("test123"), "")
            .await
            .expect("Failed to create user");

        let cat = create_cat(&db, owner.id, "sample cats name").await;

        assert_eq!(cat.to_string(), cat.name);
        assert!(cat.dangerous);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_ability_displays_name() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let owner = user::create_user(&db, "user@example.com", Some("pass123"), "")
            .await
            .expect("Failed to create user");

        let ability = ability::ActiveModel {
            user_id: Set(owner.id),
            name: Set("Invisible".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assert_eq!(ability.to_string(), ability.name);
        Ok(())
    }

    #[tokio::test]
    async fn test_ability_get_or_create_is_scoped_per_owner() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let first = user::create_user(&db, "first@example.com", Some("pass123"), "")
            .await
            .expect("Failed to create user");
        let second = user::create_user(&db, "second@example.com", Some("pass123"), "")
            .await
            .expect("Failed to create user");

        let fly = ability::get_or_create(&db, first.id, "Fly").await?;
        let fly_again = ability::get_or_create(&db, first.id, "Fly").await?;
        let other_fly = ability::get_or_create(&db, second.id, "Fly").await?;

        assert_eq!(fly.id, fly_again.id);
        assert_ne!(fly.id, other_fly.id);
        assert_eq!(other_fly.user_id, second.id);
        assert_eq!(Ability::find().count(&db).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_fighting_style_get_or_create_is_global() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let bjj = fighting_style::get_or_create(&db, FightingStyleCode::BrazilianJiuJitsu, Some(true)).await?;
        let any_bjj = fighting_style::get_or_create(&db, FightingStyleCode::BrazilianJiuJitsu, None).await?;
        let no_ground = fighting_style::get_or_create(&db, FightingStyleCode::BrazilianJiuJitsu, Some(false)).await?;

        assert_eq!(bjj.id, any_bjj.id);
        assert_ne!(bjj.id, no_ground.id);
        assert!(bjj.ground_allowed);
        assert!(!no_ground.ground_allowed);
        Ok(())
    }

    #[tokio::test]
    async fn test_fighting_style_save_rejects_unknown_code() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let result = fighting_style::ActiveModel {
            name: Set("KARATE".to_string()),
            ground_allowed: Set(false),
            ..Default::default()
        }
        .insert(&db)
        .await;

        assert!(matches!(result, Err(DbErr::Custom(_))));
        assert_eq!(FightingStyle::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_fighting_style_update_rejects_unknown_code() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let style = fighting_style::get_or_create(&db, FightingStyleCode::Wrestling, Some(true)).await?;

        let mut active: fighting_style::ActiveModel = style.clone().into();
        active.name = Set("SUMO".to_string());
        let result = active.update(&db).await;

        assert!(matches!(result, Err(DbErr::Custom(_))));
        let stored = FightingStyle::find_by_id(style.id).one(&db).await?.unwrap();
        assert_eq!(stored.name, "WR");
        Ok(())
    }

    #[tokio::test]
    async fn test_cat_relations_and_cascades() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let owner = user::create_user(&db, "owner@example.com", Some("pass123"), "")
            .await
            .expect("Failed to create user");

        let cat = create_cat(&db, owner.id, "Shinki").await;
        let ability = ability::get_or_create(&db, owner.id, "Fly").await?;
        let style = fighting_style::get_or_create(&db, FightingStyleCode::MuayThai, None).await?;

        cat_ability::ActiveModel {
            cat_id: Set(cat.id),
            ability_id: Set(ability.id),
        }
        .insert(&db)
        .await?;
        cat_fighting_style::ActiveModel {
            cat_id: Set(cat.id),
            fighting_style_id: Set(style.id),
        }
        .insert(&db)
        .await?;

        let abilities = cat.find_related(Ability).all(&db).await?;
        let styles = cat.find_related(FightingStyle).all(&db).await?;
        assert_eq!(abilities, vec![ability.clone()]);
        assert_eq!(styles, vec![style.clone()]);

        // Deleting the cat removes the association rows, not the related rows
        cat.delete(&db).await?;
        assert_eq!(CatAbility::find().count(&db).await?, 0);
        assert_eq!(CatFightingStyle::find().count(&db).await?, 0);
        assert!(Ability::find_by_id(ability.id).one(&db).await?.is_some());
        assert!(FightingStyle::find_by_id(style.id).one(&db).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_owned_rows() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let owner = user::create_user(&db, "owner@example.com", Some("pass123"), "")
            .await
            .expect("Failed to create user");
        create_cat(&db, owner.id, "Uchiha Cat").await;
        ability::get_or_create(&db, owner.id, "Red eyes").await?;
        auth_token::get_or_create_for_user(&db, owner.id).await?;

        User::delete_by_id(owner.id).exec(&db).await?;

        assert_eq!(Cat::find().filter(cat::Column::UserId.eq(owner.id)).count(&db).await?, 0);
        assert_eq!(Ability::find().count(&db).await?, 0);
        assert_eq!(AuthToken::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_token_is_reused_per_user() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let owner = user::create_user(&db, "owner@example.com", Some("pass123"), "")
            .await
            .expect("Failed to create user");

        let first = auth_token::get_or_create_for_user(&db, owner.id).await?;
        let second = auth_token::get_or_create_for_user(&db, owner.id).await?;

        assert_eq!(first.key, second.key);
        Ok(())
    }
}
