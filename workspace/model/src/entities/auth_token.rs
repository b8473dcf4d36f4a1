use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{NaiveDateTime, Utc};
use rand_core::{OsRng, RngCore};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use tracing::{debug, instrument};

/// API token used to authenticate requests. Each user has at most one.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub created: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Generate a new random token key.
pub fn generate_key() -> String {
    let mut buf = [0u8; 30];
    OsRng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// Return the user's token, creating one if it does not exist yet.
#[instrument(skip(db))]
pub async fn get_or_create_for_user<C>(db: &C, user_id: i32) -> Result<Model, DbErr>
where
    C: ConnectionTrait,
{
    if let Some(token) = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(token);
    }

    debug!("Issuing new token for user {}", user_id);
    ActiveModel {
        key: Set(generate_key()),
        user_id: Set(user_id),
        created: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_is_url_safe_and_unique() {
        let first = generate_key();
        let second = generate_key();

        assert_eq!(first.len(), 40);
        assert_ne!(first, second);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
