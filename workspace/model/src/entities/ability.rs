use super::{cat, user};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use tracing::{debug, instrument, trace};

/// An ability a cat can have. Abilities belong to the user who created them,
/// so two users may each own an ability with the same name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "abilities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub user_id: i32,
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
    #[sea_orm(has_many = "super::cat_ability::Entity")]
    CatAbility,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<cat::Entity> for Entity {
    fn to() -> RelationDef {
        super::cat_ability::Relation::Cat.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cat_ability::Relation::Ability.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Return the owner's ability with this name, creating it when missing.
///
/// The lookup and the insert are two statements, so two concurrent callers
/// can both create a row for the same owner and name.
#[instrument(skip(db))]
pub async fn get_or_create<C>(db: &C, user_id: i32, name: &str) -> Result<Model, DbErr>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Name.eq(name))
        .one(db)
        .await?
    {
        trace!("Reusing ability {} for user {}", existing.id, user_id);
        return Ok(existing);
    }

    debug!("Creating ability '{}' for user {}", name, user_id);
    ActiveModel {
        name: Set(name.to_string()),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
}
