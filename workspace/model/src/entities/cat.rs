use super::{ability, fighting_style, user};
use sea_orm::entity::prelude::*;

/// A cat owned by a single user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The user who owns this cat. Never changes after creation.
    pub user_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub weight: f64,
    pub color: String,
    #[sea_orm(default_value = "true")]
    pub dangerous: bool,
    /// Path of the uploaded image, relative to the media root.
    pub image: Option<String>,
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
    #[sea_orm(has_many = "super::cat_fighting_style::Entity")]
    CatFightingStyle,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<ability::Entity> for Entity {
    fn to() -> RelationDef {
        super::cat_ability::Relation::Ability.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cat_ability::Relation::Cat.def().rev())
    }
}

impl Related<fighting_style::Entity> for Entity {
    fn to() -> RelationDef {
        super::cat_fighting_style::Relation::FightingStyle.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::cat_fighting_style::Relation::Cat.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
