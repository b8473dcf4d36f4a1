use super::{ability, cat};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cats_abilities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cat_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ability_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "cat::Entity",
        from = "Column::CatId",
        to = "cat::Column::Id",
        on_delete = "Cascade"
    )]
    Cat,
    #[sea_orm(
        belongs_to = "ability::Entity",
        from = "Column::AbilityId",
        to = "ability::Column::Id",
        on_delete = "Cascade"
    )]
    Ability,
}

impl Related<cat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cat.def()
    }
}

impl Related<ability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ability.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
