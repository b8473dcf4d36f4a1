use super::{cat, fighting_style};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cats_fighting_styles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cat_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub fighting_style_id: i32,
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
        belongs_to = "fighting_style::Entity",
        from = "Column::FightingStyleId",
        to = "fighting_style::Column::Id",
        on_delete = "Cascade"
    )]
    FightingStyle,
}

impl Related<cat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cat.def()
    }
}

impl Related<fighting_style::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FightingStyle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
