pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_table;
mod m20240512_000001_add_fighting_styles;
mod m20240520_000001_add_cat_image;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_create_table::Migration),
            Box::new(m20240512_000001_add_fighting_styles::Migration),
            Box::new(m20240520_000001_add_cat_image::Migration),
        ]
    }
}
