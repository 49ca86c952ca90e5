use sea_orm::entity::prelude::*;

/// One logical row per date; uniqueness is not enforced by the store.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "statistiques_production")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date: Date,

    pub sous_production: i32,

    pub surproduction: i32,

    pub production_normale: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
