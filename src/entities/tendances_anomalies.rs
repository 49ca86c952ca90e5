use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tendances_anomalies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date: Date,

    pub anomalie: String,

    pub nombre_occurrences: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
