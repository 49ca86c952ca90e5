use sea_orm::entity::prelude::*;

/// Append-only machine performance samples pushed by external collectors.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "performances_machines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub machine_id: String,

    /// Downtime in seconds over the sample window.
    pub temps_arret: i32,

    /// Uptime in seconds over the sample window.
    pub temps_fonctionnement: i32,

    pub date_heure: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
