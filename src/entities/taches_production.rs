use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "taches_production")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub description: String,

    /// Free-form label, no state machine is enforced.
    pub statut: String,

    pub priorite: i32,

    pub dashboard_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dashboards::Entity",
        from = "Column::DashboardId",
        to = "super::dashboards::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Dashboards,
}

impl Related<super::dashboards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dashboards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
