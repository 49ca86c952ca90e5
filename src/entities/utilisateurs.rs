use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "utilisateurs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub nom: String,

    /// Argon2id password hash
    pub mot_de_passe: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dashboards::Entity")]
    Dashboards,
    #[sea_orm(has_many = "super::alertes::Entity")]
    Alertes,
    #[sea_orm(has_many = "super::rapports::Entity")]
    Rapports,
    #[sea_orm(has_many = "super::historiques_production::Entity")]
    HistoriquesProduction,
}

impl Related<super::dashboards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dashboards.def()
    }
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        super::roles_utilisateurs::Relation::Roles.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::roles_utilisateurs::Relation::Utilisateurs
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
