use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "dashboards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub utilisateur_id: i32,

    /// Opaque serialized layout blob owned by the frontend.
    pub liste_de_dashboards: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::utilisateurs::Entity",
        from = "Column::UtilisateurId",
        to = "super::utilisateurs::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Utilisateurs,
    #[sea_orm(has_many = "super::taches_production::Entity")]
    TachesProduction,
}

impl Related<super::utilisateurs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Utilisateurs.def()
    }
}

impl Related<super::taches_production::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TachesProduction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
