use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rapports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date_debut: DateTime,

    pub date_fin: DateTime,

    /// Opaque serialized report payload.
    pub donnees: String,

    pub utilisateur_id: i32,
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
}

impl Related<super::utilisateurs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Utilisateurs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
