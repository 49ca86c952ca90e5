use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::utilisateurs::Entity> for Entity {
    fn to() -> RelationDef {
        super::roles_utilisateurs::Relation::Utilisateurs.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::roles_utilisateurs::Relation::Roles.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
