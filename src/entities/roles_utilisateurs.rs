use sea_orm::entity::prelude::*;

/// Join table linking users to their roles.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles_utilisateurs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub utilisateur_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub role_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::utilisateurs::Entity",
        from = "Column::UtilisateurId",
        to = "super::utilisateurs::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Utilisateurs,
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::RoleId",
        to = "super::roles::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Roles,
}

impl ActiveModelBehavior for ActiveModel {}
