use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "produits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nom: String,

    pub description: String,

    /// Serialized list of RFID tags attached to the product.
    pub tags_rfid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
