use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::entities::{prelude::*, produits};

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<produits::Model>> {
        Produits::find()
            .all(&self.conn)
            .await
            .context("Failed to list products")
    }

    pub async fn get(&self, id: i32) -> Result<Option<produits::Model>> {
        Produits::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query product")
    }

    pub async fn create(&self, nom: &str, description: &str, tags_rfid: &str) -> Result<i32> {
        let active = produits::ActiveModel {
            nom: Set(nom.to_string()),
            description: Set(description.to_string()),
            tags_rfid: Set(tags_rfid.to_string()),
            ..Default::default()
        };

        let res = Produits::insert(active).exec(&self.conn).await?;
        tracing::info!("Created product {} ({})", nom, res.last_insert_id);
        Ok(res.last_insert_id)
    }

    pub async fn update(
        &self,
        id: i32,
        nom: &str,
        description: &str,
        tags_rfid: &str,
    ) -> Result<bool> {
        let Some(existing) = Produits::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: produits::ActiveModel = existing.into();
        active.nom = Set(nom.to_string());
        active.description = Set(description.to_string());
        active.tags_rfid = Set(tags_rfid.to_string());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let res = Produits::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
