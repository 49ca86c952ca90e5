use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{prelude::*, rapports};

pub struct ReportRepository {
    conn: DatabaseConnection,
}

impl ReportRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, owner: Option<i32>) -> Result<Vec<rapports::Model>> {
        let mut query = Rapports::find();
        if let Some(utilisateur_id) = owner {
            query = query.filter(rapports::Column::UtilisateurId.eq(utilisateur_id));
        }
        query.all(&self.conn).await.context("Failed to list reports")
    }

    pub async fn create(
        &self,
        date_debut: NaiveDateTime,
        date_fin: NaiveDateTime,
        donnees: &str,
        utilisateur_id: i32,
    ) -> Result<i32> {
        let active = rapports::ActiveModel {
            date_debut: Set(date_debut),
            date_fin: Set(date_fin),
            donnees: Set(donnees.to_string()),
            utilisateur_id: Set(utilisateur_id),
            ..Default::default()
        };

        let res = Rapports::insert(active).exec(&self.conn).await?;
        tracing::info!("Created report {} for user {}", res.last_insert_id, utilisateur_id);
        Ok(res.last_insert_id)
    }

    pub async fn update(
        &self,
        id: i32,
        date_debut: NaiveDateTime,
        date_fin: NaiveDateTime,
        donnees: &str,
        utilisateur_id: i32,
    ) -> Result<bool> {
        let Some(existing) = Rapports::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: rapports::ActiveModel = existing.into();
        active.date_debut = Set(date_debut);
        active.date_fin = Set(date_fin);
        active.donnees = Set(donnees.to_string());
        active.utilisateur_id = Set(utilisateur_id);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let res = Rapports::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
