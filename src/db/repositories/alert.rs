use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{alertes, prelude::*};

pub struct AlertRepository {
    conn: DatabaseConnection,
}

impl AlertRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, owner: Option<i32>) -> Result<Vec<alertes::Model>> {
        let mut query = Alertes::find();
        if let Some(utilisateur_id) = owner {
            query = query.filter(alertes::Column::UtilisateurId.eq(utilisateur_id));
        }
        query.all(&self.conn).await.context("Failed to list alerts")
    }

    pub async fn create(
        &self,
        type_alerte: &str,
        message: &str,
        utilisateur_id: i32,
        date_heure: Option<NaiveDateTime>,
    ) -> Result<i32> {
        let active = alertes::ActiveModel {
            type_alerte: Set(type_alerte.to_string()),
            message: Set(message.to_string()),
            date_heure: Set(date_heure.unwrap_or_else(|| Utc::now().naive_utc())),
            utilisateur_id: Set(utilisateur_id),
            ..Default::default()
        };

        let res = Alertes::insert(active).exec(&self.conn).await?;
        tracing::info!("Created alert {} for user {}", res.last_insert_id, utilisateur_id);
        Ok(res.last_insert_id)
    }

    /// Full replace of the mutable fields (type and message). The
    /// timestamp and owner are fixed at creation.
    pub async fn update(&self, id: i32, type_alerte: &str, message: &str) -> Result<bool> {
        let Some(existing) = Alertes::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: alertes::ActiveModel = existing.into();
        active.type_alerte = Set(type_alerte.to_string());
        active.message = Set(message.to_string());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let res = Alertes::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
