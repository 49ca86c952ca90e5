use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::{dashboards, prelude::*, taches_production};

pub struct DashboardRepository {
    conn: DatabaseConnection,
}

impl DashboardRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, owner: Option<i32>) -> Result<Vec<dashboards::Model>> {
        let mut query = Dashboards::find();
        if let Some(utilisateur_id) = owner {
            query = query.filter(dashboards::Column::UtilisateurId.eq(utilisateur_id));
        }
        query.all(&self.conn).await.context("Failed to list dashboards")
    }

    pub async fn get(&self, id: i32) -> Result<Option<dashboards::Model>> {
        Dashboards::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query dashboard")
    }

    pub async fn create(&self, utilisateur_id: i32, liste_de_dashboards: &str) -> Result<i32> {
        let active = dashboards::ActiveModel {
            utilisateur_id: Set(utilisateur_id),
            liste_de_dashboards: Set(liste_de_dashboards.to_string()),
            ..Default::default()
        };

        let res = Dashboards::insert(active).exec(&self.conn).await?;
        tracing::info!("Created dashboard {} for user {}", res.last_insert_id, utilisateur_id);
        Ok(res.last_insert_id)
    }

    /// Full replace of all mutable fields. Returns false when the id is absent.
    pub async fn update(
        &self,
        id: i32,
        utilisateur_id: i32,
        liste_de_dashboards: &str,
    ) -> Result<bool> {
        let Some(existing) = Dashboards::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: dashboards::ActiveModel = existing.into();
        active.utilisateur_id = Set(utilisateur_id);
        active.liste_de_dashboards = Set(liste_de_dashboards.to_string());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let res = Dashboards::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }

    /// Production tasks reference dashboards; deletion is restricted
    /// while any remain.
    pub async fn has_tasks(&self, id: i32) -> Result<bool> {
        let count = TachesProduction::find()
            .filter(taches_production::Column::DashboardId.eq(id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }
}
