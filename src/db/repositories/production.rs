use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{historiques_production, prelude::*, taches_production};

/// Repository for production histories and production tasks.
pub struct ProductionRepository {
    conn: DatabaseConnection,
}

impl ProductionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Production histories
    // ========================================================================

    pub async fn list_histories(
        &self,
        owner: Option<i32>,
    ) -> Result<Vec<historiques_production::Model>> {
        let mut query = HistoriquesProduction::find();
        if let Some(utilisateur_id) = owner {
            query = query.filter(historiques_production::Column::UtilisateurId.eq(utilisateur_id));
        }
        query
            .all(&self.conn)
            .await
            .context("Failed to list production histories")
    }

    pub async fn create_history(&self, enregistrements: &str, utilisateur_id: i32) -> Result<i32> {
        let active = historiques_production::ActiveModel {
            enregistrements: Set(enregistrements.to_string()),
            utilisateur_id: Set(utilisateur_id),
            ..Default::default()
        };

        let res = HistoriquesProduction::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update_history(
        &self,
        id: i32,
        enregistrements: &str,
        utilisateur_id: i32,
    ) -> Result<bool> {
        let Some(existing) = HistoriquesProduction::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: historiques_production::ActiveModel = existing.into();
        active.enregistrements = Set(enregistrements.to_string());
        active.utilisateur_id = Set(utilisateur_id);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete_history(&self, id: i32) -> Result<bool> {
        let res = HistoriquesProduction::delete_by_id(id)
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected > 0)
    }

    // ========================================================================
    // Production tasks
    // ========================================================================

    pub async fn list_tasks(&self, dashboard: Option<i32>) -> Result<Vec<taches_production::Model>> {
        let mut query = TachesProduction::find();
        if let Some(dashboard_id) = dashboard {
            query = query.filter(taches_production::Column::DashboardId.eq(dashboard_id));
        }
        query
            .all(&self.conn)
            .await
            .context("Failed to list production tasks")
    }

    pub async fn create_task(
        &self,
        description: &str,
        statut: &str,
        priorite: i32,
        dashboard_id: i32,
    ) -> Result<i32> {
        let active = taches_production::ActiveModel {
            description: Set(description.to_string()),
            statut: Set(statut.to_string()),
            priorite: Set(priorite),
            dashboard_id: Set(dashboard_id),
            ..Default::default()
        };

        let res = TachesProduction::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update_task(
        &self,
        id: i32,
        description: &str,
        statut: &str,
        priorite: i32,
        dashboard_id: i32,
    ) -> Result<bool> {
        let Some(existing) = TachesProduction::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: taches_production::ActiveModel = existing.into();
        active.description = Set(description.to_string());
        active.statut = Set(statut.to_string());
        active.priorite = Set(priorite);
        active.dashboard_id = Set(dashboard_id);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete_task(&self, id: i32) -> Result<bool> {
        let res = TachesProduction::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
