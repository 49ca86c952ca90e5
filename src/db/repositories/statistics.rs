use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::entities::{prelude::*, statistiques_production, tendances_anomalies};

/// Repository for daily production statistics and anomaly trends.
pub struct StatisticsRepository {
    conn: DatabaseConnection,
}

impl StatisticsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Production statistics
    // ========================================================================

    pub async fn list_statistics(&self) -> Result<Vec<statistiques_production::Model>> {
        StatistiquesProduction::find()
            .all(&self.conn)
            .await
            .context("Failed to list production statistics")
    }

    pub async fn create_statistics(
        &self,
        date: NaiveDate,
        sous_production: i32,
        surproduction: i32,
        production_normale: i32,
    ) -> Result<i32> {
        let active = statistiques_production::ActiveModel {
            date: Set(date),
            sous_production: Set(sous_production),
            surproduction: Set(surproduction),
            production_normale: Set(production_normale),
            ..Default::default()
        };

        let res = StatistiquesProduction::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update_statistics(
        &self,
        id: i32,
        date: NaiveDate,
        sous_production: i32,
        surproduction: i32,
        production_normale: i32,
    ) -> Result<bool> {
        let Some(existing) = StatistiquesProduction::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: statistiques_production::ActiveModel = existing.into();
        active.date = Set(date);
        active.sous_production = Set(sous_production);
        active.surproduction = Set(surproduction);
        active.production_normale = Set(production_normale);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete_statistics(&self, id: i32) -> Result<bool> {
        let res = StatistiquesProduction::delete_by_id(id)
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected > 0)
    }

    // ========================================================================
    // Anomaly trends
    // ========================================================================

    pub async fn list_trends(&self) -> Result<Vec<tendances_anomalies::Model>> {
        TendancesAnomalies::find()
            .all(&self.conn)
            .await
            .context("Failed to list anomaly trends")
    }

    pub async fn create_trend(
        &self,
        date: NaiveDate,
        anomalie: &str,
        nombre_occurrences: i32,
    ) -> Result<i32> {
        let active = tendances_anomalies::ActiveModel {
            date: Set(date),
            anomalie: Set(anomalie.to_string()),
            nombre_occurrences: Set(nombre_occurrences),
            ..Default::default()
        };

        let res = TendancesAnomalies::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update_trend(
        &self,
        id: i32,
        date: NaiveDate,
        anomalie: &str,
        nombre_occurrences: i32,
    ) -> Result<bool> {
        let Some(existing) = TendancesAnomalies::find_by_id(id).one(&self.conn).await? else {
            return Ok(false);
        };

        let mut active: tendances_anomalies::ActiveModel = existing.into();
        active.date = Set(date);
        active.anomalie = Set(anomalie.to_string());
        active.nombre_occurrences = Set(nombre_occurrences);
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn delete_trend(&self, id: i32) -> Result<bool> {
        let res = TendancesAnomalies::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
