use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entities::{performances_machines, prelude::*};

/// Append-only log of machine performance samples.
pub struct MachineRepository {
    conn: DatabaseConnection,
}

impl MachineRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<performances_machines::Model>> {
        PerformancesMachines::find()
            .all(&self.conn)
            .await
            .context("Failed to list machine performance samples")
    }

    pub async fn append(
        &self,
        machine_id: &str,
        temps_arret: i32,
        temps_fonctionnement: i32,
        date_heure: Option<NaiveDateTime>,
    ) -> Result<i32> {
        let active = performances_machines::ActiveModel {
            machine_id: Set(machine_id.to_string()),
            temps_arret: Set(temps_arret),
            temps_fonctionnement: Set(temps_fonctionnement),
            date_heure: Set(date_heure.unwrap_or_else(|| Utc::now().naive_utc())),
            ..Default::default()
        };

        let res = PerformancesMachines::insert(active).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }
}
