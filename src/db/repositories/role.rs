use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::{prelude::*, roles};

pub struct RoleRepository {
    conn: DatabaseConnection,
}

impl RoleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<roles::Model>> {
        Roles::find()
            .all(&self.conn)
            .await
            .context("Failed to list roles")
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<i32> {
        let active = roles::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.map(|s| s.to_string())),
            ..Default::default()
        };

        let res = Roles::insert(active).exec(&self.conn).await?;
        tracing::info!("Created role {}", name);
        Ok(res.last_insert_id)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<roles::Model>> {
        Roles::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query role by name")
    }
}
