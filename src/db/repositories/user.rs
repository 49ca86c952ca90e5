use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use std::sync::LazyLock;
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::{
    alertes, dashboards, historiques_production, prelude::*, rapports, roles_utilisateurs,
    utilisateurs,
};

/// User data returned from the repository (never the password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub nom: String,
    pub roles: Vec<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_name(&self, nom: &str) -> Result<Option<User>> {
        let user = Utilisateurs::find()
            .filter(utilisateurs::Column::Nom.eq(nom))
            .one(&self.conn)
            .await
            .context("Failed to query user by name")?;

        match user {
            Some(model) => Ok(Some(self.with_roles(model).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = Utilisateurs::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        match user {
            Some(model) => Ok(Some(self.with_roles(model).await?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = Utilisateurs::find()
            .find_with_related(Roles)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows
            .into_iter()
            .map(|(model, roles)| User {
                id: model.id,
                nom: model.nom,
                roles: roles.into_iter().map(|r| r.name).collect(),
            })
            .collect())
    }

    /// Create a user with a freshly hashed password and attach the given roles.
    /// The user row and its role links commit in a single transaction.
    pub async fn create(
        &self,
        nom: &str,
        password: &str,
        role_ids: &[i32],
        config: &SecurityConfig,
    ) -> Result<i32> {
        let password = password.to_string();
        let config = config.clone();
        let hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let txn = self.conn.begin().await?;

        let active = utilisateurs::ActiveModel {
            nom: Set(nom.to_string()),
            mot_de_passe: Set(hash),
            ..Default::default()
        };
        let res = Utilisateurs::insert(active).exec(&txn).await?;
        let user_id = res.last_insert_id;

        for role_id in role_ids {
            let link = roles_utilisateurs::ActiveModel {
                utilisateur_id: Set(user_id),
                role_id: Set(*role_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;
        tracing::info!("Created user {} ({})", nom, user_id);
        Ok(user_id)
    }

    /// Verify a password and return the user id on success.
    ///
    /// An unknown name still runs a dummy Argon2 verification so the
    /// fast path cannot be used to enumerate account names.
    pub async fn verify_password(&self, nom: &str, password: &str) -> Result<Option<i32>> {
        let user = Utilisateurs::find()
            .filter(utilisateurs::Column::Nom.eq(nom))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let (hash, user_id) = match user {
            Some(u) => (Some(u.mot_de_passe), Some(u.id)),
            None => (None, None),
        };

        let password = password.to_string();

        // Argon2 is CPU-intensive; keep it off the async runtime. An
        // unknown name falls back to the precomputed dummy hash inside
        // the closure, so both failure paths cost exactly one
        // verification on the blocking pool.
        let is_valid = task::spawn_blocking(move || {
            let hash = hash.as_deref().unwrap_or_else(|| DUMMY_HASH.as_str());
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(if is_valid { user_id } else { None })
    }

    /// Whether any owned rows still reference this user. Deletion is
    /// restricted while dependents exist.
    pub async fn has_dependents(&self, id: i32) -> Result<bool> {
        let dashboards = Dashboards::find()
            .filter(dashboards::Column::UtilisateurId.eq(id))
            .count(&self.conn)
            .await?;
        if dashboards > 0 {
            return Ok(true);
        }

        let alertes = Alertes::find()
            .filter(alertes::Column::UtilisateurId.eq(id))
            .count(&self.conn)
            .await?;
        if alertes > 0 {
            return Ok(true);
        }

        let rapports = Rapports::find()
            .filter(rapports::Column::UtilisateurId.eq(id))
            .count(&self.conn)
            .await?;
        if rapports > 0 {
            return Ok(true);
        }

        let historiques = HistoriquesProduction::find()
            .filter(historiques_production::Column::UtilisateurId.eq(id))
            .count(&self.conn)
            .await?;
        Ok(historiques > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let res = Utilisateurs::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }

    async fn with_roles(&self, model: utilisateurs::Model) -> Result<User> {
        use sea_orm::ModelTrait;

        let roles = model
            .find_related(Roles)
            .all(&self.conn)
            .await
            .context("Failed to load user roles")?;

        Ok(User {
            id: model.id,
            nom: model.nom,
            roles: roles.into_iter().map(|r| r.name).collect(),
        })
    }
}

/// Hash a password using Argon2id with optional custom params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// A well-formed hash of a throwaway password, verified on the
/// unknown-name path so both failure modes cost the same. Computed
/// once, on first use.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("plantwatch-dummy-password", None).unwrap_or_default());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_fallback_hash_is_static_and_parseable() {
        let first = DUMMY_HASH.as_str();
        assert!(PasswordHash::new(first).is_ok());

        // Subsequent accesses reuse the same allocation rather than
        // re-hashing.
        assert!(std::ptr::eq(first, DUMMY_HASH.as_str()));
    }

    #[test]
    fn dummy_hash_never_verifies_a_real_password() {
        let ok = Argon2::default()
            .verify_password(b"admin", &PasswordHash::new(DUMMY_HASH.as_str()).unwrap())
            .is_ok();
        assert!(!ok);
    }
}
