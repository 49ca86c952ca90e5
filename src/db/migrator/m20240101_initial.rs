use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Hash the default admin password using Argon2id
fn hash_default_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let password = b"admin";
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash default password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Utilisateurs)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Roles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(RolesUtilisateurs)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Dashboards)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Alertes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Rapports)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(HistoriquesProduction)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(TachesProduction)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Produits)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(PerformancesMachines)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(StatistiquesProduction)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(TendancesAnomalies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed the admin account so a fresh install can log in.
        let password_hash = hash_default_password();

        let insert_user = sea_orm_migration::sea_query::Query::insert()
            .into_table(Utilisateurs)
            .columns([
                crate::entities::utilisateurs::Column::Id,
                crate::entities::utilisateurs::Column::Nom,
                crate::entities::utilisateurs::Column::MotDePasse,
            ])
            .values_panic([1.into(), "admin".into(), password_hash.into()])
            .to_owned();
        manager.exec_stmt(insert_user).await?;

        let insert_role = sea_orm_migration::sea_query::Query::insert()
            .into_table(Roles)
            .columns([
                crate::entities::roles::Column::Id,
                crate::entities::roles::Column::Name,
                crate::entities::roles::Column::Description,
            ])
            .values_panic([1.into(), "admin".into(), "Administrator".into()])
            .to_owned();
        manager.exec_stmt(insert_role).await?;

        let insert_link = sea_orm_migration::sea_query::Query::insert()
            .into_table(RolesUtilisateurs)
            .columns([
                crate::entities::roles_utilisateurs::Column::UtilisateurId,
                crate::entities::roles_utilisateurs::Column::RoleId,
            ])
            .values_panic([1.into(), 1.into()])
            .to_owned();
        manager.exec_stmt(insert_link).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TendancesAnomalies).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StatistiquesProduction).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PerformancesMachines).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Produits).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TachesProduction).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HistoriquesProduction).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rapports).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alertes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Dashboards).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RolesUtilisateurs).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Utilisateurs).to_owned())
            .await?;

        Ok(())
    }
}
