use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;

pub mod migrator;
pub mod repositories;

pub use crate::entities::alertes::Model as Alerte;
pub use crate::entities::dashboards::Model as Dashboard;
pub use crate::entities::historiques_production::Model as HistoriqueProduction;
pub use crate::entities::performances_machines::Model as PerformanceMachine;
pub use crate::entities::produits::Model as Produit;
pub use crate::entities::rapports::Model as Rapport;
pub use crate::entities::roles::Model as Role;
pub use crate::entities::statistiques_production::Model as StatistiquesProduction;
pub use crate::entities::taches_production::Model as TacheProduction;
pub use crate::entities::tendances_anomalies::Model as TendanceAnomalie;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("::memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn role_repo(&self) -> repositories::role::RoleRepository {
        repositories::role::RoleRepository::new(self.conn.clone())
    }

    fn dashboard_repo(&self) -> repositories::dashboard::DashboardRepository {
        repositories::dashboard::DashboardRepository::new(self.conn.clone())
    }

    fn alert_repo(&self) -> repositories::alert::AlertRepository {
        repositories::alert::AlertRepository::new(self.conn.clone())
    }

    fn report_repo(&self) -> repositories::report::ReportRepository {
        repositories::report::ReportRepository::new(self.conn.clone())
    }

    fn production_repo(&self) -> repositories::production::ProductionRepository {
        repositories::production::ProductionRepository::new(self.conn.clone())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    fn machine_repo(&self) -> repositories::machine::MachineRepository {
        repositories::machine::MachineRepository::new(self.conn.clone())
    }

    fn statistics_repo(&self) -> repositories::statistics::StatisticsRepository {
        repositories::statistics::StatisticsRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users & roles
    // ========================================================================

    pub async fn get_user_by_name(&self, nom: &str) -> Result<Option<User>> {
        self.user_repo().get_by_name(nom).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn create_user(
        &self,
        nom: &str,
        password: &str,
        role_ids: &[i32],
        config: &SecurityConfig,
    ) -> Result<i32> {
        self.user_repo().create(nom, password, role_ids, config).await
    }

    pub async fn verify_user_password(&self, nom: &str, password: &str) -> Result<Option<i32>> {
        self.user_repo().verify_password(nom, password).await
    }

    pub async fn user_has_dependents(&self, id: i32) -> Result<bool> {
        self.user_repo().has_dependents(id).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.role_repo().list().await
    }

    pub async fn create_role(&self, name: &str, description: Option<&str>) -> Result<i32> {
        self.role_repo().create(name, description).await
    }

    pub async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        self.role_repo().find_by_name(name).await
    }

    // ========================================================================
    // Dashboards
    // ========================================================================

    pub async fn list_dashboards(&self, owner: Option<i32>) -> Result<Vec<Dashboard>> {
        self.dashboard_repo().list(owner).await
    }

    pub async fn get_dashboard(&self, id: i32) -> Result<Option<Dashboard>> {
        self.dashboard_repo().get(id).await
    }

    pub async fn create_dashboard(
        &self,
        utilisateur_id: i32,
        liste_de_dashboards: &str,
    ) -> Result<i32> {
        self.dashboard_repo()
            .create(utilisateur_id, liste_de_dashboards)
            .await
    }

    pub async fn update_dashboard(
        &self,
        id: i32,
        utilisateur_id: i32,
        liste_de_dashboards: &str,
    ) -> Result<bool> {
        self.dashboard_repo()
            .update(id, utilisateur_id, liste_de_dashboards)
            .await
    }

    pub async fn delete_dashboard(&self, id: i32) -> Result<bool> {
        self.dashboard_repo().delete(id).await
    }

    pub async fn dashboard_has_tasks(&self, id: i32) -> Result<bool> {
        self.dashboard_repo().has_tasks(id).await
    }

    // ========================================================================
    // Alerts
    // ========================================================================

    pub async fn list_alerts(&self, owner: Option<i32>) -> Result<Vec<Alerte>> {
        self.alert_repo().list(owner).await
    }

    pub async fn create_alert(
        &self,
        type_alerte: &str,
        message: &str,
        utilisateur_id: i32,
        date_heure: Option<NaiveDateTime>,
    ) -> Result<i32> {
        self.alert_repo()
            .create(type_alerte, message, utilisateur_id, date_heure)
            .await
    }

    pub async fn update_alert(&self, id: i32, type_alerte: &str, message: &str) -> Result<bool> {
        self.alert_repo().update(id, type_alerte, message).await
    }

    pub async fn delete_alert(&self, id: i32) -> Result<bool> {
        self.alert_repo().delete(id).await
    }

    // ========================================================================
    // Reports
    // ========================================================================

    pub async fn list_reports(&self, owner: Option<i32>) -> Result<Vec<Rapport>> {
        self.report_repo().list(owner).await
    }

    pub async fn create_report(
        &self,
        date_debut: NaiveDateTime,
        date_fin: NaiveDateTime,
        donnees: &str,
        utilisateur_id: i32,
    ) -> Result<i32> {
        self.report_repo()
            .create(date_debut, date_fin, donnees, utilisateur_id)
            .await
    }

    pub async fn update_report(
        &self,
        id: i32,
        date_debut: NaiveDateTime,
        date_fin: NaiveDateTime,
        donnees: &str,
        utilisateur_id: i32,
    ) -> Result<bool> {
        self.report_repo()
            .update(id, date_debut, date_fin, donnees, utilisateur_id)
            .await
    }

    pub async fn delete_report(&self, id: i32) -> Result<bool> {
        self.report_repo().delete(id).await
    }

    // ========================================================================
    // Production histories & tasks
    // ========================================================================

    pub async fn list_histories(&self, owner: Option<i32>) -> Result<Vec<HistoriqueProduction>> {
        self.production_repo().list_histories(owner).await
    }

    pub async fn create_history(&self, enregistrements: &str, utilisateur_id: i32) -> Result<i32> {
        self.production_repo()
            .create_history(enregistrements, utilisateur_id)
            .await
    }

    pub async fn update_history(
        &self,
        id: i32,
        enregistrements: &str,
        utilisateur_id: i32,
    ) -> Result<bool> {
        self.production_repo()
            .update_history(id, enregistrements, utilisateur_id)
            .await
    }

    pub async fn delete_history(&self, id: i32) -> Result<bool> {
        self.production_repo().delete_history(id).await
    }

    pub async fn list_tasks(&self, dashboard: Option<i32>) -> Result<Vec<TacheProduction>> {
        self.production_repo().list_tasks(dashboard).await
    }

    pub async fn create_task(
        &self,
        description: &str,
        statut: &str,
        priorite: i32,
        dashboard_id: i32,
    ) -> Result<i32> {
        self.production_repo()
            .create_task(description, statut, priorite, dashboard_id)
            .await
    }

    pub async fn update_task(
        &self,
        id: i32,
        description: &str,
        statut: &str,
        priorite: i32,
        dashboard_id: i32,
    ) -> Result<bool> {
        self.production_repo()
            .update_task(id, description, statut, priorite, dashboard_id)
            .await
    }

    pub async fn delete_task(&self, id: i32) -> Result<bool> {
        self.production_repo().delete_task(id).await
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn list_products(&self) -> Result<Vec<Produit>> {
        self.product_repo().list().await
    }

    pub async fn get_product(&self, id: i32) -> Result<Option<Produit>> {
        self.product_repo().get(id).await
    }

    pub async fn create_product(
        &self,
        nom: &str,
        description: &str,
        tags_rfid: &str,
    ) -> Result<i32> {
        self.product_repo().create(nom, description, tags_rfid).await
    }

    pub async fn update_product(
        &self,
        id: i32,
        nom: &str,
        description: &str,
        tags_rfid: &str,
    ) -> Result<bool> {
        self.product_repo()
            .update(id, nom, description, tags_rfid)
            .await
    }

    pub async fn delete_product(&self, id: i32) -> Result<bool> {
        self.product_repo().delete(id).await
    }

    // ========================================================================
    // Machine performance
    // ========================================================================

    pub async fn list_machine_performance(&self) -> Result<Vec<PerformanceMachine>> {
        self.machine_repo().list().await
    }

    pub async fn append_machine_performance(
        &self,
        machine_id: &str,
        temps_arret: i32,
        temps_fonctionnement: i32,
        date_heure: Option<NaiveDateTime>,
    ) -> Result<i32> {
        self.machine_repo()
            .append(machine_id, temps_arret, temps_fonctionnement, date_heure)
            .await
    }

    // ========================================================================
    // Statistics & trends
    // ========================================================================

    pub async fn list_production_statistics(&self) -> Result<Vec<StatistiquesProduction>> {
        self.statistics_repo().list_statistics().await
    }

    pub async fn create_production_statistics(
        &self,
        date: NaiveDate,
        sous_production: i32,
        surproduction: i32,
        production_normale: i32,
    ) -> Result<i32> {
        self.statistics_repo()
            .create_statistics(date, sous_production, surproduction, production_normale)
            .await
    }

    pub async fn update_production_statistics(
        &self,
        id: i32,
        date: NaiveDate,
        sous_production: i32,
        surproduction: i32,
        production_normale: i32,
    ) -> Result<bool> {
        self.statistics_repo()
            .update_statistics(id, date, sous_production, surproduction, production_normale)
            .await
    }

    pub async fn delete_production_statistics(&self, id: i32) -> Result<bool> {
        self.statistics_repo().delete_statistics(id).await
    }

    pub async fn list_anomaly_trends(&self) -> Result<Vec<TendanceAnomalie>> {
        self.statistics_repo().list_trends().await
    }

    pub async fn create_anomaly_trend(
        &self,
        date: NaiveDate,
        anomalie: &str,
        nombre_occurrences: i32,
    ) -> Result<i32> {
        self.statistics_repo()
            .create_trend(date, anomalie, nombre_occurrences)
            .await
    }

    pub async fn update_anomaly_trend(
        &self,
        id: i32,
        date: NaiveDate,
        anomalie: &str,
        nombre_occurrences: i32,
    ) -> Result<bool> {
        self.statistics_repo()
            .update_trend(id, date, anomalie, nombre_occurrences)
            .await
    }

    pub async fn delete_anomaly_trend(&self, id: i32) -> Result<bool> {
        self.statistics_repo().delete_trend(id).await
    }
}
