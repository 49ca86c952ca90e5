pub use super::alertes::Entity as Alertes;
pub use super::dashboards::Entity as Dashboards;
pub use super::historiques_production::Entity as HistoriquesProduction;
pub use super::performances_machines::Entity as PerformancesMachines;
pub use super::produits::Entity as Produits;
pub use super::rapports::Entity as Rapports;
pub use super::roles::Entity as Roles;
pub use super::roles_utilisateurs::Entity as RolesUtilisateurs;
pub use super::statistiques_production::Entity as StatistiquesProduction;
pub use super::taches_production::Entity as TachesProduction;
pub use super::tendances_anomalies::Entity as TendancesAnomalies;
pub use super::utilisateurs::Entity as Utilisateurs;
