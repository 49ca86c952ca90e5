pub mod prelude;

pub mod alertes;
pub mod dashboards;
pub mod historiques_production;
pub mod performances_machines;
pub mod produits;
pub mod rapports;
pub mod roles;
pub mod roles_utilisateurs;
pub mod statistiques_production;
pub mod taches_production;
pub mod tendances_anomalies;
pub mod utilisateurs;
