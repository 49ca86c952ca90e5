use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::db;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed-format datetime rendering; part of the wire contract.
#[must_use]
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self { status: "success" }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub id: i32,
}

impl CreatedResponse {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self {
            status: "success",
            id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub utilisateur_id: i32,
}

/// Legacy lookup shape: a miss is reported as `"not found"` with a
/// success status, not as an error body.
#[derive(Debug, Serialize)]
pub struct ProduitLookupResponse {
    pub status: &'static str,
    pub produit: String,
}

impl ProduitLookupResponse {
    #[must_use]
    pub const fn new(produit: String) -> Self {
        Self {
            status: "success",
            produit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UtilisateurDto {
    pub id: i32,
    pub nom: String,
    pub roles: Vec<String>,
}

impl From<db::User> for UtilisateurDto {
    fn from(user: db::User) -> Self {
        Self {
            id: user.id,
            nom: user.nom,
            roles: user.roles,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<db::Role> for RoleDto {
    fn from(role: db::Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardDto {
    pub id: i32,
    pub utilisateur_id: i32,
    pub liste_de_dashboards: String,
}

impl From<db::Dashboard> for DashboardDto {
    fn from(row: db::Dashboard) -> Self {
        Self {
            id: row.id,
            utilisateur_id: row.utilisateur_id,
            liste_de_dashboards: row.liste_de_dashboards,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlerteDto {
    pub id: i32,
    pub type_alerte: String,
    pub message: String,
    pub date_heure: String,
}

impl From<db::Alerte> for AlerteDto {
    fn from(row: db::Alerte) -> Self {
        Self {
            id: row.id,
            type_alerte: row.type_alerte,
            message: row.message,
            date_heure: format_datetime(row.date_heure),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RapportDto {
    pub id: i32,
    pub date_debut: String,
    pub date_fin: String,
    pub donnees: String,
    pub utilisateur_id: i32,
}

impl From<db::Rapport> for RapportDto {
    fn from(row: db::Rapport) -> Self {
        Self {
            id: row.id,
            date_debut: format_datetime(row.date_debut),
            date_fin: format_datetime(row.date_fin),
            donnees: row.donnees,
            utilisateur_id: row.utilisateur_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoriqueProductionDto {
    pub id: i32,
    pub enregistrements: String,
    pub utilisateur_id: i32,
}

impl From<db::HistoriqueProduction> for HistoriqueProductionDto {
    fn from(row: db::HistoriqueProduction) -> Self {
        Self {
            id: row.id,
            enregistrements: row.enregistrements,
            utilisateur_id: row.utilisateur_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TacheProductionDto {
    pub id: i32,
    pub description: String,
    pub statut: String,
    pub priorite: i32,
    pub dashboard_id: i32,
}

impl From<db::TacheProduction> for TacheProductionDto {
    fn from(row: db::TacheProduction) -> Self {
        Self {
            id: row.id,
            description: row.description,
            statut: row.statut,
            priorite: row.priorite,
            dashboard_id: row.dashboard_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProduitDto {
    pub id: i32,
    pub nom: String,
    pub description: String,
    pub tags_rfid: String,
}

impl From<db::Produit> for ProduitDto {
    fn from(row: db::Produit) -> Self {
        Self {
            id: row.id,
            nom: row.nom,
            description: row.description,
            tags_rfid: row.tags_rfid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PerformanceMachineDto {
    pub id: i32,
    pub machine_id: String,
    pub temps_arret: i32,
    pub temps_fonctionnement: i32,
    pub date_heure: String,
}

impl From<db::PerformanceMachine> for PerformanceMachineDto {
    fn from(row: db::PerformanceMachine) -> Self {
        Self {
            id: row.id,
            machine_id: row.machine_id,
            temps_arret: row.temps_arret,
            temps_fonctionnement: row.temps_fonctionnement,
            date_heure: format_datetime(row.date_heure),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatistiquesProductionDto {
    pub id: i32,
    pub date: String,
    pub sous_production: i32,
    pub surproduction: i32,
    pub production_normale: i32,
}

impl From<db::StatistiquesProduction> for StatistiquesProductionDto {
    fn from(row: db::StatistiquesProduction) -> Self {
        Self {
            id: row.id,
            date: format_date(row.date),
            sous_production: row.sous_production,
            surproduction: row.surproduction,
            production_normale: row.production_normale,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TendanceAnomalieDto {
    pub id: i32,
    pub date: String,
    pub anomalie: String,
    pub nombre_occurrences: i32,
}

impl From<db::TendanceAnomalie> for TendanceAnomalieDto {
    fn from(row: db::TendanceAnomalie) -> Self {
        Self {
            id: row.id,
            date: format_date(row.date),
            anomalie: row.anomalie,
            nombre_occurrences: row.nombre_occurrences,
        }
    }
}
