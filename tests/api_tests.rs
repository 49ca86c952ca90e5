use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use plantwatch::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path = std::env::temp_dir().join(format!("plantwatch-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());

    let state = plantwatch::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    plantwatch::api::router(state).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_empty(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_login_with_seeded_admin() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/login",
        &json!({"nom": "admin", "mot_de_passe": "admin"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["utilisateur_id"], 1);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app().await;

    let (wrong_pw_status, wrong_pw_body) = send_json(
        &app,
        "POST",
        "/api/login",
        &json!({"nom": "admin", "mot_de_passe": "nope"}),
    )
    .await;

    let (no_user_status, no_user_body) = send_json(
        &app,
        "POST",
        "/api/login",
        &json!({"nom": "ghost", "mot_de_passe": "nope"}),
    )
    .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    // Unknown name and bad password must return the same body.
    assert_eq!(wrong_pw_body, no_user_body);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/login",
        &json!({"nom": "", "mot_de_passe": "x"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_logout_without_session_is_success() {
    let app = spawn_app().await;

    let (status, body) = send_empty(&app, "POST", "/api/logout").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_dashboard_lifecycle() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/dashboards",
        &json!({"utilisateur_id": 1, "liste_de_dashboards": "overview,lines"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send_empty(&app, "GET", "/api/dashboards").await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert!(
        all.iter()
            .any(|d| d["id"].as_i64() == Some(id) && d["liste_de_dashboards"] == "overview,lines")
    );

    // Owner filter returns a subset of the full listing.
    let (status, body) = send_empty(&app, "GET", "/api/dashboards/1").await;
    assert_eq!(status, StatusCode::OK);
    let owned = body.as_array().unwrap();
    assert!(owned.iter().all(|d| d["utilisateur_id"] == 1));
    assert!(owned.iter().any(|d| d["id"].as_i64() == Some(id)));

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/dashboards/{id}"),
        &json!({"utilisateur_id": 1, "liste_de_dashboards": "overview"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, body) = send_empty(&app, "GET", "/api/dashboards/1").await;
    let row = body
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"].as_i64() == Some(id))
        .cloned()
        .unwrap();
    assert_eq!(row["liste_de_dashboards"], "overview");

    let (status, _) = send_empty(&app, "DELETE", &format!("/api/dashboards/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_empty(&app, "GET", "/api/dashboards/1").await;
    assert!(
        !body
            .as_array()
            .unwrap()
            .iter()
            .any(|d| d["id"].as_i64() == Some(id))
    );
}

#[tokio::test]
async fn test_dashboard_unknown_owner_rejected() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/dashboards",
        &json!({"utilisateur_id": 999, "liste_de_dashboards": "x"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_update_missing_rows_return_not_found() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/dashboards/4242",
        &json!({"utilisateur_id": 1, "liste_de_dashboards": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_empty(&app, "DELETE", "/api/alertes/4242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_empty(&app, "DELETE", "/api/produits/4242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update_payload_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/alertes",
        &json!({"type_alerte": "panne", "message": "machine 3 down", "utilisateur_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    // Updates replace the whole row; a missing field is a client error.
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/alertes/{id}"),
        &json!({"message": "only the message"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_alert_default_timestamp_format() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/alertes",
        &json!({"type_alerte": "qualite", "message": "drift detected", "utilisateur_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = send_empty(&app, "GET", "/api/alertes/1").await;
    let alert = body
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"].as_i64() == Some(id))
        .cloned()
        .unwrap();

    let stamp = alert["date_heure"].as_str().unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[tokio::test]
async fn test_alert_explicit_timestamp_roundtrip() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/alertes",
        &json!({
            "type_alerte": "panne",
            "message": "scheduled outage",
            "utilisateur_id": 1,
            "date_heure": "2026-03-01 08:30:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = send_empty(&app, "GET", "/api/alertes").await;
    let alert = body
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"].as_i64() == Some(id))
        .cloned()
        .unwrap();
    assert_eq!(alert["date_heure"], "2026-03-01 08:30:00");
}

#[tokio::test]
async fn test_product_lookup_contract() {
    let app = spawn_app().await;

    // A miss is a success body, not a 404.
    let (status, body) = send_empty(&app, "GET", "/api/produit/999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["produit"], "not found");

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/produits",
        &json!({"nom": "Gearbox A3", "description": "10mm housing", "tags_rfid": "tag-17,tag-18"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send_empty(&app, "GET", &format!("/api/produit/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["produit"], "Gearbox A3");
}

#[tokio::test]
async fn test_machine_performance_append_and_list() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/machines",
        &json!({
            "machine_id": "press-07",
            "temps_arret": 12,
            "temps_fonctionnement": 468,
            "date_heure": "2026-02-10 06:00:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // date_heure falls back to now when omitted.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/machines",
        &json!({"machine_id": "press-07", "temps_arret": 0, "temps_fonctionnement": 480}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_empty(&app, "GET", "/api/machines").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r["date_heure"] == "2026-02-10 06:00:00"));
    for row in rows {
        let stamp = row["date_heure"].as_str().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}

#[tokio::test]
async fn test_machine_sample_rejects_bad_input() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/machines",
        &json!({"machine_id": "", "temps_arret": 1, "temps_fonctionnement": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/machines",
        &json!({"machine_id": "m1", "temps_arret": -5, "temps_fonctionnement": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/machines",
        &json!({
            "machine_id": "m1",
            "temps_arret": 1,
            "temps_fonctionnement": 1,
            "date_heure": "10/02/2026 06:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_statistics_and_trends() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/statistiques-production",
        &json!({
            "date": "2026-02-10",
            "sous_production": 3,
            "surproduction": 1,
            "production_normale": 42
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().is_some());

    let (status, body) = send_empty(&app, "GET", "/api/statistiques-production").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2026-02-10");
    assert_eq!(rows[0]["production_normale"], 42);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/tendances-anomalies",
        &json!({"date": "2026-02-10", "anomalie": "surchauffe", "nombre_occurrences": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_empty(&app, "GET", "/api/tendances-anomalies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap()[0]["anomalie"], "surchauffe");

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/tendances-anomalies",
        &json!({"date": "2026-13-40", "anomalie": "x", "nombre_occurrences": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_period_validation() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/rapports",
        &json!({
            "date_debut": "2026-02-10 08:00:00",
            "date_fin": "2026-02-01 08:00:00",
            "donnees": "{}",
            "utilisateur_id": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/rapports",
        &json!({
            "date_debut": "2026-02-01 08:00:00",
            "date_fin": "2026-02-10 08:00:00",
            "donnees": "{\"oee\": 0.91}",
            "utilisateur_id": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = send_empty(&app, "GET", "/api/rapports/1").await;
    let report = body
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"].as_i64() == Some(id))
        .cloned()
        .unwrap();
    assert_eq!(report["date_debut"], "2026-02-01 08:00:00");
    assert_eq!(report["date_fin"], "2026-02-10 08:00:00");
}

#[tokio::test]
async fn test_production_task_requires_existing_dashboard() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/taches-production",
        &json!({"description": "swap die", "statut": "ouverte", "priorite": 2, "dashboard_id": 99}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/dashboards",
        &json!({"utilisateur_id": 1, "liste_de_dashboards": "maintenance"}),
    )
    .await;
    let dashboard_id = body["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/taches-production",
        &json!({
            "description": "swap die",
            "statut": "ouverte",
            "priorite": 2,
            "dashboard_id": dashboard_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_empty(
        &app,
        "GET",
        &format!("/api/taches-production/{dashboard_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // A dashboard with open tasks cannot be removed.
    let (status, _) = send_empty(&app, "DELETE", &format!("/api/dashboards/{dashboard_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_production_history_crud() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/historique-production",
        &json!({"enregistrements": "batch 113: 4200 units", "utilisateur_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/historique-production/{id}"),
        &json!({"enregistrements": "batch 113: 4250 units", "utilisateur_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_empty(&app, "GET", "/api/historique-production/1").await;
    assert_eq!(
        body.as_array().unwrap()[0]["enregistrements"],
        "batch 113: 4250 units"
    );

    let (status, _) = send_empty(&app, "DELETE", &format!("/api/historique-production/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_empty(&app, "GET", "/api/historique-production").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_user_admin_and_delete_restriction() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/utilisateurs",
        &json!({"nom": "operator1", "mot_de_passe": "s3cret", "roles": ["admin"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["id"].as_i64().unwrap();

    // Duplicate names are refused.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/utilisateurs",
        &json!({"nom": "operator1", "mot_de_passe": "other"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/login",
        &json!({"nom": "operator1", "mot_de_passe": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["utilisateur_id"].as_i64(), Some(user_id));

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/dashboards",
        &json!({"utilisateur_id": user_id, "liste_de_dashboards": "ops"}),
    )
    .await;
    let dashboard_id = body["id"].as_i64().unwrap();

    // Owned rows block deletion.
    let (status, _) = send_empty(&app, "DELETE", &format!("/api/utilisateurs/{user_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send_empty(&app, "DELETE", &format!("/api/dashboards/{dashboard_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_empty(&app, "DELETE", &format!("/api/utilisateurs/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_empty(&app, "GET", "/api/utilisateurs").await;
    assert!(
        !body
            .as_array()
            .unwrap()
            .iter()
            .any(|u| u["id"].as_i64() == Some(user_id))
    );
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/utilisateurs",
        &json!({"nom": "operator2", "mot_de_passe": "pw", "roles": ["chef"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_system_status() {
    let app = spawn_app().await;

    let (status, body) = send_empty(&app, "GET", "/api/systeme/etat").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["listeners"], 0);
}
