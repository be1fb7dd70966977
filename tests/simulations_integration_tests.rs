mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use rendafixa_backend::handlers::app_router;
use rendafixa_backend::services::advisor::ANALYSIS_UNAVAILABLE;
use rendafixa_backend::services::llm::{LlmError, LlmErrorKind};

use crate::common::{test_app_state, StubModel};

async fn build_test_router(model: Arc<StubModel>) -> Router {
    app_router(test_app_state(model).await)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_market_falls_back_when_central_bank_is_unreachable() {
    let app = build_test_router(StubModel::replying(Ok("ok".to_string()))).await;

    let (status, json) = get_json(&app, "/api/market").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selic"], 11.25);
    assert_eq!(json["source"], "fallback");
    assert_eq!(json["lci_default_percent"], 88);
    assert_eq!(json["cdb_default_percent"], 105);
}

#[tokio::test]
async fn test_concepts_lists_four_entries() {
    let app = build_test_router(StubModel::replying(Ok("ok".to_string()))).await;

    let (status, json) = get_json(&app, "/api/concepts").await;

    assert_eq!(status, StatusCode::OK);
    let terms: Vec<&str> = json["concepts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["term"].as_str().unwrap())
        .collect();
    assert_eq!(terms, vec!["Selic", "LCI/LCA", "CDB", "CDI"]);
}

#[tokio::test]
async fn test_projection_rows_without_persistence() {
    let model = StubModel::replying(Ok("ok".to_string()));
    let app = build_test_router(model.clone()).await;

    let (status, json) = post_json(
        &app,
        "/api/projections",
        json!({ "principal": 1000, "years": [2, 1] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["year"], 1);
    assert_eq!(rows[1]["year"], 2);

    let treasury = &rows[1]["products"][0];
    assert_eq!(treasury["product"], "treasury_selic");
    assert_eq!(treasury["net_value"], "1197.06");
    assert_eq!(treasury["gross_value"], "1237.66");

    // No model call, nothing stored
    assert!(model.prompts.lock().unwrap().is_empty());
    let (_, listing) = get_json(&app, "/api/simulations").await;
    assert!(listing["simulations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_simulation_is_analyzed_and_recorded() {
    let model = StubModel::replying(Ok("Para o perfil arrojado, CDB rende R$ 30 a mais.".to_string()));
    let app = build_test_router(model.clone()).await;

    let (status, json) = post_json(
        &app,
        "/api/simulations",
        json!({ "principal": 10000, "profile": "arrojado", "bank_label": "  Banco X  " }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["rows"].as_array().unwrap().len(), 5);
    assert_eq!(json["analysis"], "Para o perfil arrojado, CDB rende R\\$ 30 a mais.");
    let record_id = json["record_id"].as_i64().unwrap();

    let prompts = model.prompts.lock().unwrap().clone();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Arrojado"));

    let (status, listing) = get_json(&app, "/api/simulations").await;
    assert_eq!(status, StatusCode::OK);
    let records = listing["simulations"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"].as_i64().unwrap(), record_id);
    assert_eq!(records[0]["investor_profile"], "Arrojado");
    assert_eq!(records[0]["benchmark_rate"], 11.25);
    assert_eq!(records[0]["bank_label"], "Banco X");
}

#[tokio::test]
async fn test_model_failure_records_fallback_text() {
    let model = StubModel::replying(Err(LlmError::new(LlmErrorKind::ServerError, "503")));
    let app = build_test_router(model).await;

    let (status, json) = post_json(&app, "/api/simulations", json!({ "principal": 500 })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["analysis"], ANALYSIS_UNAVAILABLE);

    let (_, listing) = get_json(&app, "/api/simulations").await;
    assert_eq!(listing["simulations"][0]["analysis_text"], ANALYSIS_UNAVAILABLE);
    assert_eq!(listing["simulations"][0]["investor_profile"], "Conservador");
}

#[tokio::test]
async fn test_listing_is_most_recent_first() {
    let app = build_test_router(StubModel::replying(Ok("ok".to_string()))).await;

    let (_, first) = post_json(&app, "/api/simulations", json!({ "principal": 1000 })).await;
    let (_, second) = post_json(&app, "/api/simulations", json!({ "principal": 2000 })).await;

    let (_, listing) = get_json(&app, "/api/simulations").await;
    let ids: Vec<i64> = listing["simulations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();

    assert_eq!(
        ids,
        vec![second["record_id"].as_i64().unwrap(), first["record_id"].as_i64().unwrap()]
    );
}

#[tokio::test]
async fn test_export_is_csv_attachment() {
    let app = build_test_router(StubModel::replying(Ok("Prefira LCI, isenta.".to_string()))).await;
    post_json(&app, "/api/simulations", json!({ "principal": 1500, "profile": "moderado" })).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/simulations/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id,created_at,principal"));
    assert!(lines[1].contains("1500.00,Moderado,11.25,,\"Prefira LCI, isenta.\""));
}

#[tokio::test]
async fn test_invalid_inputs_are_rejected() {
    let model = StubModel::replying(Ok("ok".to_string()));
    let app = build_test_router(model.clone()).await;

    let cases = vec![
        json!({ "principal": 0 }),
        json!({ "principal": -10 }),
        json!({ "principal": 1000, "lci_percent": 79 }),
        json!({ "principal": 1000, "cdb_percent": 151 }),
        json!({ "principal": 1000, "years": [] }),
        json!({ "principal": 1000, "years": [51] }),
    ];

    for payload in cases {
        let (status, json) = post_json(&app, "/api/simulations", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(json["code"], "INVALID_INPUT");
    }

    assert!(model.prompts.lock().unwrap().is_empty());
    let (_, listing) = get_json(&app, "/api/simulations").await;
    assert!(listing["simulations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreadable_bodies_get_json_errors() {
    let model = StubModel::replying(Ok("ok".to_string()));
    let app = build_test_router(model.clone()).await;

    let (status, json) = post_json(
        &app,
        "/api/simulations",
        json!({ "principal": 1000, "profile": "ousado" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert!(json["error"].as_str().unwrap().contains("ousado"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/projections")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"principal\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "INVALID_INPUT");

    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_root_banner() {
    let app = build_test_router(StubModel::replying(Ok("ok".to_string()))).await;

    let (status, body) = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
}
