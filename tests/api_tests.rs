// HTTP surface tests: envelopes, validation and status codes

mod common;

use actix_web::{http::StatusCode, test, web, App};
use common::{sample_catalog, FakeStore, ScriptedOracle};
use experience_recs::core::{Recommender, RecommenderOptions};
use experience_recs::routes::{self, suggestions::AppState};
use serde_json::Value;
use std::sync::Arc;

fn state(store: FakeStore, oracle: ScriptedOracle) -> web::Data<AppState> {
    web::Data::new(AppState {
        recommender: Recommender::new(Arc::new(store), Arc::new(oracle), RecommenderOptions::default()),
    })
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_suggested_success_envelope() {
    let app = app!(state(FakeStore::with_catalog(sample_catalog()), ScriptedOracle::new()));

    let req = test::TestRequest::get()
        .uri("/api/v1/suggested?user_id=newcomer&k=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["user_id"], "newcomer");
    assert_eq!(body["count"], 2);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_k_defaults_to_five() {
    let mut catalog = sample_catalog();
    for i in 0..10 {
        let mut exp = common::experience(&format!("t{}", i), "outdoor", "hiking");
        exp.trending = Some(true);
        catalog.push(exp);
    }
    let app = app!(state(FakeStore::with_catalog(catalog), ScriptedOracle::new()));

    let req = test::TestRequest::get().uri("/api/v1/suggested?user_id=newcomer").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 5);
}

#[actix_web::test]
async fn test_k_out_of_range_is_rejected() {
    let app = app!(state(FakeStore::with_catalog(sample_catalog()), ScriptedOracle::new()));

    for uri in ["/api/v1/suggested?user_id=u1&k=0", "/api/v1/suggested?user_id=u1&k=21"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["user_id"], "u1");
    }
}

#[actix_web::test]
async fn test_malformed_query_gets_error_envelope() {
    let app = app!(state(FakeStore::with_catalog(sample_catalog()), ScriptedOracle::new()));

    for uri in ["/api/v1/suggested?k=3", "/api/v1/suggested?user_id=u1&k=many"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().starts_with("Invalid query"));
    }
}

#[actix_web::test]
async fn test_store_failure_gets_error_envelope() {
    let app = app!(state(FakeStore::failing(), ScriptedOracle::new()));

    let req = test::TestRequest::get().uri("/api/v1/suggested?user_id=u9&k=3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["user_id"], "u9");
    assert!(body["message"].as_str().unwrap().contains("Catalog store error"));
}

#[actix_web::test]
async fn test_oracle_outage_is_still_success() {
    let store = FakeStore::with_catalog(sample_catalog())
        .wishlist("u1", &["o1"])
        .likes("u1", &["d1"]);
    let app = app!(state(store, ScriptedOracle::new()));

    let req = test::TestRequest::get().uri("/api/v1/suggested?user_id=u1&k=3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 3);
}

#[actix_web::test]
async fn test_health_and_root() {
    let app = app!(state(FakeStore::default(), ScriptedOracle::new()));

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "experience-recommendations");

    let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(body["message"], "Experience Recommendations API");
    assert!(body["endpoints"]["suggested"].as_str().unwrap().starts_with("/suggested"));
    assert!(body["endpoints"]["v1"]["suggested"].as_str().unwrap().starts_with("/api/v1/suggested"));
}

#[actix_web::test]
async fn test_root_level_routes() {
    let app = app!(state(FakeStore::with_catalog(sample_catalog()), ScriptedOracle::new()));

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/suggested?user_id=newcomer&k=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 2);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/suggested?user_id=u1&k=0").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
