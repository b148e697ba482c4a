mod common;

use actix_web::test;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_root_banner() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["version"], "1.0.0");
}

#[actix_rt::test]
#[serial]
async fn test_health_check() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
#[serial]
async fn test_debug_reports_uninitialized_providers() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/debug").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["services"]["openai"]["initialized"], false);
    assert_eq!(body["services"]["amadeus"]["initialized"], false);
}

#[actix_rt::test]
#[serial]
async fn test_get_destinations_falls_back_to_mock() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/destinations").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "mock");
    assert_eq!(body["count"], 6);
    assert!(body["data"].is_array());

    let first = &body["data"][0];
    assert!(first["name"].is_string());
    assert_eq!(first["highlights"].as_array().unwrap().len(), 4);
}

#[actix_rt::test]
#[serial]
async fn test_get_destinations_continent_filter_and_limit() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/destinations?continent=Europe&limit=3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["continent"], "Europe");
    assert_eq!(body["limit"], 3);
}

#[actix_rt::test]
#[serial]
async fn test_get_continents_mock() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/continents").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"][0]["name"], "Africa");
}

#[actix_rt::test]
#[serial]
async fn test_destination_suggestions_short_query_is_empty() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/destination-suggestions?query=p")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
#[serial]
async fn test_destination_suggestions_static_fallback() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/destination-suggestions?query=par")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0], "Paris, France");
}

#[actix_rt::test]
#[serial]
async fn test_get_visualizations_mock() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/visualizations").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["source"], "mock");
}

#[actix_rt::test]
#[serial]
async fn test_generate_visualization_requires_http_photo_url() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-visualization")
        .set_json(serde_json::json!({
            "user_photo_url": "not-a-url",
            "prompt": "On a beach at sunset",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_generate_visualization_requires_prompt_or_destination() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-visualization")
        .set_json(serde_json::json!({
            "user_photo_url": "https://example.com/me.jpg",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_generate_visualization_unknown_destination_is_404() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-visualization")
        .set_json(serde_json::json!({
            "user_photo_url": "https://example.com/me.jpg",
            "destination_id": "no-such-destination",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
#[serial]
async fn test_generate_visualization_falls_back_to_placeholder() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/generate-visualization")
        .set_json(serde_json::json!({
            "user_photo_url": "https://example.com/me.jpg",
            "prompt": "Standing before the Kyoto bamboo forest",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["provider"], "placeholder");
    assert!(body["visualization_url"].as_str().unwrap().starts_with("http"));
}

#[actix_rt::test]
#[serial]
async fn test_generate_visualization_mock_destination_prompt() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    // Known id from the static destination list.
    let req = test::TestRequest::post()
        .uri("/api/generate-visualization")
        .set_json(serde_json::json!({
            "user_photo_url": "https://example.com/me.jpg",
            "destination_id": "550e8400-e29b-41d4-a716-446655440002",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Kyoto, Japan"));
}

#[actix_rt::test]
#[serial]
async fn test_temp_image_not_found() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/temp-image/00000000-0000-0000-0000-000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
#[serial]
async fn test_filter_destinations_empty_terminal() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/filter-destinations")
        .set_json(serde_json::json!({
            "criteria": {"budget": "low"},
            "prompt": "Filter to warm, budget-friendly places",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["destinations"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
#[serial]
async fn test_unknown_route_is_404() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/nonexistent").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
