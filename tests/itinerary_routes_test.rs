mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::TestApp;
use trip_itinerary_api::config::AppConfig;

fn ids(day: &Value) -> Vec<String> {
    day["itinerary"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[actix_rt::test]
async fn test_health_check() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["itinerary"]["status"], "ok");
    assert_eq!(body["services"]["gemini"]["status"], "ok");
}

#[actix_rt::test]
async fn test_health_degraded_without_api_key() {
    let test_app = TestApp::with_config(AppConfig::default());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["gemini"]["status"], "error");
}

#[actix_rt::test]
async fn test_get_days_returns_seeded_trip() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/days").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 4);
    assert_eq!(days[0]["date"], "1/11");
    assert_eq!(ids(&days[0]), vec!["1", "hotel-d1", "3", "4", "6", "7"]);
    assert_eq!(days[0]["itinerary"][0]["startTime"], "06:50");
}

#[actix_rt::test]
async fn test_day_card_view() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/days/0").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["dayIndex"], 0);
    let cards = body["cards"].as_array().unwrap();
    assert!(cards[0].get("leg").is_none());
    assert_eq!(cards[2]["id"], "3");
    assert_eq!(cards[2]["categoryLabel"], "美食");
    assert!(cards[2]["leg"]["directionsUrl"]
        .as_str()
        .unwrap()
        .contains("destination=33.5932,130.3977"));

    let req = test::TestRequest::get().uri("/api/days/9").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_add_item_sorts_into_place() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/days/0/items")
        .set_json(&json!({
            "name": "清晨散步",
            "startTime": "5:00",
            "endTime": "05:30"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    let new_id = created["id"].as_str().unwrap().to_string();
    assert!(!new_id.is_empty());
    assert_eq!(created["category"], "other");
    assert_eq!(created["startTime"], "05:00");

    let req = test::TestRequest::get().uri("/api/days").to_request();
    let days: Value = test::call_and_read_body_json(&app, req).await;
    let day0 = ids(&days[0]);
    assert_eq!(day0.len(), 7);
    assert_eq!(day0[0], new_id);
    assert_eq!(ids(&days[1]).len(), 6);
}

#[actix_rt::test]
async fn test_add_item_rejects_malformed_time() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/days/0/items")
        .set_json(&json!({
            "name": "Bad",
            "category": "food",
            "startTime": "25:99",
            "endTime": "26:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert_eq!(test_app.data.read(|state| state.store.day(0).unwrap().itinerary.len()), 6);
}

#[actix_rt::test]
async fn test_add_item_rejects_duplicate_id() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/days/1/items")
        .set_json(&json!({
            "id": "3",
            "name": "Copy",
            "category": "food",
            "startTime": "12:00",
            "endTime": "13:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_update_item_resorts_day() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/days/0/items/3")
        .set_json(&json!({ "startTime": "20:00", "notes": "晚點再吃" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let item: Value = test::read_body_json(resp).await;
    assert_eq!(item["startTime"], "20:00");
    assert_eq!(item["endTime"], "12:45");
    assert_eq!(item["notes"], "晚點再吃");
    assert_eq!(item["name"], "Shin-Shin 拉麵 天神本店");

    let req = test::TestRequest::get().uri("/api/days").to_request();
    let days: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&days[0]), vec!["1", "hotel-d1", "4", "6", "7", "3"]);
}

#[actix_rt::test]
async fn test_update_missing_item_is_not_found() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/days/0/items/nope")
        .set_json(&json!({ "name": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_delete_item() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::delete().uri("/api/days/0/items/3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete().uri("/api/days/0/items/3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/days").to_request();
    let days: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&days[0]), vec!["1", "hotel-d1", "4", "6", "7"]);
}

#[actix_rt::test]
async fn test_travel_tip_and_fallback() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    test_app.model.push_text("  記得在川端通試吃烤麻糬。 ");
    let req = test::TestRequest::get().uri("/api/days/0/items/4/tip").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["tip"], "記得在川端通試吃烤麻糬。");

    let (_, request) = test_app.model.requests().pop().unwrap();
    let prompt = serde_json::to_string(&request).unwrap();
    assert!(prompt.contains("櫛田神社"));

    test_app.model.push_failure("boom");
    let req = test::TestRequest::get().uri("/api/days/0/items/4/tip").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["tip"], "記得多喝水，享受福岡的美食！");

    let req = test::TestRequest::get().uri("/api/days/0/items/ghost/tip").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
