mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::TestApp;

#[actix_rt::test]
async fn test_map_view_for_selected_day() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/map").to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(view["dayIndex"], 0);
    assert_eq!(view["markers"].as_array().unwrap().len(), 6);
    assert_eq!(view["path"]["points"].as_array().unwrap().len(), 6);
    assert_eq!(view["path"]["color"], "#1e3a8a");
    assert_eq!(view["tiles"]["zoom"], 13);
    // Map tab hidden: no viewport work.
    assert!(view["fitBounds"].is_null());
    assert_eq!(view["invalidateSize"], false);
}

#[actix_rt::test]
async fn test_returning_to_map_forces_relayout() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/state/tab")
        .set_json(&json!({ "tab": "map" }))
        .to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["activeTab"], "map");

    let req = test::TestRequest::get().uri("/api/map").to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["invalidateSize"], true);
    assert_eq!(view["fitBounds"]["maxZoom"], 15);

    let req = test::TestRequest::post().uri("/api/map/laid-out").to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["invalidateSize"], false);

    for tab in ["chat", "map"] {
        let req = test::TestRequest::put()
            .uri("/api/state/tab")
            .set_json(&json!({ "tab": tab }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/api/map").to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["invalidateSize"], true);
}

#[actix_rt::test]
async fn test_marker_and_background_clicks() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/state/tab")
        .set_json(&json!({ "tab": "map" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/map/click")
        .set_json(&json!({ "itemId": "4" }))
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(view["selection"]["itemId"], "4");
    assert_eq!(view["selection"]["categoryLabel"], "景點");
    assert!(view["fitBounds"].is_null());
    let selected: Vec<&Value> = view["markers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["itemId"], "4");
    assert_eq!(selected[0]["scale"], 1.5);

    let req = test::TestRequest::post()
        .uri("/api/map/click")
        .set_json(&json!({}))
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert!(view["selection"].is_null());
    assert!(!view["fitBounds"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/map/click")
        .set_json(&json!({ "itemId": "mina" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_changing_day_clears_selection() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/map/click")
        .set_json(&json!({ "itemId": "7" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/api/state/day")
        .set_json(&json!({ "dayIndex": 1 }))
        .to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["selectedDay"], 1);
    assert!(state["selectedMapItem"].is_null());

    let req = test::TestRequest::get().uri("/api/map").to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["dayIndex"], 1);
    assert_eq!(view["markers"][0]["itemId"], "hotel-d2");

    let req = test::TestRequest::put()
        .uri("/api/state/day")
        .set_json(&json!({ "dayIndex": 7 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_state_summary() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/state").to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(state["activeTab"], "itinerary");
    assert_eq!(state["selectedDay"], 0);
    assert_eq!(state["dayCount"], 4);
    assert_eq!(state["hasPreview"], false);
    assert_eq!(state["inFlight"], json!({ "chat": false, "optimizer": false, "rate": false }));
}
