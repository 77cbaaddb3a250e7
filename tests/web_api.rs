//! Dashboard endpoints driven through the router with stub services

mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use navmind::config::ServerConfig;
use navmind::models::FlightEntry;
use navmind::web;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{StubServices, stub_planner};

fn app(stub: StubServices) -> Router {
    web::router(Arc::new(stub_planner(stub)), &ServerConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn goa_preferences() -> Value {
    json!({
        "travel_type": "Leisure",
        "interest": "Beach",
        "season": "Summer",
        "budget": 15000.0,
        "days": 5,
        "departure_code": "del"
    })
}

#[tokio::test]
async fn health_is_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(StubServices::default()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn index_serves_dashboard() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(StubServices::default()), request).await;
    assert_eq!(status, StatusCode::OK);

    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("Plan My Trip"));
    assert!(page.contains("Refine"));
}

#[tokio::test]
async fn cities_for_known_interest() {
    let (status, body) =
        get_json(app(StubServices::default()), "/api/cities?interest=beach&season=Monsoon").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cities"], json!(["Goa", "Maldives", "Bali"]));
    assert_eq!(body["fallback"], json!(false));
}

#[tokio::test]
async fn cities_fall_back_for_unknown_interest() {
    let (status, body) = get_json(app(StubServices::default()), "/api/cities?interest=adventure").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cities"], json!(["London", "Paris", "Tokyo"]));
    assert_eq!(body["fallback"], json!(true));
}

#[tokio::test]
async fn plan_for_goa() {
    let stub = StubServices {
        flights: vec![FlightEntry {
            airline: Some("IndiGo".to_string()),
            flight_number: Some("6E2101".to_string()),
            departure: None,
            arrival: None,
        }],
        ..StubServices::default()
    };
    let payload = json!({"preferences": goa_preferences(), "city": "Goa"});
    let (status, plan) = post_json(app(stub), "/api/plan", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["city"], "Goa");
    assert_eq!(plan["preferences"]["departure_code"], "DEL");
    assert_eq!(plan["summary"], "Goa is known for its beaches.");
    assert_eq!(plan["map"]["zoom"], 12);
    assert_eq!(plan["budget"]["total"], 15000.0);
    assert_eq!(plan["budget"]["per_day"], 3000.0);
    assert_eq!(plan["itinerary"].as_array().unwrap().len(), 3);
    assert_eq!(plan["itinerary"][0]["plan"], "Explore main landmarks in Goa");
    assert_eq!(plan["hotels"][0]["name"], "Goa Grand Hotel");
    assert_eq!(plan["weather"]["status"], "ok");
    assert_eq!(plan["weather"]["data"].as_array().unwrap().len(), 7);
    assert_eq!(plan["arrival_code"], "GOI");
    assert_eq!(plan["flights"]["status"], "ok");
    assert_eq!(plan["flights"]["data"][0]["airline"], "IndiGo");
}

#[tokio::test]
async fn plan_defaults_to_first_suggestion() {
    let payload = json!({"preferences": goa_preferences()});
    let (status, plan) = post_json(app(StubServices::default()), "/api/plan", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["city"], "Goa");
}

#[tokio::test]
async fn plan_without_coordinates_skips_map_and_weather() {
    let stub = StubServices {
        coordinates: None,
        ..StubServices::default()
    };
    let payload = json!({"preferences": goa_preferences(), "city": "Atlantis"});
    let (status, plan) = post_json(app(stub), "/api/plan", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert!(plan.get("map").is_none_or(Value::is_null));
    assert!(plan.get("weather").is_none_or(Value::is_null));
    assert_eq!(plan["itinerary"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn failed_flights_do_not_fail_the_plan() {
    let stub = StubServices {
        fail_flights: true,
        ..StubServices::default()
    };
    let payload = json!({"preferences": goa_preferences(), "city": "Goa"});
    let (status, plan) = post_json(app(stub), "/api/plan", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["flights"]["status"], "failed");
    assert!(
        plan["flights"]["reason"]
            .as_str()
            .unwrap()
            .contains("invalid_access_key")
    );
}

#[tokio::test]
async fn bad_departure_code_is_rejected() {
    let mut preferences = goa_preferences();
    preferences["departure_code"] = json!("DELHI");
    let payload = json!({"preferences": preferences, "city": "Goa"});

    let (status, body) = post_json(app(StubServices::default()), "/api/plan", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("3 letters"));
}

#[tokio::test]
async fn non_positive_budget_is_rejected() {
    let mut preferences = goa_preferences();
    preferences["budget"] = json!(0.0);
    let payload = json!({"preferences": preferences, "city": "Goa"});

    let (status, _) = post_json(app(StubServices::default()), "/api/plan", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn zero_days_is_rejected() {
    let mut preferences = goa_preferences();
    preferences["days"] = json!(0);
    let payload = json!({"preferences": preferences, "city": "Goa"});

    let (status, body) = post_json(app(StubServices::default()), "/api/plan", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid input:"));
    assert!(message.contains("days"));
}

#[tokio::test]
async fn unknown_season_is_rejected_as_json() {
    let mut preferences = goa_preferences();
    preferences["season"] = json!("Spring");
    let payload = json!({"preferences": preferences, "city": "Goa"});

    let (status, body) = post_json(app(StubServices::default()), "/api/plan", payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("season"));
}

#[tokio::test]
async fn malformed_plan_body_is_rejected_as_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"preferences\": "))
        .unwrap();
    let (status, body) = send(app(StubServices::default()), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input:"));
}

#[tokio::test]
async fn cities_with_unknown_season_is_rejected_as_json() {
    let (status, body) =
        get_json(app(StubServices::default()), "/api/cities?interest=beach&season=Spring").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input:"));
}

#[tokio::test]
async fn refine_without_prompt_is_rejected_as_json() {
    let (status, body) = post_json(app(StubServices::default()), "/api/refine", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("prompt"));
}

#[tokio::test]
async fn refine_returns_model_reply() {
    let payload = json!({"prompt": "  Add a sunset cruise  "});
    let (status, body) = post_json(app(StubServices::default()), "/api/refine", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prompt"], "Add a sunset cruise");
    assert_eq!(body["response"], "Sure! Add a sunset cruise");
}

#[tokio::test]
async fn empty_refine_prompt_is_rejected() {
    let (status, body) =
        post_json(app(StubServices::default()), "/api/refine", json!({"prompt": "   "})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Prompt cannot be empty"));
}
