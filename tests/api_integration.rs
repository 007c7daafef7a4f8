//! HTTP API against a mock Open-Meteo

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use strandwetter::beaches::BeachCatalog;
use strandwetter::cache::create_weather_cache;
use strandwetter::config::AppConfig;
use strandwetter::routes::build_router;
use strandwetter::weather::WeatherService;
use strandwetter::AppState;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOURS: usize = 48;

/// Hourly timestamps for today and tomorrow in Berlin local time
fn hourly_times() -> Vec<String> {
    let today = Utc::now()
        .with_timezone(&chrono_tz::Europe::Berlin)
        .date_naive();
    let midnight = today.and_hms_opt(0, 0, 0).unwrap();
    (0..HOURS as i64)
        .map(|h| {
            (midnight + ChronoDuration::hours(h))
                .format("%Y-%m-%dT%H:%M")
                .to_string()
        })
        .collect()
}

/// Forecast with identical hours, so every hour scores `temp`-dependent
fn forecast_body(temperature: f64) -> Value {
    let times = hourly_times();
    let days: Vec<String> = times
        .iter()
        .step_by(24)
        .map(|t| t[..10].to_string())
        .collect();
    json!({
        "latitude": 54.4,
        "longitude": 13.6,
        "timezone": "Europe/Berlin",
        "hourly": {
            "time": times,
            "temperature_2m": vec![temperature; HOURS],
            "precipitation_probability": vec![5; HOURS],
            "weather_code": vec![0; HOURS],
            "cloud_cover": vec![20; HOURS],
            "wind_speed_10m": vec![10.0; HOURS],
            "uv_index": vec![5.0; HOURS]
        },
        "daily": {
            "time": days,
            "weather_code": [0, 1],
            "temperature_2m_max": [temperature, temperature],
            "temperature_2m_min": [15.0, 16.0],
            "uv_index_max": [5.0, 5.0],
            "precipitation_sum": [0.0, 0.0]
        }
    })
}

fn marine_body() -> Value {
    json!({
        "latitude": 54.4,
        "longitude": 13.6,
        "hourly": {
            "time": hourly_times(),
            "wave_height": vec![0.5; HOURS],
            "sea_surface_temperature": vec![19.0; HOURS]
        }
    })
}

/// Mock Open-Meteo: Sellin is colder than the rest
async fn mock_open_meteo() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "54.38"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(21.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(25.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/marine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(marine_body()))
        .mount(&server)
        .await;

    server
}

fn app(server: &MockServer) -> Router {
    let regions = HashMap::from([(
        "nordost".to_string(),
        vec!["Binz".to_string(), "Prerow".to_string()],
    )]);
    let config = AppConfig {
        forecast_api_url: format!("{}/v1/forecast", server.uri()),
        marine_api_url: format!("{}/v1/marine", server.uri()),
        regions: regions.clone(),
        ..Default::default()
    };

    let cache = create_weather_cache(Duration::from_secs(config.cache_ttl_secs));
    let weather_service = Arc::new(WeatherService::new(reqwest::Client::new(), &config, cache));
    let catalog = Arc::new(BeachCatalog::builtin().with_regions(&regions));

    build_router().with_state(AppState {
        weather_service,
        catalog,
        config: Arc::new(config),
        metrics: None,
    })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_root_and_health() {
    let server = MockServer::start().await;
    let app = app(&server);

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "StrandWetter Deutschland API");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_beaches() {
    let server = MockServer::start().await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/beaches").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "default");
    let ids: Vec<&str> = body["beaches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["Binz", "Sellin", "Göhren", "Baabe"]);
    assert!(body["beaches"][0]["coordinates"]["lat"].is_number());
}

#[tokio::test]
async fn test_list_beaches_by_region() {
    let server = MockServer::start().await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/beaches?region=nordost").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "nordost");
    assert_eq!(body["beaches"].as_array().unwrap().len(), 1);
    assert_eq!(body["beaches"][0]["id"], "Binz");

    let (_, body) = get(&app, "/api/beaches?region=mallorca").await;
    assert_eq!(body["region"], "default");
    assert_eq!(body["beaches"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_beach_weather_is_scored_and_cached() {
    let server = mock_open_meteo().await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/weather/Binz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["beach"], "Binz");
    assert_eq!(body["cached"], false);
    assert_eq!(body["data"]["beach"], "Binz");
    assert_eq!(body["data"]["beach_score"], 100);
    assert!(body["data"]["best_time"].is_string());
    assert_eq!(
        body["data"]["forecast"]["hourly"]["time"]
            .as_array()
            .unwrap()
            .len(),
        HOURS
    );

    let (status, body) = get(&app, "/api/weather/Binz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cached"], true);

    // One forecast and one marine call despite two requests
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_unknown_beach_is_404() {
    let server = MockServer::start().await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/weather/Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "BEACH_NOT_FOUND");
}

#[tokio::test]
async fn test_upstream_error_is_502() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": true,
            "reason": "Cannot initialize WeatherVariable from invalid String value"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/marine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(marine_body()))
        .mount(&server)
        .await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/weather/Binz").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Cannot initialize WeatherVariable"));
}

#[tokio::test]
async fn test_malformed_upstream_is_502() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"latitude": 54.4})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/marine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(marine_body()))
        .mount(&server)
        .await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/weather/Binz").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "INVALID_RESPONSE");
}

#[tokio::test]
async fn test_all_beaches_weather() {
    let server = mock_open_meteo().await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/weather").await;
    assert_eq!(status, StatusCode::OK);

    let beaches = body.as_object().unwrap();
    assert_eq!(beaches.len(), 4);
    assert_eq!(body["Binz"]["beach_score"], 100);
    assert!(body["Sellin"]["beach_score"].as_u64().unwrap() < 100);
}

#[tokio::test]
async fn test_recommendations_are_ranked() {
    let server = mock_open_meteo().await;
    let app = app(&server);

    let (status, body) = get(&app, "/api/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "default");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 4);

    let scores: Vec<u64> = recommendations
        .iter()
        .map(|r| r["score"].as_u64().unwrap())
        .collect();
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(scores, sorted);
    assert_eq!(recommendations[3]["beach"], "Sellin");

    let top = &recommendations[0];
    assert_eq!(top["current_temp"], 25.0);
    assert_eq!(top["current_weather"], "Sonnig");
    assert_eq!(top["reasons"].as_array().unwrap().len(), 5);
    assert_eq!(
        top["activities"],
        json!(["sunbathing", "swimming", "family"])
    );
}

#[tokio::test]
async fn test_recommendations_for_empty_region_is_404() {
    let server = MockServer::start().await;
    let regions = HashMap::from([("leer".to_string(), vec!["Prerow".to_string()])]);
    let config = AppConfig {
        forecast_api_url: format!("{}/v1/forecast", server.uri()),
        marine_api_url: format!("{}/v1/marine", server.uri()),
        ..Default::default()
    };
    let weather_service = Arc::new(WeatherService::new(
        reqwest::Client::new(),
        &config,
        create_weather_cache(Duration::from_secs(60)),
    ));
    let app = build_router().with_state(AppState {
        weather_service,
        catalog: Arc::new(BeachCatalog::builtin().with_regions(&regions)),
        config: Arc::new(config),
        metrics: None,
    });

    let (status, body) = get(&app, "/api/recommendations?region=leer").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_BEACHES_CONFIGURED");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let server = MockServer::start().await;
    let app = app(&server);

    let (status, _) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
