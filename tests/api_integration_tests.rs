//! Integration Tests for API Endpoints
//!
//! Drives the full router over a canned transport that answers by operation
//! name, so every endpoint runs through the limiter, cache and aggregation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tarkov_gateway::{
    api::create_router,
    client::{GraphQlRequest, GraphQlResponse, Transport, TransportError},
    error::ServiceFault,
    AppState, Config,
};
use tower::ServiceExt;

// == Canned Transport ==

#[derive(Clone)]
enum Canned {
    Data(Value),
    Faults(Vec<&'static str>),
    ConnectionRefused,
}

struct CannedTransport {
    routes: Vec<(&'static str, Canned)>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GraphQlRequest>>,
}

impl CannedTransport {
    fn new(routes: Vec<(&'static str, Canned)>) -> Arc<Self> {
        Arc::new(Self {
            routes,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_variables(&self) -> Option<Value> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|r| r.variables.clone())
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn execute(&self, request: &GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let canned = self
            .routes
            .iter()
            .find(|(operation, _)| request.query.contains(operation))
            .map(|(_, canned)| canned.clone())
            .unwrap_or(Canned::Data(json!({})));

        match canned {
            Canned::Data(data) => Ok(GraphQlResponse {
                data: Some(data),
                errors: None,
            }),
            Canned::Faults(messages) => Ok(GraphQlResponse {
                data: None,
                errors: Some(messages.into_iter().map(ServiceFault::new).collect()),
            }),
            Canned::ConnectionRefused => {
                Err(TransportError::Connect("connection refused".into()))
            }
        }
    }
}

// == Helper Functions ==

fn create_test_app(transport: Arc<CannedTransport>) -> Router {
    create_test_app_with(Config::default(), transport)
}

fn create_test_app_with(config: Config, transport: Arc<CannedTransport>) -> Router {
    let state = AppState::from_config(&config, transport).unwrap();
    create_router(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn boss(id: &str, normalized: &str, chance: f64) -> Value {
    json!({
        "boss": { "id": id, "name": id, "normalizedName": normalized },
        "spawnChance": chance
    })
}

// == Ammo Endpoint Tests ==

#[tokio::test]
async fn test_ammo_endpoint_serves_from_cache() {
    let transport = CannedTransport::new(vec![(
        "GetAmmoItems",
        Canned::Data(json!({
            "items": [{ "id": "a", "name": "5.45x39mm PS gs", "properties": { "penetrationPower": 28 } }]
        })),
    )]);
    let app = create_test_app(transport.clone());

    let (status, first) = get(&app, "/ammo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first[0]["name"], "5.45x39mm PS gs");
    assert_eq!(first[0]["properties"]["penetrationPower"], 28);

    let (_, second) = get(&app, "/ammo").await;
    assert_eq!(first, second);
    assert_eq!(transport.calls(), 1);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["cache"]["hits"], 1);
    assert_eq!(stats["cache"]["fetches"], 1);
    assert_eq!(stats["cache"]["total_entries"], 1);
}

#[tokio::test]
async fn test_ammo_endpoint_forwards_query() {
    let transport = CannedTransport::new(vec![("GetAmmoItems", Canned::Data(json!({ "items": [] })))]);
    let app = create_test_app(transport.clone());

    let (status, _) = get(&app, "/ammo?limit=5&offset=10&lang=de").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        transport.last_variables(),
        Some(json!({ "limit": 5, "offset": 10, "lang": "de" }))
    );
}

#[tokio::test]
async fn test_top_ammo_endpoint() {
    let transport = CannedTransport::new(vec![(
        "GetAmmoItems",
        Canned::Data(json!({
            "items": [
                { "id": "1", "name": "PS", "properties": { "penetrationPower": 28 } },
                { "id": "2", "name": "BT", "properties": { "penetrationPower": 40 } },
                { "id": "3", "name": "BS", "properties": { "penetrationPower": 54 } }
            ]
        })),
    )]);
    let app = create_test_app(transport);

    let (status, body) = get(&app, "/ammo/top?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["BS", "BT"]);
}

// == Map Endpoint Tests ==

#[tokio::test]
async fn test_maps_endpoint() {
    let transport = CannedTransport::new(vec![(
        "GetMaps",
        Canned::Data(json!({
            "maps": [
                { "id": "m1", "name": "Customs", "normalizedName": "customs", "raidDuration": 40 },
                { "id": "m2", "name": "Woods", "normalizedName": "woods" }
            ]
        })),
    )]);
    let app = create_test_app(transport);

    let (status, body) = get(&app, "/maps").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["raidDuration"], 40);
}

#[tokio::test]
async fn test_map_endpoint_not_found_is_bad_gateway() {
    let transport = CannedTransport::new(vec![("GetMapById", Canned::Data(json!({ "map": null })))]);
    let app = create_test_app(transport);

    let (status, body) = get(&app, "/maps/unknown-id").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["kind"], "protocol");
    assert_eq!(body["error"]["message"], "Map with ID unknown-id not found");
}

#[tokio::test]
async fn test_map_bosses_endpoint() {
    let transport = CannedTransport::new(vec![(
        "GetMapById",
        Canned::Data(json!({
            "map": {
                "id": "m1",
                "name": "Customs",
                "bosses": [
                    boss("Reshala", "reshala", 0.38),
                    boss("Raider", "raider", 1.0),
                    boss("Knight", "knight", 0.43)
                ]
            }
        })),
    )]);
    let app = create_test_app(transport.clone());

    let (status, body) = get(&app, "/maps/m1/bosses?lang=ru").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["boss"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["Knight", "Reshala"]);
    assert_eq!(
        transport.last_variables(),
        Some(json!({ "id": "m1", "lang": "ru" }))
    );
}

// == Aggregate Endpoint Tests ==

#[tokio::test]
async fn test_bosses_endpoint_merges_across_maps() {
    let transport = CannedTransport::new(vec![(
        "GetAllBosses",
        Canned::Data(json!({
            "maps": [
                { "id": "1", "name": "Map1", "bosses": [boss("bossA", "a", 0.3), boss("bossB", "b", 0.5)] },
                { "id": "2", "name": "Map2", "bosses": [boss("bossA", "a", 0.6)] }
            ]
        })),
    )]);
    let app = create_test_app(transport);

    let (status, body) = get(&app, "/bosses").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": "bossA", "name": "bossA", "spawnRate": 0.6, "maps": ["Map1", "Map2"] },
            { "id": "bossB", "name": "bossB", "spawnRate": 0.5, "maps": ["Map1"] }
        ])
    );
}

#[tokio::test]
async fn test_high_value_items_endpoint() {
    let transport = CannedTransport::new(vec![(
        "GetHighValueItems",
        Canned::Data(json!({
            "items": [
                { "id": "z", "name": "Z" },
                { "id": "y", "name": "Y", "avg24hPrice": 100 },
                { "id": "x", "name": "X", "avg24hPrice": 100 }
            ]
        })),
    )]);
    let app = create_test_app(transport);

    let (status, body) = get(&app, "/items/high-value").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["X", "Y", "Z"]);
}

// == Error Mapping Tests ==

#[tokio::test]
async fn test_service_faults_render_with_details() {
    let transport = CannedTransport::new(vec![(
        "GetMaps",
        Canned::Faults(vec!["Cannot query field \"foo\"", "Unknown argument"]),
    )]);
    let app = create_test_app(transport.clone());

    let (status, body) = get(&app, "/maps").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["kind"], "protocol");
    assert_eq!(
        body["error"]["message"],
        "Cannot query field \"foo\"; Unknown argument"
    );
    assert_eq!(body["error"]["faults"].as_array().unwrap().len(), 2);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_rate_limited_is_too_many_requests() {
    let config = Config {
        rate_limit_capacity: 1.0,
        rate_limit_refill_per_sec: 0.001,
        ..Config::default()
    };
    let transport = CannedTransport::new(vec![("GetMaps", Canned::Data(json!({ "maps": [] })))]);
    let app = create_test_app_with(config, transport.clone());

    let (status, _) = get(&app, "/maps").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/bosses").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["kind"], "rate_limited");
    assert_eq!(
        body["error"]["message"],
        "Rate limit exceeded. Please wait before making another request."
    );
    assert_eq!(transport.calls(), 1);

    // Cached results are still served without a token
    let (status, _) = get(&app, "/maps").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_is_service_unavailable_after_retries() {
    let transport = CannedTransport::new(vec![("GetMaps", Canned::ConnectionRefused)]);
    let app = create_test_app(transport.clone());

    let (status, body) = get(&app, "/maps").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["kind"], "network");
    assert_eq!(
        body["error"]["message"],
        "Network error: Unable to connect to Tarkov API"
    );
    assert_eq!(transport.calls(), 4);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["cache"]["fetch_failures"], 1);
    assert_eq!(stats["cache"]["total_entries"], 0);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(CannedTransport::new(Vec::new()));

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_stats_reports_available_tokens() {
    let app = create_test_app(CannedTransport::new(Vec::new()));

    let (status, body) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_capacity"], 100.0);
    assert_eq!(body["available_tokens"], 100.0);
    assert_eq!(body["hit_rate"], 0.0);
}
