use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quest_proxy::api::create_router;
use quest_proxy::cache::MemoryCache;
use quest_proxy::clients::HttpGateway;
use quest_proxy::config::EnvironmentConfig;
use quest_proxy::state::AppState;

const API_KEY: &str = "test-api-key";
const NOTCH_ID: &str = "069a79f444e94726a5befca90e38aaf5";

struct TestApp {
    router: Router,
    hypixel: MockServer,
    mojang: MockServer,
}

async fn spawn_app() -> TestApp {
    spawn_app_with_timeout("2").await
}

async fn spawn_app_with_timeout(upstream_timeout_secs: &'static str) -> TestApp {
    let hypixel = MockServer::start().await;
    let mojang = MockServer::start().await;

    let hypixel_url = hypixel.uri();
    let mojang_url = mojang.uri();
    let config = EnvironmentConfig::from_lookup(|name: &str| match name {
        "HYPIXEL_API_KEY" => Some(API_KEY.to_string()),
        "HYPIXEL_API_URL" => Some(hypixel_url.clone()),
        "MOJANG_API_URL" => Some(mojang_url.clone()),
        "UPSTREAM_TIMEOUT_SECS" => Some(upstream_timeout_secs.to_string()),
        _ => None,
    })
    .unwrap();

    let gateway = Arc::new(HttpGateway::new(&config.upstream).unwrap());
    let state = AppState::new(&config, Arc::new(MemoryCache::new()), gateway);

    TestApp {
        router: create_router(state, &config.cors_origins),
        hypixel,
        mojang,
    }
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn mount_catalog(server: &MockServer) {
    let quests = r#"{
        "success": true,
        "lastUpdated": 1700000000000,
        "quests": {
            "skyblock": [
                {"id": "talk", "name": "Talk to the Farmer", "description": "Say hi",
                 "rewards": [{"type": "CoinReward", "amount": 5}], "objectives": [], "requirements": []},
                {"id": "explore", "name": "Explore", "description": "Walk around",
                 "rewards": [{"type": "MultipliedExperienceReward", "amount": 1500}],
                 "objectives": [], "requirements": [{"type": "DailyResetQuestRequirement"}]}
            ],
            "duels": [
                {"id": "win", "name": "Win", "description": "Win a duel", "rewards": [], "objectives": [], "requirements": []},
                {"id": "play", "name": "Play", "description": "Play a duel",
                 "rewards": [{"type": "MultipliedExperienceReward", "amount": 250}], "objectives": [], "requirements": []}
            ]
        }
    }"#;
    let games = json!({
        "success": true,
        "games": {
            "SKYBLOCK": {"id": 63, "name": "SkyBlock", "databaseName": "SkyBlock"},
            "DUELS": {"id": 61, "name": "Duels", "databaseName": "Duels"}
        }
    });

    Mock::given(method("GET"))
        .and(path("/v2/resources/quests"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(quests, "application/json"))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/resources/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(games))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_notch(app: &TestApp, expected_stats_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/Notch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": NOTCH_ID, "name": "Notch"})))
        .expect(1)
        .mount(&app.mojang)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/player"))
        .and(query_param("uuid", NOTCH_ID))
        .and(header_eq("API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "player": {
                "uuid": NOTCH_ID,
                "displayname": "Notch",
                "networkExp": 98765.4,
                "quests": {
                    "a": {"completions": [{"time": 1}, {"time": 2}]},
                    "b": {"completions": [{"time": 3}]},
                    "c": {"active": {"started": 4}}
                }
            }
        })))
        .expect(expected_stats_calls)
        .mount(&app.hypixel)
        .await;
}

#[tokio::test]
async fn test_quests_endpoint_joins_and_caches() {
    let app = spawn_app().await;
    mount_catalog(&app.hypixel).await;

    let (status, body) = get(&app.router, "/quests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"name": "SkyBlock", "quests": [
                {"name": "Explore", "description": "Walk around", "xp": 1500, "daily": true},
                {"name": "Talk to the Farmer", "description": "Say hi", "xp": 0, "daily": false}
            ]},
            {"name": "Duels", "quests": [
                {"name": "Play", "description": "Play a duel", "xp": 250, "daily": false},
                {"name": "Win", "description": "Win a duel", "xp": 0, "daily": false}
            ]}
        ])
    );

    // Segunda petición servida desde cache: los mocks esperan una sola llamada
    let (status, cached) = get(&app.router, "/quests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cached, body);
}

#[tokio::test]
async fn test_quests_upstream_failure_is_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/v2/resources/quests"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"success": false, "cause": "Maintenance"})))
        .mount(&app.hypixel)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/resources/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "games": {}})))
        .mount(&app.hypixel)
        .await;

    let (status, body) = get(&app.router, "/quests").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert_eq!(body["details"]["upstream_error"], "Maintenance");
}

#[tokio::test]
async fn test_quests_upstream_timeout_is_bad_gateway() {
    let app = spawn_app_with_timeout("1").await;
    Mock::given(method("GET"))
        .and(path("/v2/resources/quests"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "quests": {}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&app.hypixel)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/resources/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "games": {}})))
        .mount(&app.hypixel)
        .await;

    let (status, body) = get(&app.router, "/quests").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert_eq!(body["details"]["upstream_error"], "request timed out");
}

#[tokio::test]
async fn test_unrelated_reward_amounts_are_ignored() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/v2/resources/quests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "quests": {
                "arcade": [{"name": "Party", "description": "Play party games", "requirements": [],
                            "rewards": [
                                {"type": "CoinReward", "amount": 1.5},
                                {"type": "MultipliedExperienceReward", "amount": 100}
                            ]}]
            }
        })))
        .mount(&app.hypixel)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/resources/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "games": {"ARCADE": {"name": "Arcade", "databaseName": "Arcade"}}
        })))
        .mount(&app.hypixel)
        .await;

    let (status, body) = get(&app.router, "/quests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["quests"][0]["xp"], 100);
}

#[tokio::test]
async fn test_player_endpoint_and_identity_cache() {
    let app = spawn_app().await;
    mount_notch(&app, 1).await;

    let (status, body) = get(&app.router, "/player?username=Notch").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"uuid": NOTCH_ID, "username": "Notch", "xp": 98765, "quests_completed": 3})
    );

    // Otra capitalización: identidad y estadísticas salen del cache
    let (status, again) = get(&app.router, "/player?username=nOtCh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, body);
}

#[tokio::test]
async fn test_unknown_player_is_404_without_stats_call() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/nobody_here"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "path": "/users/profiles/minecraft/nobody_here",
            "errorMessage": "Couldn't find any profile with name nobody_here"
        })))
        .expect(1)
        .mount(&app.mojang)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/player"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.hypixel)
        .await;

    let (status, body) = get(&app.router, "/player?username=nobody_here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Couldn't find any profile with name nobody_here");
}

#[tokio::test]
async fn test_empty_mojang_reply_is_404() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/ghost"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.mojang)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/player"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.hypixel)
        .await;

    let (status, body) = get(&app.router, "/player?username=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Couldn't find any profile with name ghost");
}

#[tokio::test]
async fn test_rejected_name_is_404() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/bad.name"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "CONSTRAINT_VIOLATION",
            "errorMessage": "getProfileName.name: Invalid profile name"
        })))
        .mount(&app.mojang)
        .await;

    let (status, body) = get(&app.router, "/player?username=bad.name").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "getProfileName.name: Invalid profile name");
}

#[tokio::test]
async fn test_stats_failure_is_server_error() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/users/profiles/minecraft/Notch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": NOTCH_ID, "name": "Notch"})))
        .mount(&app.mojang)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/player"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"success": false, "cause": "Invalid API key"})))
        .mount(&app.hypixel)
        .await;

    let (status, body) = get(&app.router, "/player?username=Notch").await;
    assert!(status.is_server_error());
    assert_eq!(body["details"]["status"], 403);
}

#[tokio::test]
async fn test_player_requires_username() {
    let app = spawn_app().await;

    let (status, body) = get(&app.router, "/player").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = get(&app.router, "/player?username=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cors_allow_list() {
    let app = spawn_app().await;
    mount_catalog(&app.hypixel).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/quests")
                .header(header::ORIGIN, "https://quest.renntg.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://quest.renntg.com"
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = get(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cache"], true);
}
