//! Integration tests against a local mock of the firmware's HTTP API.
//!
//! Each test binds an axum server on an ephemeral port and points
//! [`HttpDeviceApi`] at it — real sockets, real JSON bodies.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};

use bbdash_adapter_device_http::HttpDeviceApi;
use bbdash_app::ports::device_api::{ApiError, DeviceApi};
use bbdash_domain::command::{DeviceCommand, DeviceMode};
use bbdash_domain::config::DeviceConfig;

/// Bodies received by the mock device, keyed by path.
#[derive(Debug, Default)]
struct Received {
    config_posts: Vec<Value>,
    command_posts: Vec<Value>,
    time_posts: Vec<Value>,
    restarts: u32,
}

type Shared = Arc<Mutex<Received>>;

fn firmware_router(received: Shared) -> Router {
    Router::new()
        .route(
            "/api/v1/status",
            get(|| async {
                axum::Json(json!({
                    "timestamp": "2026-08-07 10:15:00",
                    "rms": 0.512, "peak": 1.204, "crest": 2.35, "temp": 41.2,
                    "ai_class": 2, "ai_conf": 0.87,
                    "train_active": false, "train_count": 0, "train_target": 0
                }))
            }),
        )
        .route(
            "/api/v1/config",
            get(|| async {
                axum::Json(json!({
                    "wifi_ssid": "home",
                    "mqtt_uri": "broker.local",
                    "mqtt_port": 1883,
                    "mqtt_user": "",
                    "mqtt_topic": "bluebrain/telemetry",
                    "sample_rate": 1000,
                    "n_samples": 1024,
                    "espnow_en": false,
                    "rms_warn": 2.0, "rms_crit": 4.0,
                    "temp_warn": 60.0, "temp_crit": 80.0
                }))
            })
            .post(
                |State(state): State<Shared>, axum::Json(body): axum::Json<Value>| async move {
                    state.lock().unwrap().config_posts.push(body);
                    "OK"
                },
            ),
        )
        .route(
            "/api/v1/command",
            post(
                |State(state): State<Shared>, axum::Json(body): axum::Json<Value>| async move {
                    state.lock().unwrap().command_posts.push(body);
                    "OK"
                },
            ),
        )
        .route(
            "/api/v1/time",
            post(
                |State(state): State<Shared>, axum::Json(body): axum::Json<Value>| async move {
                    state.lock().unwrap().time_posts.push(body);
                    "OK"
                },
            ),
        )
        .route(
            "/api/v1/restart",
            post(|State(state): State<Shared>| async move {
                state.lock().unwrap().restarts += 1;
                "Restarting..."
            }),
        )
        .route(
            "/download_dataset",
            get(|| async { "rms,peak_freq,label\n0.5123,49.80,1\n" }),
        )
        .with_state(received)
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn mock_device() -> (HttpDeviceApi, Shared) {
    let received: Shared = Arc::default();
    let addr = serve(firmware_router(Arc::clone(&received))).await;
    (HttpDeviceApi::new(format!("http://{addr}")), received)
}

#[tokio::test]
async fn should_fetch_and_parse_a_status_snapshot() {
    let (api, _) = mock_device().await;

    let status = api.fetch_status().await.unwrap();

    assert!((status.rms - 0.512).abs() < f64::EPSILON);
    assert_eq!(status.ai_class, 2);
    assert_eq!(status.confidence_percent(), 87);
    assert_eq!(status.timestamp.as_deref(), Some("2026-08-07 10:15:00"));
}

#[tokio::test]
async fn should_fetch_config_without_a_password() {
    let (api, _) = mock_device().await;

    let config = api.fetch_config().await.unwrap();

    assert_eq!(config.wifi_ssid, "home");
    assert_eq!(config.wifi_pass, None);
    assert_eq!(config.mqtt_port, 1883);
}

#[tokio::test]
async fn should_post_config_without_password_key_when_unchanged() {
    let (api, received) = mock_device().await;
    let update = DeviceConfig {
        wifi_ssid: "home".to_string(),
        mqtt_port: 8883,
        ..DeviceConfig::default()
    };

    api.save_config(&update).await.unwrap();

    let posts = &received.lock().unwrap().config_posts;
    assert_eq!(posts.len(), 1);
    assert!(posts[0].get("wifi_pass").is_none());
    assert_eq!(posts[0]["wifi_ssid"], "home");
    assert_eq!(posts[0]["mqtt_port"], 8883);
}

#[tokio::test]
async fn should_post_literal_password_when_changed() {
    let (api, received) = mock_device().await;
    let update = DeviceConfig {
        wifi_pass: Some("new-pass".to_string()),
        ..DeviceConfig::default()
    };

    api.save_config(&update).await.unwrap();

    let posts = &received.lock().unwrap().config_posts;
    assert_eq!(posts[0]["wifi_pass"], "new-pass");
}

#[tokio::test]
async fn should_send_firmware_shaped_command_payloads() {
    let (api, received) = mock_device().await;

    api.send_command(&DeviceCommand::SetMode {
        mode: DeviceMode::Training,
    })
    .await
    .unwrap();
    api.send_command(&DeviceCommand::StartCapture {
        label: 1,
        samples: 100,
        freq_hz: 2.0,
    })
    .await
    .unwrap();
    api.send_command(&DeviceCommand::ClearDataset).await.unwrap();

    let posts = &received.lock().unwrap().command_posts;
    assert_eq!(posts[0], json!({"cmd": "set_mode", "mode": "training"}));
    assert_eq!(
        posts[1],
        json!({"cmd": "start_capture", "label": 1, "samples": 100, "freq_hz": 2.0})
    );
    assert_eq!(posts[2], json!({"cmd": "clear_dataset"}));
}

#[tokio::test]
async fn should_post_epoch_seconds_to_the_time_endpoint() {
    let (api, received) = mock_device().await;

    api.sync_time(1_754_550_000).await.unwrap();

    let posts = &received.lock().unwrap().time_posts;
    assert_eq!(posts[0], json!({"epoch": 1_754_550_000_i64}));
}

#[tokio::test]
async fn should_restart_and_download_the_dataset() {
    let (api, received) = mock_device().await;

    api.restart().await.unwrap();
    let bytes = api.download_dataset().await.unwrap();

    assert_eq!(received.lock().unwrap().restarts, 1);
    assert!(bytes.starts_with(b"rms,peak_freq,label"));
}

#[tokio::test]
async fn should_map_http_500_to_a_status_error() {
    let router = Router::new().route(
        "/api/v1/status",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = serve(router).await;
    let api = HttpDeviceApi::new(format!("http://{addr}"));

    let err = api.fetch_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500 }));
}

#[tokio::test]
async fn should_map_malformed_bodies_to_a_decode_error() {
    let router = Router::new().route("/api/v1/status", get(|| async { "not json" }));
    let addr = serve(router).await;
    let api = HttpDeviceApi::new(format!("http://{addr}"));

    let err = api.fetch_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn should_map_a_refused_connection_to_a_transport_error() {
    // Bind and immediately drop to get a port with no listener.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = HttpDeviceApi::new(format!("http://{addr}"));

    let err = api.fetch_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}
