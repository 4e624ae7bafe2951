use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use init_settings::{AdminSettings, InitSettings, InstanceSettings, RetrySettings};
use jamf_init::init::{run_initialization, InitOutcome};

/// Counts the requests each mock endpoint received.
#[derive(Default)]
struct Hits {
    status_checks: AtomicUsize,
    initializes: AtomicUsize,
}

fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

fn settings_for(base_url: &str, max_attempts: u32, attempt_delay_secs: u64) -> InitSettings {
    InitSettings {
        instance: InstanceSettings::new(base_url, "TEST-CODE"),
        admin: AdminSettings {
            username: String::from("jamf-admin"),
            password: String::from("pw-pw-pw-pw-pw-pw-pw-pw-pw-pw-pw"),
            email: None,
            institution_name: String::from("Jamf"),
        },
        retry: RetrySettings {
            max_attempts,
            attempt_delay_secs,
        },
        ..InitSettings::default()
    }
}

async fn startup_status_pending(State(hits): State<Arc<Hits>>) -> Json<Value> {
    hits.status_checks.fetch_add(1, Ordering::SeqCst);
    Json(json!({"setupAssistantNecessary": true, "step": "Setup Assistant"}))
}

async fn startup_status_done(State(hits): State<Arc<Hits>>) -> Json<Value> {
    hits.status_checks.fetch_add(1, Ordering::SeqCst);
    Json(json!({"setupAssistantNecessary": false}))
}

async fn startup_status_failing(State(hits): State<Arc<Hits>>) -> StatusCode {
    hits.status_checks.fetch_add(1, Ordering::SeqCst);
    StatusCode::SERVICE_UNAVAILABLE
}

async fn initialize_ok(State(hits): State<Arc<Hits>>) -> StatusCode {
    hits.initializes.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn initialize_failing(State(hits): State<Arc<Hits>>) -> StatusCode {
    hits.initializes.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

#[tokio::test]
async fn test_initializes_once_when_setup_pending() {
    let hits = Arc::new(Hits::default());
    let app = Router::new()
        .route("/api/startup-status", get(startup_status_pending))
        .route("/api/v1/system/initialize", post(initialize_ok))
        .with_state(hits.clone());
    let base_url = serve(app);

    let outcome = run_initialization(settings_for(&base_url, 10, 0)).await;
    assert_eq!(outcome, InitOutcome::Initialized);
    assert_eq!(hits.status_checks.load(Ordering::SeqCst), 1);
    assert_eq!(hits.initializes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_skips_initialize_when_already_set_up() {
    let hits = Arc::new(Hits::default());
    let app = Router::new()
        .route("/api/startup-status", get(startup_status_done))
        .route("/api/v1/system/initialize", post(initialize_ok))
        .with_state(hits.clone());
    let base_url = serve(app);

    let outcome = run_initialization(settings_for(&base_url, 10, 0)).await;
    assert_eq!(outcome, InitOutcome::AlreadyInitialized);
    assert_eq!(hits.status_checks.load(Ordering::SeqCst), 1);
    assert_eq!(hits.initializes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_initialize_is_not_retried() {
    let hits = Arc::new(Hits::default());
    let app = Router::new()
        .route("/api/startup-status", get(startup_status_pending))
        .route("/api/v1/system/initialize", post(initialize_failing))
        .with_state(hits.clone());
    let base_url = serve(app);

    let outcome = run_initialization(settings_for(&base_url, 10, 0)).await;
    assert_eq!(outcome, InitOutcome::InitializationFailed);
    assert_eq!(hits.status_checks.load(Ordering::SeqCst), 1);
    assert_eq!(hits.initializes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_exhausts_attempts_with_delay_between_checks() {
    let hits = Arc::new(Hits::default());
    let app = Router::new()
        .route("/api/startup-status", get(startup_status_failing))
        .with_state(hits.clone());
    let base_url = serve(app);

    let started = Instant::now();
    let outcome = run_initialization(settings_for(&base_url, 3, 1)).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, InitOutcome::AttemptsExhausted);
    assert_eq!(hits.status_checks.load(Ordering::SeqCst), 3);
    assert_eq!(hits.initializes.load(Ordering::SeqCst), 0);
    // one delay after each failed check except the last, so two sleeps in
    // total; a third sleep after the final check would push elapsed past 3s
    assert!(elapsed >= Duration::from_secs(2));
    assert!(elapsed < Duration::from_secs(3));
}

#[tokio::test]
async fn test_unreachable_instance_exhausts_attempts() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = run_initialization(settings_for(&format!("http://{}", addr), 2, 0)).await;
    assert_eq!(outcome, InitOutcome::AttemptsExhausted);
}
