//! Helpers shared by the unit tests: a fake weather provider served on a
//! local port and an application wired up against it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{Body, to_bytes};
use axum::extract::{Query, State};
use axum::http::{self, Request, StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use tokio::net::TcpListener;

use crate::app::{AppState, build_router};
use crate::config::DEFAULT_ICON_URL_TEMPLATE;
use crate::database::create_sqlite_pool;
use crate::weather::WeatherClient;

pub const PARIS_BODY: &str = r#"{
    "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
    "main": {"temp": 18.5, "feels_like": 17.9, "pressure": 1021, "humidity": 60},
    "name": "Paris",
    "cod": 200
}"#;

/// A fresh database file in the temp directory.
pub fn temp_database_path() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!(
        "weather-history-test-{}-{}-{}.sqlite3",
        std::process::id(),
        nanos,
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ))
}

#[derive(Clone)]
pub struct FakeProvider {
    port: u16,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    response: Arc<Mutex<(StatusCode, String, Vec<u8>)>>,
}

impl FakeProvider {
    pub async fn spawn(status: StatusCode, body: &str) -> FakeProvider {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let provider = FakeProvider {
            port: listener.local_addr().unwrap().port(),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new((
                status,
                "application/json".to_string(),
                body.as_bytes().to_vec(),
            ))),
        };
        let app = Router::new()
            .route("/data/2.5/weather", get(current_weather))
            .with_state(provider.clone());
        tokio::spawn(async move { axum::serve(listener, app).await });
        provider
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/data/2.5/weather", self.port)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn respond_with(&self, status: StatusCode, body: &str) {
        self.respond_with_bytes(status, "application/json", body.as_bytes());
    }

    pub fn respond_with_bytes(&self, status: StatusCode, content_type: &str, body: &[u8]) {
        *self.response.lock().unwrap() = (status, content_type.to_string(), body.to_vec());
    }
}

async fn current_weather(
    State(provider): State<FakeProvider>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    provider.calls.fetch_add(1, Ordering::SeqCst);
    provider.requests.lock().unwrap().push(params);
    let (status, content_type, body) = provider.response.lock().unwrap().clone();
    (status, [(CONTENT_TYPE, content_type)], body).into_response()
}

pub async fn test_app_with_provider_url(url: &str) -> (Router, AppState) {
    let database = create_sqlite_pool(temp_database_path()).await.unwrap();
    let state = AppState::new(
        database,
        WeatherClient::new(url, "test-key"),
        DEFAULT_ICON_URL_TEMPLATE,
    );
    (build_router(state.clone()), state)
}

pub async fn test_app(status: StatusCode, body: &str) -> (Router, AppState, FakeProvider) {
    let provider = FakeProvider::spawn(status, body).await;
    let (app, state) = test_app_with_provider_url(&provider.url()).await;
    (app, state, provider)
}

pub fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri("/weather")
        .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_string(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub fn history_request() -> Request<Body> {
    Request::builder()
        .method(http::Method::GET)
        .uri("/history")
        .body(Body::empty())
        .unwrap()
}
