// Scripted stand-in for the recipe-wheel API, served in-process on an
// ephemeral port.
#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use recipe_wheel::App;
use recipe_wheel::domain::Credentials;
use recipe_wheel::interface_adapters::clients::ApiClient;
use recipe_wheel::interface_adapters::storage::InMemoryKeyValueStore;
use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};
use url::Url;

// Wheel file the real API serves next to its endpoints.
pub const BUNDLED_WHEEL: &str = include_str!("../../data/wheel-config.json");

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("expected a JSON request body")
    }
}

#[derive(Default)]
struct Script {
    // Replies per path, consumed in order. An exhausted path answers 404.
    replies: HashMap<String, VecDeque<(StatusCode, String)>>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone)]
pub struct FakeApi {
    pub base_url: Url,
    script: Arc<Mutex<Script>>,
}

impl FakeApi {
    // Bind to an ephemeral port and serve until the test runtime shuts down.
    pub async fn start() -> Self {
        let script = Arc::new(Mutex::new(Script::default()));
        let router = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&script));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("fake api failed");
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).expect("valid base url"),
            script,
        }
    }

    pub fn reply(&self, path: &str, status: StatusCode, body: impl Into<String>) {
        let mut script = self.script.lock().expect("script mutex poisoned");
        script
            .replies
            .entry(path.to_string())
            .or_default()
            .push_back((status, body.into()));
    }

    pub fn reply_json(&self, path: &str, body: serde_json::Value) {
        self.reply(path, StatusCode::OK, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .requests
            .clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.path == path)
            .collect()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(
            self.base_url.clone(),
            Credentials::new(),
            Some(Duration::from_secs(5)),
        )
        .expect("expected client to build")
    }

    // Wires an app against this server. The returned store handle shares its
    // entries with the app.
    pub async fn app(&self) -> (App, InMemoryKeyValueStore) {
        let store = InMemoryKeyValueStore::new();
        let app = self.app_with_store(store.clone()).await;
        (app, store)
    }

    pub async fn app_with_store(&self, store: InMemoryKeyValueStore) -> App {
        App::new(self.client(), Arc::new(store)).await
    }
}

pub async fn stored(store: &InMemoryKeyValueStore, key: &str) -> Option<String> {
    store.entries.lock().await.get(key).cloned()
}

async fn handle(
    State(script): State<Arc<Mutex<Script>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut script = script.lock().expect("script mutex poisoned");
    script.requests.push(RecordedRequest {
        method,
        path: path.clone(),
        authorization,
        body,
    });

    match script.replies.get_mut(&path).and_then(VecDeque::pop_front) {
        Some((status, body)) => {
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// A port nothing listens on.
pub fn unreachable_base_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("valid base url")
}
