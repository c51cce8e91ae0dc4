//! In-process fake of the product backend for flow tests

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use product_forms::context::{FormContext, Session};
use product_forms::services::product_store::ProductStoreClient;
use serde_json::Value;

use crate::fixtures;

/// File part of a recorded multipart request
#[derive(Debug, Clone)]
pub struct RecordedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

/// A create or update request as the backend saw it
#[derive(Debug, Clone)]
pub struct RecordedWrite {
    pub method: &'static str,
    pub path: String,
    pub fields: BTreeMap<String, String>,
    pub file: Option<RecordedFile>,
}

#[derive(Default)]
struct StoreState {
    categories: Value,
    products: HashMap<String, Value>,
    writes: Vec<RecordedWrite>,
    reads: usize,
    fail_writes: bool,
}

/// Shared handle to the fake backend's state
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<StoreState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().categories = fixtures::categories();
        store
    }

    pub fn with_product(self, product_id: &str, record: Value) -> Self {
        self.inner
            .lock()
            .unwrap()
            .products
            .insert(product_id.to_string(), record);
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.inner.lock().unwrap().writes.clone()
    }

    pub fn reads(&self) -> usize {
        self.inner.lock().unwrap().reads
    }

    /// Serve on an ephemeral port; returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/category", get(list_categories))
            .route("/api/products", post(create_product))
            .route("/api/products/{id}", get(get_product).put(update_product))
            .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("No local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend error");
        });

        format!("http://{}/", addr)
    }
}

/// Screen context pointing at `base_url` for the fixture seller.
pub fn context(base_url: &str) -> FormContext {
    let store = ProductStoreClient::new(base_url, Duration::from_secs(5))
        .expect("Failed to build store client");
    FormContext::new(store, Session::new(fixtures::SELLER_ID), fixtures::LISTING_ROUTE)
}

/// Base URL on which nothing is listening.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}/", addr)
}

async fn list_categories(State(store): State<FakeStore>) -> Json<Value> {
    let mut state = store.inner.lock().unwrap();
    state.reads += 1;
    Json(state.categories.clone())
}

async fn get_product(
    State(store): State<FakeStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = store.inner.lock().unwrap();
    state.reads += 1;
    state
        .products
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_product(
    State(store): State<FakeStore>,
    multipart: Multipart,
) -> (StatusCode, String) {
    let (fields, file) = read_multipart(multipart).await;
    record_write(&store, "POST", "/api/products".to_string(), fields, file)
}

async fn update_product(
    State(store): State<FakeStore>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> (StatusCode, String) {
    let (fields, file) = read_multipart(multipart).await;
    record_write(&store, "PUT", format!("/api/products/{}", id), fields, file)
}

fn record_write(
    store: &FakeStore,
    method: &'static str,
    path: String,
    fields: BTreeMap<String, String>,
    file: Option<RecordedFile>,
) -> (StatusCode, String) {
    let mut state = store.inner.lock().unwrap();
    state.writes.push(RecordedWrite {
        method,
        path,
        fields,
        file,
    });
    if state.fail_writes {
        (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable".to_string())
    } else {
        (StatusCode::OK, "saved".to_string())
    }
}

async fn read_multipart(
    mut multipart: Multipart,
) -> (BTreeMap<String, String>, Option<RecordedFile>) {
    let mut fields = BTreeMap::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await.expect("Malformed multipart body") {
        let name = field.name().unwrap_or_default().to_string();
        if name == "pic" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.expect("Failed to read file part");
            file = Some(RecordedFile {
                file_name,
                content_type,
                size: data.len(),
            });
        } else {
            let text = field.text().await.expect("Failed to read text part");
            fields.insert(name, text);
        }
    }

    (fields, file)
}
