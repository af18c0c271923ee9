use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use issuetrack::config::Config;
use issuetrack::store::MemoryStore;

/// A running test server instance backed by an in-memory store. The store
/// handle lets tests assert persisted state directly, independent of the
/// response shaping the API applies.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST an issue body to a project, return (body, status).
    pub async fn create_issue(&self, project: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/issues/{project}")))
            .json(body)
            .send()
            .await
            .expect("create issue request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET a project's issues with optional query filters, return (body, status).
    pub async fn list_issues(&self, project: &str, query: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(&format!("/api/issues/{project}")))
            .query(query)
            .send()
            .await
            .expect("list issues request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// PUT an update body, return (body, status).
    pub async fn update_issue(&self, project: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(&format!("/api/issues/{project}")))
            .json(body)
            .send()
            .await
            .expect("update issue request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// DELETE with an `_id` body, return (body, status).
    pub async fn delete_issue(&self, project: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(&format!("/api/issues/{project}")))
            .json(body)
            .send()
            .await
            .expect("delete issue request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app on a random port with a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());

    let config = Config {
        database_url: "postgres://unused-in-tests".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    };

    let app = issuetrack::build_app(store.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
    }
}
