#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{routing::post, Json, Router};
use reqwest::StatusCode;
use serde_json::{json, Value};

use hack4change_api::{
    app,
    config::{AppConfig, StoreBackend},
    database::MemoryGateway,
    state::AppState,
};

/// Router served in-process over a fresh in-memory store. Each test gets its
/// own server, so tests never observe each other's data.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.backend = StoreBackend::Memory;
    config.security.jwt_secret = "integration-test-secret".to_string();
    config
}

async fn serve(router: Router) -> Result<(u16, String)> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok((port, format!("http://127.0.0.1:{}", port)))
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(configure: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let mut config = test_config();
        configure(&mut config);

        let state = AppState::new(config, Arc::new(MemoryGateway::new()))?;
        let (port, base_url) = serve(app(state)).await?;

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        read(request.send().await?).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        let mut request = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        read(request.send().await?).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut request = self.client.delete(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        read(request.send().await?).await
    }

    /// Registers `username` with `<username>@example.com` and a fixed password.
    pub async fn register(&self, username: &str) -> Result<Session> {
        let (status, body) = self
            .post("/auth/register", None, registration(username))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
        session_from(&body)
    }

    pub async fn create_project(&self, session: &Session, name: &str) -> Result<String> {
        let (status, body) = self
            .post(
                "/space/create-space",
                Some(&session.token),
                json!({ "project_name": name }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create-space failed: {} {}", status, body);
        string_at(&body, "/data/project/id")
    }
}

pub const PASSWORD: &str = "correct horse battery";

pub fn registration(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "first_name": "Test",
        "password": PASSWORD,
        "confirm_password": PASSWORD,
    })
}

pub fn session_from(body: &Value) -> Result<Session> {
    Ok(Session {
        token: string_at(body, "/data/token")?,
        user_id: string_at(body, "/data/user_id")?,
    })
}

pub fn string_at(body: &Value, pointer: &str) -> Result<String> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("missing {} in {}", pointer, body))
}

async fn read(response: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}

/// Stand-in for the external skill generator.
pub struct FakeGenerator {
    pub url: String,
    pub failing_url: String,
}

impl FakeGenerator {
    pub async fn start() -> Result<Self> {
        let router = Router::new()
            .route(
                "/generate",
                post(|Json(request): Json<Value>| async move {
                    Json(json!({
                        "topic": request["topic"],
                        "intro": format!("An introduction to {}", request["topic"].as_str().unwrap_or("")),
                        "questions": [
                            { "id": "q1", "prompt": "Write a function that returns 1." },
                            { "id": 2, "prompt": "Reverse a string." }
                        ]
                    }))
                }),
            )
            .route(
                "/broken",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            );

        let (_, base_url) = serve(router).await?;
        Ok(Self {
            url: format!("{}/generate", base_url),
            failing_url: format!("{}/broken", base_url),
        })
    }
}
