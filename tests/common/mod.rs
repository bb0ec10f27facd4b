#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use portfolio_service::{
    db::{Backend, migrate},
    identity::{Identity, IdentityProvider, model::AuthenticatedUser},
    portfolio::{
        controller::PortfolioController, repository::PortfolioRepository,
        service::PortfolioService,
    },
    server::Server,
};
use rand::Rng;
use serde_json::Value;
use sqlx::{AnyPool, any::AnyPoolOptions, any::install_default_drivers};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

pub async fn setup_test_db() -> AnyPool {
    install_default_drivers();
    let timestamp: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();
    let db_name = format!("test_{}", timestamp);
    let database_url = format!("sqlite:file:{}?mode=memory&cache=shared", db_name);

    // A single long-lived connection keeps the in-memory DB alive.
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to create in-memory SQLite DB");

    migrate(&pool, Backend::Sqlite)
        .await
        .expect("Failed to create test tables");

    pool
}

pub async fn setup_service() -> (PortfolioService, AnyPool) {
    let pool = setup_test_db().await;
    let service = PortfolioService::new(PortfolioRepository::new(pool.clone()));
    (service, pool)
}

/// `Bearer <user>` authenticates as `<user>`, `Bearer down` simulates an
/// unreachable identity service, anything else is unauthenticated.
pub struct TokenIdentity;

#[async_trait]
impl IdentityProvider for TokenIdentity {
    async fn resolve(&self, authorization: Option<&str>) -> Identity {
        match authorization.and_then(|v| v.strip_prefix("Bearer ")) {
            Some("down") => Identity::UpstreamUnavailable,
            Some(user) if !user.is_empty() => Identity::Authenticated(AuthenticatedUser {
                id: user.to_string(),
            }),
            _ => Identity::Unauthenticated,
        }
    }
}

pub async fn setup_controller() -> (Arc<PortfolioController>, AnyPool) {
    let pool = setup_test_db().await;
    let controller = PortfolioController::from_pool(pool.clone(), Arc::new(TokenIdentity));
    (Arc::new(controller), pool)
}

pub fn get(path: &str, token: Option<&str>) -> String {
    let mut raw = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n", path);
    if let Some(token) = token {
        raw.push_str(&format!("Authorization: Bearer {}\r\n", token));
    }
    raw.push_str("\r\n");
    raw
}

pub fn post(path: &str, token: Option<&str>, body: &str) -> String {
    let mut raw = format!(
        "POST {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n",
        path,
        body.len()
    );
    if let Some(token) = token {
        raw.push_str(&format!("Authorization: Bearer {}\r\n", token));
    }
    raw.push_str("\r\n");
    raw.push_str(body);
    raw
}

/// Runs one raw request through the server and returns status code and JSON body.
pub async fn send(controller: &Arc<PortfolioController>, raw: &str) -> (u16, Value) {
    let mut out = Vec::new();
    Server::handle_client(raw.as_bytes(), &mut out, controller)
        .await
        .expect("handle_client failed");
    let text = String::from_utf8(out).expect("response is not UTF-8");
    let (head, body) = text.split_once("\r\n\r\n").expect("no header terminator");
    let code = head
        .split_whitespace()
        .nth(1)
        .and_then(|c| c.parse().ok())
        .expect("no status code");
    (code, serde_json::from_str(body).expect("body is not JSON"))
}

/// A tiny stand-in for the user service. Answers by bearer token:
/// `good` -> user "user-1", `numeric` -> user 42, `nouser` -> `{"user": null}`,
/// `noid` -> `{"user": {}}`,
/// `garbage` -> 200 with a non-JSON body, `slow` -> answers after 2s,
/// anything else -> 401.
pub async fn spawn_identity_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind identity server");
    let address = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let (reader, mut writer) = stream.into_split();
                let mut reader = BufReader::new(reader);
                let mut authorization = None;
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line == "\r\n" => break,
                        Ok(_) => {
                            if let Some((k, v)) = line.split_once(':') {
                                if k.trim().eq_ignore_ascii_case("authorization") {
                                    authorization = Some(v.trim().to_string());
                                }
                            }
                        }
                    }
                }

                let (status, body) = match authorization.as_deref() {
                    Some("Bearer good") => ("200 OK", r#"{"user":{"id":"user-1","email":"a@b.c"}}"#),
                    Some("Bearer numeric") => ("200 OK", r#"{"user":{"id":42}}"#),
                    Some("Bearer nouser") => ("200 OK", r#"{"user":null}"#),
                    Some("Bearer noid") => ("200 OK", r#"{"user":{}}"#),
                    Some("Bearer garbage") => ("200 OK", "<html>oops</html>"),
                    Some("Bearer slow") => {
                        tokio::time::sleep(Duration::from_secs(2)).await;
                        ("200 OK", r#"{"user":{"id":"late"}}"#)
                    }
                    _ => ("401 Unauthorized", r#"{"error":"invalid token"}"#),
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = writer.write_all(response.as_bytes()).await;
                let _ = writer.shutdown().await;
            });
        }
    });

    format!("http://{}/current-user", address)
}
