//! Test utilities for paisa-core
//!
//! Provides a mock classification server implementing the remote service's
//! `/login` and `/classify` endpoints, for integration tests of the tier-3
//! client without a real deployment.

use axum::{extract::Json, http::HeaderMap, http::StatusCode, routing::post, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

const MOCK_TOKEN: &str = "mock-token-123";

/// Mock classification server for testing and development
pub struct MockClassifyServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockClassifyServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/login", post(handle_login))
            .route("/classify", post(handle_classify));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockClassifyServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Login endpoint: any credentials get the mock token
async fn handle_login(Json(_request): Json<LoginRequest>) -> Json<LoginResponse> {
    Json(LoginResponse {
        token: MOCK_TOKEN.to_string(),
    })
}

/// Classify endpoint: rejects missing/wrong tokens, otherwise classifies by
/// keyword the way the hosted service would
async fn handle_classify(
    headers: HeaderMap,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, StatusCode> {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {MOCK_TOKEN}"))
        .unwrap_or(false);
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let haystack = format!("{} {}", request.merchant, request.text).to_lowercase();
    let (category, confidence) = if haystack.contains("cafe") || haystack.contains("bakery") {
        ("Food", 0.91)
    } else if haystack.contains("petrol") || haystack.contains("fuel") {
        ("Travel", 0.88)
    } else if haystack.contains("gym") {
        ("Health", 0.86)
    } else {
        ("Unknown", 0.2)
    };

    Ok(Json(ClassifyResponse {
        category: category.to_string(),
        confidence,
        merchant: request.merchant,
    }))
}

// Request/Response types for the mock server

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[allow(dead_code)]
    username: String,
    #[allow(dead_code)]
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    merchant: String,
    #[allow(dead_code)]
    amount: f64,
    text: String,
    #[allow(dead_code)]
    timestamp: i64,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    category: String,
    confidence: f64,
    merchant: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::RemoteClassifier;
    use crate::models::CategoryRequest;

    fn request(merchant: &str, text: &str) -> CategoryRequest {
        CategoryRequest {
            merchant: merchant.to_string(),
            amount: 100.0,
            full_text: text.to_string(),
            timestamp_millis: 0,
        }
    }

    #[tokio::test]
    async fn test_mock_server_classify_known() {
        let server = MockClassifyServer::start().await;
        let client = RemoteClassifier::new(&server.url(), "admin", "password");

        let category = client
            .classify(&request("Corner Cafe", "Rs.100 paid at Corner Cafe"))
            .await
            .unwrap();
        assert_eq!(category, "Food");
    }

    #[tokio::test]
    async fn test_mock_server_classify_unknown() {
        let server = MockClassifyServer::start().await;
        let client = RemoteClassifier::new(&server.url(), "admin", "password");

        let category = client
            .classify(&request("Mystery Shop", "Rs.100 paid"))
            .await
            .unwrap();
        assert_eq!(category, "Unknown");
    }

    #[tokio::test]
    async fn test_classify_fails_against_stopped_server() {
        let mut server = MockClassifyServer::start().await;
        let url = server.url();
        server.stop();
        // Give the listener a moment to wind down
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let client = RemoteClassifier::new(&url, "admin", "password");
        assert!(client.classify(&request("Shop", "text")).await.is_err());
    }
}
