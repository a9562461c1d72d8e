//! Remote classification service client (tier 3)
//!
//! Authenticated HTTP client for the hosted classification API: `POST
//! /login` trades credentials for a bearer token, `POST /classify` submits
//! the transaction context and returns a category. Every failure mode
//! (auth, network, parse) surfaces as an `Err` that the resolver maps to
//! "unresolved"; nothing here is ever shown to the user as an error.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::CategoryRequest;

/// Remote classifier over the hosted classification API
#[derive(Clone)]
pub struct RemoteClassifier {
    http_client: Client,
    base_url: String,
    username: String,
    password: String,
}

/// Login request body
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Login response with the bearer token
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Classification request body
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    merchant: &'a str,
    amount: f64,
    text: &'a str,
    timestamp: i64,
}

/// Classification response
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    category: String,
    #[allow(dead_code)]
    confidence: Option<f64>,
}

impl RemoteClassifier {
    /// Create a new remote classifier client
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Returns None when `PAISA_CLASSIFY_HOST` is unset (the remote tier is
    /// optional).
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("PAISA_CLASSIFY_HOST").ok()?;
        let username =
            std::env::var("PAISA_CLASSIFY_USER").unwrap_or_else(|_| "admin".to_string());
        let password = std::env::var("PAISA_CLASSIFY_PASSWORD").unwrap_or_default();
        Some(Self::new(&host, &username, &password))
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }

    async fn login(&self) -> Result<String> {
        let response = self
            .http_client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let login: LoginResponse = response.json().await?;
        Ok(login.token)
    }

    /// Classify a transaction remotely. Logs in first; any failure along the
    /// way propagates as `Err` for the resolver to swallow.
    pub async fn classify(&self, request: &CategoryRequest) -> Result<String> {
        let token = self.login().await?;

        let response = self
            .http_client
            .post(format!("{}/classify", self.base_url))
            .bearer_auth(&token)
            .json(&ClassifyRequest {
                merchant: &request.merchant,
                amount: request.amount,
                text: &request.full_text,
                timestamp: request.timestamp_millis,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let classified: ClassifyResponse = response.json().await?;
        debug!(category = %classified.category, "remote classification response");
        Ok(classified.category)
    }
}
