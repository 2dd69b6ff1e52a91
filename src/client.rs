//! HTTP client for the `/info` endpoints of both backends

use std::time::Instant;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::payload::InfoRequest;

pub const INFO_PATH: &str = "/info";

/// JSON-over-POST client bound to one backend
#[derive(Clone)]
pub struct InfoClient {
    client: Client,
    base_url: String,
    name: String,
}

impl InfoClient {
    pub fn new(name: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder().build().map_err(Error::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            name: name.to_string(),
        })
    }

    /// Get the backend name (for logging)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST an info request and parse the answer.
    pub async fn info(&self, payload: &InfoRequest) -> Result<Value> {
        let started = Instant::now();
        let body = self.post(INFO_PATH, payload).await?;
        info!(
            backend = %self.name,
            request_type = %payload.request_type,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "info call finished"
        );
        Ok(body)
    }

    /// POST `payload` as JSON to `path` and parse the response body as JSON.
    ///
    /// The status code is not checked: error bodies are compared like any
    /// other document as long as they are JSON.
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        let raw_body = response.text().await?;
        debug!(backend = %self.name, %status, body = %raw_body, "raw response");

        serde_json::from_str(&raw_body).map_err(|source| Error::Decode {
            backend: self.name.clone(),
            source,
        })
    }
}
