//! Blocking client for the hosted REST view that serves position rows.
//!
//! Authenticates with a static key sent both as `apikey` and as a bearer
//! token. No retry: a failed fetch surfaces as an error and the caller
//! decides whether to fall back to a cached snapshot.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::info;

use crate::config;
use crate::error::{InventoryError, Result};
use crate::models::InventoryPosition;
use crate::rest_query::RestQuery;

pub struct RestClient {
    project_url: String,
    api_key: String,
    timeout: Duration,
    client: Option<Client>,
}

impl RestClient {
    pub fn new(project_url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            project_url: project_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let mut headers = HeaderMap::new();
            let key = HeaderValue::from_str(&self.api_key).map_err(|_| {
                InventoryError::InvalidArgument("API key is not a valid header value".into())
            })?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
                InventoryError::InvalidArgument("API key is not a valid header value".into())
            })?;
            headers.insert("apikey", key);
            headers.insert(AUTHORIZATION, bearer);

            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .default_headers(headers)
                    .build()?,
            );
        }
        self.client
            .as_ref()
            .ok_or_else(|| InventoryError::InvalidArgument("HTTP client unavailable".into()))
    }

    /// Full URL of a view endpoint.
    pub fn view_url(&self, view: &str) -> String {
        format!("{}/{}/{}", self.project_url, config::REST_PREFIX, view)
    }

    /// Fetch a view and return the raw JSON body.
    pub fn fetch_raw(&mut self, query: &RestQuery) -> Result<String> {
        let (view, params) = query.build();
        let url = self.view_url(&view);
        info!(%url, "fetching positions");

        let client = self.client()?.clone();
        let resp = client.get(&url).query(&params).send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(InventoryError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Fetch and decode position rows.
    pub fn fetch_positions(&mut self, query: &RestQuery) -> Result<Vec<InventoryPosition>> {
        let body = self.fetch_raw(query)?;
        decode_positions(&body)
    }

    /// Drop the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

/// Decode a positions response body.
pub fn decode_positions(body: &str) -> Result<Vec<InventoryPosition>> {
    let positions: Vec<InventoryPosition> = serde_json::from_str(body)?;
    info!(rows = positions.len(), "fetched positions");
    Ok(positions)
}
