//! HTTP Catalog Client
//!
//! Production `PageSource`/`ItemDetailSource` backed by the public card API.
//! One request per page; retrying a failed page is left to the caller.

use super::protocol::{card_url, set_url, CardResponse};
use super::source::{FetchError, ItemDetailSource, PageSource};
use super::types::Card;
use crate::config::CatalogConfig;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout: config.request_timeout,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let response = self
            .http_client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} returned {}", url, status);
            return Err(map_status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

fn map_status(status: StatusCode) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        other => FetchError::Transient(format!("server responded {}", other)),
    }
}

#[async_trait]
impl PageSource for CatalogClient {
    async fn fetch_page(&self, set_code: &str) -> Result<Vec<Card>, FetchError> {
        let cards: Vec<Card> = self.get_json(set_url(&self.base_url, set_code)).await?;
        tracing::debug!("Fetched {} cards for set {}", cards.len(), set_code);
        Ok(cards)
    }
}

#[async_trait]
impl ItemDetailSource for CatalogClient {
    async fn fetch_item(&self, card_code: &str) -> Result<Card, FetchError> {
        let response: CardResponse = self.get_json(card_url(&self.base_url, card_code)).await?;
        response.into_first().ok_or(FetchError::NotFound)
    }
}
