//! HTTP client for the remote supplier export and the backend product API.

mod endpoint;

use std::time::Duration;

use reqwest::{Client, StatusCode};

use kitbag_core::AggregateProduct;

use crate::error::FeedError;
use crate::rate_limit::retry_with_backoff;
use crate::types::ApiResponse;

/// Fetches feed text and backend products over HTTP.
///
/// Rate limiting (429), network failures and 5xx responses are retried with
/// exponential backoff up to `max_retries` additional attempts. 404 and other
/// non-2xx statuses come back as typed errors.
pub struct FeedClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl FeedClient {
    /// Creates a client with the given timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Downloads a supplier export as text.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidUrl`] if `url` is not an http(s) URL.
    /// - [`FeedError::RateLimited`] / [`FeedError::Http`] once retries run out.
    /// - [`FeedError::NotFound`] / [`FeedError::UnexpectedStatus`] for non-2xx responses.
    pub async fn fetch_feed_text(&self, url: &str) -> Result<String, FeedError> {
        let url = endpoint::parse_http_url(url)?.to_string();
        let text = self.get_text(&url, "text/csv,text/plain;q=0.9,*/*;q=0.8").await?;
        tracing::info!(url = %url, bytes = text.len(), "downloaded supplier feed");
        Ok(text)
    }

    /// Fetches every product from `GET {api_url}/products`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Api`] when the envelope reports `success: false`,
    /// [`FeedError::Deserialize`] when the body is not the expected JSON, and
    /// the transport errors of [`Self::fetch_feed_text`].
    pub async fn fetch_backend_products(
        &self,
        api_url: &str,
    ) -> Result<Vec<AggregateProduct>, FeedError> {
        let url = endpoint::products_url(api_url)?;
        let body = self.get_text(&url, "application/json").await?;

        let envelope: ApiResponse<Vec<AggregateProduct>> = serde_json::from_str(&body)
            .map_err(|e| FeedError::Deserialize {
                context: format!("product list from {url}"),
                source: e,
            })?;
        let products = envelope
            .into_result()
            .map_err(|message| FeedError::Api { message })?;

        tracing::info!(url = %url, products = products.len(), "fetched backend products");
        Ok(products)
    }

    async fn get_text(&self, url: &str, accept: &str) -> Result<String, FeedError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, accept)
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(FeedError::RateLimited {
                    host: endpoint::host_of(url),
                    retry_after_secs,
                });
            }

            if status == StatusCode::NOT_FOUND {
                return Err(FeedError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(FeedError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
