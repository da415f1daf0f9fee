//! `kitbag sync`: backend product API to catalog artifact.

use anyhow::Context;
use kitbag_core::AppConfig;
use kitbag_feed::{catalog_from_backend, FeedClient};

use crate::output::emit_catalog;
use crate::RunSettings;

/// Fetches every backend product, maps it and writes the catalog.
///
/// # Errors
///
/// Fails when the API is unreachable, reports failure, or returns a body
/// that does not parse, and when the artifact cannot be written.
pub(crate) async fn run_sync(
    config: &AppConfig,
    api_url: &str,
    settings: &RunSettings,
) -> anyhow::Result<()> {
    let client = FeedClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .context("failed to build API client")?;

    let products = client
        .fetch_backend_products(api_url)
        .await
        .with_context(|| format!("failed to fetch products from {api_url}"))?;

    let catalog = catalog_from_backend(&products, &settings.rules, settings.start_id);
    tracing::info!(
        backend_products = products.len(),
        catalog_entries = catalog.products.len(),
        "sync complete"
    );

    emit_catalog(&catalog, settings)
}
