//! `kitbag import`: supplier export to catalog artifact.

use std::path::PathBuf;

use anyhow::Context;
use kitbag_core::AppConfig;
use kitbag_feed::{import_feed, read_feed, FeedClient};

use crate::output::emit_catalog;
use crate::RunSettings;

/// Where the export text comes from for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FeedSource {
    File(PathBuf),
    Url(String),
}

/// An explicit `--input` wins, then `--url`, then `KITBAG_FEED_URL`, then
/// `KITBAG_FEED_PATH`.
pub(crate) fn resolve_source(
    config: &AppConfig,
    input: Option<PathBuf>,
    url: Option<String>,
) -> FeedSource {
    if let Some(path) = input {
        return FeedSource::File(path);
    }
    match url.or_else(|| config.feed_url.clone()) {
        Some(url) => FeedSource::Url(url),
        None => FeedSource::File(config.feed_path.clone()),
    }
}

/// Reads or downloads the export, runs the pipeline and writes the catalog.
///
/// # Errors
///
/// Fails when the export cannot be read or downloaded, or the artifact
/// cannot be written. Data-quality problems inside the export never fail
/// the run.
pub(crate) async fn run_import(
    config: &AppConfig,
    input: Option<PathBuf>,
    url: Option<String>,
    settings: &RunSettings,
) -> anyhow::Result<()> {
    let text = match resolve_source(config, input, url) {
        FeedSource::File(path) => {
            read_feed(&path).context("supplier feed is not readable")?
        }
        FeedSource::Url(url) => {
            let client = FeedClient::new(
                config.request_timeout_secs,
                &config.user_agent,
                config.max_retries,
                config.retry_backoff_base_secs,
            )
            .context("failed to build feed client")?;
            client
                .fetch_feed_text(&url)
                .await
                .with_context(|| format!("failed to download supplier feed from {url}"))?
        }
    };

    let report = import_feed(&text, &settings.rules, settings.start_id);
    tracing::info!(
        logical_lines = report.decode.logical_lines,
        skipped_rows = report.decode.skipped_rows,
        rows_parsed = report.rows_parsed,
        unique_products = report.unique_products,
        relevant_products = report.relevant_products,
        skipped_without_variants = report.skipped_without_variants,
        catalog_entries = report.catalog.products.len(),
        "import complete"
    );

    emit_catalog(&report.catalog, settings)
}
