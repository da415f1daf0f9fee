//! End-to-end ingestion: decode, group, filter and assemble.
//!
//! Every stage here is synchronous and pure over its input. Reading the
//! export is the only fallible step; data-quality problems are counted in
//! the [`ImportReport`] instead.

use std::path::Path;

use kitbag_core::{AggregateProduct, Catalog, CatalogRules};

use crate::assemble::{assemble_catalog, filter_relevant};
use crate::decode::{decode, DecodeStats};
use crate::error::FeedError;
use crate::group::group_by_handle;

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub catalog: Catalog,
    pub decode: DecodeStats,
    pub rows_parsed: usize,
    pub unique_products: usize,
    pub relevant_products: usize,
    /// Relevant products dropped because they had no variants.
    pub skipped_without_variants: usize,
}

/// Reads a local supplier export.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file is missing or unreadable.
pub fn read_feed(path: &Path) -> Result<String, FeedError> {
    let text = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), chars = text.chars().count(), "read supplier feed");
    Ok(text)
}

/// Runs the full pipeline over raw export text.
#[must_use]
pub fn import_feed(text: &str, rules: &CatalogRules, start_id: u32) -> ImportReport {
    let decoded = decode(text);
    let rows_parsed = decoded.records.len();

    let products = group_by_handle(&decoded.records);
    let unique_products = products.len();

    let relevant = filter_relevant(products, rules);
    let relevant_products = relevant.len();
    tracing::info!(unique_products, relevant_products, "filtered products by supplier type");

    let catalog = assemble_catalog(&relevant, rules, start_id);
    let report = ImportReport {
        skipped_without_variants: relevant_products - catalog.products.len(),
        catalog,
        decode: decoded.stats,
        rows_parsed,
        unique_products,
        relevant_products,
    };
    log_summary(&report.catalog);
    report
}

/// Maps products served by the backend API straight to a catalog.
///
/// Unlike [`import_feed`] no supplier-type filter applies; products without
/// variants are skipped with a warning.
#[must_use]
pub fn catalog_from_backend(
    products: &[AggregateProduct],
    rules: &CatalogRules,
    start_id: u32,
) -> Catalog {
    for product in products.iter().filter(|p| !p.has_variants()) {
        tracing::warn!(handle = %product.handle, "backend product has no variants, skipping");
    }
    let catalog = assemble_catalog(products, rules, start_id);
    log_summary(&catalog);
    catalog
}

fn log_summary(catalog: &Catalog) {
    tracing::info!(
        catalog_entries = catalog.products.len(),
        categories = catalog.categories.len(),
        "assembled catalog"
    );
    for (category, count) in catalog.category_counts() {
        tracing::info!(category = %category, products = count, "category summary");
    }
}
