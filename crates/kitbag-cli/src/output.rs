//! Rendering and writing the catalog artifact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use serde::Serialize;

use kitbag_core::{Catalog, CatalogEntry, CategoryIndexEntry};

use crate::RunSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// `{generatedAt, totalProducts, products, categories}`
    Json,
    /// TypeScript module exporting `products` and `categories`
    Ts,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogArtifact<'a> {
    generated_at: String,
    total_products: usize,
    products: &'a [CatalogEntry],
    categories: &'a [CategoryIndexEntry],
}

/// Renders `catalog` in `format`, stamped with `generated_at`.
pub(crate) fn render(
    catalog: &Catalog,
    format: OutputFormat,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    let stamp = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    match format {
        OutputFormat::Json => {
            let artifact = CatalogArtifact {
                generated_at: stamp,
                total_products: catalog.products.len(),
                products: &catalog.products,
                categories: &catalog.categories,
            };
            let mut out = serde_json::to_string_pretty(&artifact)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Ts => Ok(format!(
            "/**\n * Auto-generated products from the supplier feed\n * Generated: {stamp}\n * Total products: {total}\n */\n\nexport const products = {products};\n\nexport const categories = {categories};\n",
            total = catalog.products.len(),
            products = serde_json::to_string_pretty(&catalog.products)?,
            categories = serde_json::to_string_pretty(&catalog.categories)?,
        )),
    }
}

/// Writes `contents` to `path` through a temporary sibling file and a rename,
/// so readers never observe a partial artifact.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("output path {} has no file name", path.display()))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp_path = dir.join(tmp_name);

    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("failed to write catalog to {}", path.display()));
    }
    Ok(())
}

/// Renders and writes the catalog unless this is a dry run.
pub(crate) fn emit_catalog(catalog: &Catalog, settings: &RunSettings) -> anyhow::Result<()> {
    if settings.dry_run {
        println!(
            "dry-run: would write {} products in {} categories to {}",
            catalog.products.len(),
            catalog.categories.len(),
            settings.output_path.display()
        );
        return Ok(());
    }

    let rendered = render(catalog, settings.format, Utc::now())?;
    write_atomic(&settings.output_path, &rendered)?;
    tracing::info!(
        path = %settings.output_path.display(),
        products = catalog.products.len(),
        "catalog written"
    );
    println!(
        "wrote {} products to {}",
        catalog.products.len(),
        settings.output_path.display()
    );
    Ok(())
}
