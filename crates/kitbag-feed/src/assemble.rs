//! Turns grouped products into storefront catalog entries and derives the
//! category index.

use kitbag_core::{
    AggregateProduct, Catalog, CatalogEntry, CatalogRules, CatalogVariant, Category,
    CategoryIndexEntry,
};

use crate::badge::{resolve_badge, resolve_price};
use crate::brand::BrandExtractor;
use crate::classify::Classifier;
use crate::group::DEFAULT_OPTION_NAME;
use crate::size::SizeNormalizer;

/// Characters of plain-text description kept on a catalog entry.
pub const DESCRIPTION_CHARS: usize = 150;

/// Keeps products whose supplier type contains one of the relevant types,
/// compared case-insensitively.
#[must_use]
pub fn filter_relevant(
    products: Vec<AggregateProduct>,
    rules: &CatalogRules,
) -> Vec<AggregateProduct> {
    let relevant: Vec<String> = rules
        .relevant_types
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    products
        .into_iter()
        .filter(|p| {
            let product_type = p.product_type.to_lowercase();
            relevant.iter().any(|t| product_type.contains(t.as_str()))
        })
        .collect()
}

/// Maps products to catalog entries with sequential ids from `start_id`.
///
/// Products without variants are skipped and do not consume an id.
#[must_use]
pub fn assemble_entries(
    products: &[AggregateProduct],
    rules: &CatalogRules,
    start_id: u32,
) -> Vec<CatalogEntry> {
    let classifier = Classifier::new(rules);
    let brands = BrandExtractor::new(rules);
    let sizes = SizeNormalizer::new(rules);

    let mut entries = Vec::with_capacity(products.len());
    let mut next_id = start_id;

    for product in products {
        let Some(base) = product.base_variant() else {
            tracing::debug!(handle = %product.handle, "skipping product without variants");
            continue;
        };

        let pricing = resolve_price(base);
        let has_sizes = has_sizes(product);
        let (size_list, variant_detail) = if has_sizes {
            let detail: Vec<CatalogVariant> = product
                .variants
                .iter()
                .map(|v| CatalogVariant {
                    size: sizes.normalize(&v.option1_name, &v.option1_value),
                    sku: v.sku.clone(),
                    price: v.price,
                    compare_at_price: v.markdown_price(),
                    inventory_qty: v.inventory_qty,
                    in_stock: v.in_stock,
                })
                .collect();
            let list = sizes.sort_sizes(detail.iter().map(|v| v.size.clone()).collect());
            (Some(list), Some(detail))
        } else {
            (None, None)
        };

        entries.push(CatalogEntry {
            id: next_id,
            name: product.title.clone(),
            category: classifier.classify(&product.product_type, &product.title),
            price: pricing.price,
            special_price: pricing.special_price,
            image: product.primary_image().unwrap_or_default().to_owned(),
            description: product.description.chars().take(DESCRIPTION_CHARS).collect(),
            in_stock: base.in_stock,
            stock_quantity: base.inventory_qty,
            badge: resolve_badge(&product.tags, &product.variants),
            brand: brands.extract(&product.title),
            has_sizes,
            sizes: size_list,
            variants: variant_detail,
            weight: base.weight_grams,
            sku: base.sku.clone(),
        });
        next_id = next_id.saturating_add(1);
    }

    entries
}

/// A product is sized when it has several variants or any variant carries a
/// real option name.
fn has_sizes(product: &AggregateProduct) -> bool {
    product.variants.len() > 1
        || product
            .variants
            .iter()
            .any(|v| !v.option1_name.eq_ignore_ascii_case(DEFAULT_OPTION_NAME))
}

/// One index entry per category present, in order of first appearance.
#[must_use]
pub fn build_category_index(
    entries: &[CatalogEntry],
    rules: &CatalogRules,
) -> Vec<CategoryIndexEntry> {
    let mut seen: Vec<Category> = Vec::new();
    let mut index = Vec::new();

    for entry in entries {
        if seen.contains(&entry.category) {
            continue;
        }
        seen.push(entry.category);
        let name = entry.category.as_str();
        index.push(CategoryIndexEntry {
            id: name.to_owned(),
            name: name.to_owned(),
            description: format!("{name} {}", rules.category_description_suffix),
            image: entry.image.clone(),
        });
    }

    index
}

/// Assembles the full catalog: entries first, then the category index.
#[must_use]
pub fn assemble_catalog(
    products: &[AggregateProduct],
    rules: &CatalogRules,
    start_id: u32,
) -> Catalog {
    let products = assemble_entries(products, rules, start_id);
    let categories = build_category_index(&products, rules);
    Catalog {
        products,
        categories,
    }
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
