//! Folds decoded feed rows into one [`AggregateProduct`] per handle.
//!
//! The export repeats parent fields on the first row of each product and
//! leaves them blank on follow-up rows, which carry extra images and further
//! variants. A handle's product is created by the first row that has a title;
//! rows seen for a handle before that are dropped, images included.

use std::collections::HashMap;

use rust_decimal::Decimal;

use kitbag_core::{AggregateProduct, VariantRecord};

use crate::decode::RawRecord;
use crate::html::strip_html;
use crate::parse_helpers::{parse_leading_decimal, parse_leading_int};

/// Column names of the supplier export.
pub mod columns {
    pub const HANDLE: &str = "Handle";
    pub const TITLE: &str = "Title";
    pub const BODY_HTML: &str = "Body (HTML)";
    pub const VENDOR: &str = "Vendor";
    pub const TYPE: &str = "Type";
    pub const TAGS: &str = "Tags";
    pub const PUBLISHED: &str = "Published";
    pub const OPTION1_NAME: &str = "Option1 Name";
    pub const OPTION1_VALUE: &str = "Option1 Value";
    pub const OPTION2_NAME: &str = "Option2 Name";
    pub const OPTION2_VALUE: &str = "Option2 Value";
    pub const VARIANT_SKU: &str = "Variant SKU";
    pub const VARIANT_GRAMS: &str = "Variant Grams";
    pub const VARIANT_INVENTORY_QTY: &str = "Variant Inventory Qty";
    pub const VARIANT_PRICE: &str = "Variant Price";
    pub const VARIANT_COMPARE_AT_PRICE: &str = "Variant Compare At Price";
    pub const IMAGE_SRC: &str = "Image Src";
    pub const VARIANT_IMAGES: &str = "Variant Images";
}

/// Option name given to variants whose row has none.
pub const DEFAULT_OPTION_NAME: &str = "Title";

/// Groups records by handle, in order of each handle's first titled row.
#[must_use]
pub fn group_by_handle(records: &[RawRecord]) -> Vec<AggregateProduct> {
    let mut products: Vec<AggregateProduct> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut orphan_rows = 0usize;

    for record in records {
        let Some(handle) = record.field(columns::HANDLE) else {
            continue;
        };

        let slot = if let Some(&slot) = index.get(handle) {
            slot
        } else {
            let Some(title) = record.field(columns::TITLE) else {
                orphan_rows += 1;
                continue;
            };
            products.push(new_product(handle, title, record));
            index.insert(handle.to_owned(), products.len() - 1);
            products.len() - 1
        };
        let product = &mut products[slot];

        if let Some(src) = record.field(columns::IMAGE_SRC) {
            if !product.images.iter().any(|existing| existing == src) {
                product.images.push(src.to_owned());
            }
        }

        if let Some(sku) = record.field(columns::VARIANT_SKU) {
            let variant = build_variant(sku, &product.title, record);
            product.variants.push(variant);
        }
    }

    if orphan_rows > 0 {
        tracing::debug!(orphan_rows, "dropped rows seen before their product's title row");
    }
    tracing::info!(unique_products = products.len(), "grouped feed rows by handle");

    products
}

fn new_product(handle: &str, title: &str, record: &RawRecord) -> AggregateProduct {
    let tags = record
        .field(columns::TAGS)
        .map(|tags| tags.split(',').map(|t| t.trim().to_owned()).collect())
        .unwrap_or_default();

    AggregateProduct {
        handle: handle.to_owned(),
        title: title.to_owned(),
        description: strip_html(record.get(columns::BODY_HTML).unwrap_or_default()),
        vendor: record.get(columns::VENDOR).unwrap_or_default().to_owned(),
        product_type: record.get(columns::TYPE).unwrap_or_default().to_owned(),
        tags,
        published: record.get(columns::PUBLISHED) == Some("TRUE"),
        images: record
            .field(columns::IMAGE_SRC)
            .map(|src| vec![src.to_owned()])
            .unwrap_or_default(),
        variants: Vec::new(),
    }
}

fn build_variant(sku: &str, parent_title: &str, record: &RawRecord) -> VariantRecord {
    let price = record
        .field(columns::VARIANT_PRICE)
        .and_then(parse_leading_decimal)
        .filter(|p| *p >= Decimal::ZERO)
        .unwrap_or(Decimal::ZERO);

    // Zero, negative and unparsable compare-at prices all mean "no markdown".
    // A negative value would otherwise invert pricing into a negative `price`.
    let compare_at_price = record
        .field(columns::VARIANT_COMPARE_AT_PRICE)
        .and_then(parse_leading_decimal)
        .filter(|p| *p > Decimal::ZERO);

    let weight_grams = record
        .field(columns::VARIANT_GRAMS)
        .and_then(parse_leading_int)
        .and_then(|g| u32::try_from(g).ok())
        .unwrap_or(0);

    let inventory_qty = record
        .field(columns::VARIANT_INVENTORY_QTY)
        .and_then(parse_leading_int)
        .unwrap_or(0);

    VariantRecord {
        sku: sku.to_owned(),
        option1_name: record
            .field(columns::OPTION1_NAME)
            .unwrap_or(DEFAULT_OPTION_NAME)
            .to_owned(),
        option1_value: record
            .field(columns::OPTION1_VALUE)
            .unwrap_or(parent_title)
            .to_owned(),
        option2_name: record.field(columns::OPTION2_NAME).map(str::to_owned),
        option2_value: record.field(columns::OPTION2_VALUE).map(str::to_owned),
        price,
        compare_at_price,
        weight_grams,
        inventory_qty,
        in_stock: inventory_qty > 0,
        images: record
            .field(columns::VARIANT_IMAGES)
            .map(|src| vec![src.to_owned()])
            .unwrap_or_default(),
    }
}

#[cfg(test)]
#[path = "group_test.rs"]
mod tests;
