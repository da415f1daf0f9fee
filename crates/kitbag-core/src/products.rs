use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storefront category. The set is closed: every catalog entry lands in
/// exactly one of these, with [`Category::Accessories`] as the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Boxing Gloves")]
    BoxingGloves,
    #[serde(rename = "MMA Gloves")]
    MmaGloves,
    #[serde(rename = "shorts")]
    Shorts,
    #[serde(rename = "shinguards")]
    ShinGuards,
    #[serde(rename = "protection")]
    Protection,
    #[serde(rename = "accessories")]
    Accessories,
    #[serde(rename = "pads")]
    Pads,
    #[serde(rename = "bags")]
    Bags,
}

impl Category {
    /// The serialized name, which doubles as the category index id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::BoxingGloves => "Boxing Gloves",
            Category::MmaGloves => "MMA Gloves",
            Category::Shorts => "shorts",
            Category::ShinGuards => "shinguards",
            Category::Protection => "protection",
            Category::Accessories => "accessories",
            Category::Pads => "pads",
            Category::Bags => "bags",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Promotional badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Hot,
    Sale,
    New,
}

/// One purchasable variant of an [`AggregateProduct`], built from a single
/// feed row that carries a `Variant SKU`.
///
/// Also the `BackendVariant` shape served by the product API, hence the
/// camelCase wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub sku: String,
    /// `"Title"` when the feed row has no option name.
    pub option1_name: String,
    /// The parent title when the feed row has no option value.
    pub option1_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option2_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option2_value: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Pre-markdown reference price. Present only when the variant is marked down.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub weight_grams: u32,
    #[serde(default)]
    pub inventory_qty: i64,
    /// `inventory_qty > 0` for feed-built variants.
    #[serde(default)]
    pub in_stock: bool,
    /// Images scoped to this variant; never merged into the parent gallery.
    #[serde(default)]
    pub images: Vec<String>,
}

impl VariantRecord {
    /// The compare-at price when it signals a real markdown.
    ///
    /// A zero or negative compare-at price is treated the same as a missing one,
    /// which keeps API-sourced variants consistent with feed-built ones.
    #[must_use]
    pub fn markdown_price(&self) -> Option<Decimal> {
        self.compare_at_price.filter(|p| *p > Decimal::ZERO)
    }
}

/// A product family folded together from every feed row sharing a handle.
///
/// Also the `BackendProduct` shape served by the product API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateProduct {
    /// Supplier-assigned stable identifier for the product family.
    pub handle: String,
    pub title: String,
    /// Plain text; HTML has already been stripped.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vendor: String,
    /// Free-text supplier category, e.g. `"Boxing Gloves"`.
    #[serde(default, rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    /// Distinct URLs in order of first appearance; the first is canonical.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
}

impl AggregateProduct {
    /// Returns the lowest-priced variant, the earliest one on ties.
    #[must_use]
    pub fn base_variant(&self) -> Option<&VariantRecord> {
        self.variants
            .iter()
            .reduce(|min, v| if v.price < min.price { v } else { min })
    }

    /// Returns `true` if the product has at least one sellable variant.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Returns the canonical (first) image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Per-variant detail carried on sized catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVariant {
    /// Normalized option1 value, e.g. `"12oz"` or `"XL"`.
    pub size: String,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub compare_at_price: Option<Decimal>,
    pub inventory_qty: i64,
    pub in_stock: bool,
}

/// A storefront-ready product.
///
/// Pricing is inverted when a markdown applies: `price` holds the
/// pre-markdown reference price and `special_price` the current selling price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub special_price: Option<Decimal>,
    /// Canonical image URL, or `""` when the product has none.
    pub image: String,
    /// First 150 characters of the plain-text description.
    pub description: String,
    pub in_stock: bool,
    pub stock_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub brand: String,
    pub has_sizes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<CatalogVariant>>,
    /// Base variant weight in grams.
    pub weight: u32,
    /// Base variant SKU.
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryIndexEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
}

/// The generated artifact consumed by the storefront.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<CatalogEntry>,
    pub categories: Vec<CategoryIndexEntry>,
}

impl Catalog {
    /// Product count per category, in category index order.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        self.categories
            .iter()
            .map(|c| {
                let count = self
                    .products
                    .iter()
                    .filter(|p| p.category.as_str() == c.id)
                    .count();
                (c.name.clone(), count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn variant(sku: &str, price: &str, compare_at: Option<&str>) -> VariantRecord {
        VariantRecord {
            sku: sku.to_owned(),
            option1_name: "Title".to_owned(),
            option1_value: "Default".to_owned(),
            option2_name: None,
            option2_value: None,
            price: Decimal::from_str(price).unwrap(),
            compare_at_price: compare_at.map(|p| Decimal::from_str(p).unwrap()),
            weight_grams: 0,
            inventory_qty: 1,
            in_stock: true,
            images: vec![],
        }
    }

    fn product(variants: Vec<VariantRecord>) -> AggregateProduct {
        AggregateProduct {
            handle: "fairtex-bgv1".to_owned(),
            title: "Fairtex BGV1 Boxing Gloves".to_owned(),
            description: String::new(),
            vendor: "Playwell".to_owned(),
            product_type: "Boxing Gloves".to_owned(),
            tags: vec![],
            published: true,
            images: vec![],
            variants,
        }
    }

    #[test]
    fn base_variant_is_cheapest() {
        let p = product(vec![
            variant("A", "20", None),
            variant("B", "15", Some("25")),
            variant("C", "30", None),
        ]);
        assert_eq!(p.base_variant().unwrap().sku, "B");
    }

    #[test]
    fn base_variant_ties_go_to_first() {
        let p = product(vec![variant("A", "15", None), variant("B", "15", None)]);
        assert_eq!(p.base_variant().unwrap().sku, "A");
    }

    #[test]
    fn base_variant_none_without_variants() {
        assert!(product(vec![]).base_variant().is_none());
    }

    #[test]
    fn markdown_price_ignores_zero() {
        assert!(variant("A", "10", Some("0")).markdown_price().is_none());
        assert_eq!(
            variant("A", "10", Some("12.5")).markdown_price(),
            Some(Decimal::from_str("12.5").unwrap())
        );
    }

    #[test]
    fn category_serializes_to_storefront_names() {
        let json = serde_json::to_string(&[Category::BoxingGloves, Category::ShinGuards]).unwrap();
        assert_eq!(json, r#"["Boxing Gloves","shinguards"]"#);
    }

    #[test]
    fn backend_product_deserializes_from_camel_case() {
        let json = r#"{
            "handle": "twins-fbgvl3",
            "title": "Twins Special Boxing Gloves",
            "description": "Leather gloves",
            "vendor": "Playwell",
            "type": "Boxing Gloves",
            "tags": ["hot"],
            "published": true,
            "images": ["https://cdn.example.com/a.jpg"],
            "variants": [{
                "sku": "TW-10",
                "option1Name": "Gloves",
                "option1Value": "10oz",
                "price": 54.99,
                "compareAtPrice": null,
                "weightGrams": 700,
                "inventoryQty": 3,
                "inStock": true,
                "images": []
            }]
        }"#;
        let p: AggregateProduct = serde_json::from_str(json).unwrap();
        assert_eq!(p.product_type, "Boxing Gloves");
        assert_eq!(p.variants[0].option1_value, "10oz");
        assert_eq!(p.variants[0].price, Decimal::from_str("54.99").unwrap());
        assert!(p.variants[0].compare_at_price.is_none());
    }

    #[test]
    fn catalog_entry_omits_absent_optionals() {
        let entry = CatalogEntry {
            id: 1,
            name: "Hand Wraps".to_owned(),
            category: Category::Accessories,
            price: Decimal::from_str("7.5").unwrap(),
            special_price: None,
            image: String::new(),
            description: String::new(),
            in_stock: true,
            stock_quantity: 4,
            badge: None,
            brand: "Playwell".to_owned(),
            has_sizes: false,
            sizes: None,
            variants: None,
            weight: 100,
            sku: "HW-1".to_owned(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["price"], serde_json::json!(7.5));
        assert_eq!(value["stockQuantity"], serde_json::json!(4));
        assert!(value.get("specialPrice").is_none());
        assert!(value.get("badge").is_none());
        assert!(value.get("sizes").is_none());
    }
}
