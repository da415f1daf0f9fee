//! Promotional badge and selling-price resolution.

use rust_decimal::Decimal;

use kitbag_core::{Badge, VariantRecord};

/// Picks the badge for a product from its tags, falling back to `Sale` when
/// any variant is marked down.
#[must_use]
pub fn resolve_badge(tags: &[String], variants: &[VariantRecord]) -> Option<Badge> {
    let tags: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let has = |wanted: &[&str]| tags.iter().any(|t| wanted.contains(&t.as_str()));

    if has(&["hot", "bestseller"]) {
        Some(Badge::Hot)
    } else if has(&["sale", "clearance"]) {
        Some(Badge::Sale)
    } else if has(&["new", "new arrival"]) {
        Some(Badge::New)
    } else if variants.iter().any(|v| v.markdown_price().is_some()) {
        Some(Badge::Sale)
    } else {
        None
    }
}

/// Storefront pricing derived from a product's base variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPrice {
    /// The compare-at price when marked down, otherwise the selling price.
    pub price: Decimal,
    /// The selling price, present only when marked down.
    pub special_price: Option<Decimal>,
}

/// Resolves pricing from the base (cheapest) variant.
#[must_use]
pub fn resolve_price(base: &VariantRecord) -> ResolvedPrice {
    match base.markdown_price() {
        Some(compare_at) => ResolvedPrice {
            price: compare_at,
            special_price: Some(base.price),
        },
        None => ResolvedPrice {
            price: base.price,
            special_price: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn variant(price: &str, compare_at: Option<&str>) -> VariantRecord {
        VariantRecord {
            sku: "SKU".to_owned(),
            option1_name: "Title".to_owned(),
            option1_value: "Default".to_owned(),
            option2_name: None,
            option2_value: None,
            price: dec(price),
            compare_at_price: compare_at.map(dec),
            weight_grams: 0,
            inventory_qty: 0,
            in_stock: false,
            images: vec![],
        }
    }

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn hot_outranks_sale_and_new() {
        assert_eq!(
            resolve_badge(&tags(&["New", "Sale", "BestSeller"]), &[]),
            Some(Badge::Hot)
        );
    }

    #[test]
    fn sale_outranks_new() {
        assert_eq!(
            resolve_badge(&tags(&["new arrival", "Clearance"]), &[]),
            Some(Badge::Sale)
        );
    }

    #[test]
    fn new_from_tags() {
        assert_eq!(resolve_badge(&tags(&["NEW"]), &[]), Some(Badge::New));
    }

    #[test]
    fn tags_match_whole_values_only() {
        assert_eq!(resolve_badge(&tags(&["hottest", "renew"]), &[]), None);
    }

    #[test]
    fn markdown_variant_implies_sale() {
        let variants = vec![variant("10", None), variant("12", Some("15"))];
        assert_eq!(resolve_badge(&[], &variants), Some(Badge::Sale));
    }

    #[test]
    fn no_signal_no_badge() {
        assert_eq!(resolve_badge(&tags(&["leather"]), &[variant("10", None)]), None);
    }

    #[test]
    fn markdown_inverts_price_fields() {
        let resolved = resolve_price(&variant("15", Some("25")));
        assert_eq!(resolved.price, dec("25"));
        assert_eq!(resolved.special_price, Some(dec("15")));
    }

    #[test]
    fn plain_price_without_markdown() {
        let resolved = resolve_price(&variant("20", None));
        assert_eq!(resolved.price, dec("20"));
        assert!(resolved.special_price.is_none());
    }
}
