use std::str::FromStr;

use super::*;

fn row(pairs: &[(&str, &str)]) -> RawRecord {
    RawRecord::from_pairs(pairs.iter().copied())
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn main_row(handle: &str, title: &str, sku: &str, image: &str) -> RawRecord {
    row(&[
        ("Handle", handle),
        ("Title", title),
        ("Body (HTML)", "<p>Thai &amp; leather</p>"),
        ("Vendor", "Playwell"),
        ("Type", "Boxing Gloves"),
        ("Tags", "hot , leather,"),
        ("Published", "TRUE"),
        ("Option1 Name", "Gloves"),
        ("Option1 Value", "10oz"),
        ("Variant SKU", sku),
        ("Variant Price", "54.99"),
        ("Variant Inventory Qty", "3"),
        ("Variant Grams", "700"),
        ("Image Src", image),
    ])
}

fn follow_row(handle: &str, sku: &str, image: &str) -> RawRecord {
    row(&[
        ("Handle", handle),
        ("Title", ""),
        ("Option1 Value", "12oz"),
        ("Variant SKU", sku),
        ("Variant Price", "59.99"),
        ("Image Src", image),
    ])
}

#[test]
fn groups_rows_by_handle_in_first_appearance_order() {
    let records = vec![
        main_row("b", "Fairtex Gloves", "B-1", ""),
        main_row("a", "Twins Gloves", "A-1", ""),
        follow_row("b", "B-2", ""),
    ];
    let products = group_by_handle(&records);
    let handles: Vec<&str> = products.iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, vec!["b", "a"]);
    assert_eq!(products[0].variants.len(), 2);
    assert_eq!(products[1].variants.len(), 1);
}

#[test]
fn main_row_populates_parent_fields() {
    let products = group_by_handle(&[main_row("h1", "Twins Gloves", "S1", "img1")]);
    let p = &products[0];
    assert_eq!(p.title, "Twins Gloves");
    assert_eq!(p.description, "Thai & leather");
    assert_eq!(p.vendor, "Playwell");
    assert_eq!(p.product_type, "Boxing Gloves");
    assert_eq!(p.tags, vec!["hot", "leather", ""]);
    assert!(p.published);
    assert_eq!(p.images, vec!["img1"]);
}

#[test]
fn published_requires_literal_true() {
    let mut record = main_row("h1", "Gloves", "S1", "");
    record = RawRecord::from_pairs(
        record
            .iter()
            .map(|(k, v)| (k, if k == "Published" { "true" } else { v })),
    );
    assert!(!group_by_handle(&[record])[0].published);
}

#[test]
fn title_less_row_before_title_row_is_lost() {
    let records = vec![
        follow_row("h1", "EARLY", "early.jpg"),
        main_row("h1", "Gloves", "S1", "main.jpg"),
    ];
    let products = group_by_handle(&records);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].images, vec!["main.jpg"]);
    assert_eq!(products[0].variants.len(), 1);
    assert_eq!(products[0].variants[0].sku, "S1");
}

#[test]
fn title_less_rows_append_variants_and_images() {
    let records = vec![
        main_row("h1", "Gloves", "S1", "one.jpg"),
        follow_row("h1", "S2", "two.jpg"),
    ];
    let p = &group_by_handle(&records)[0];
    assert_eq!(p.images, vec!["one.jpg", "two.jpg"]);
    assert_eq!(p.variants[1].sku, "S2");
    assert_eq!(p.variants[1].option1_value, "12oz");
}

#[test]
fn duplicate_images_are_dropped_in_order() {
    let records = vec![
        main_row("h1", "Gloves", "S1", "one.jpg"),
        follow_row("h1", "", "two.jpg"),
        follow_row("h1", "", "one.jpg"),
        follow_row("h1", "", "two.jpg"),
    ];
    let p = &group_by_handle(&records)[0];
    assert_eq!(p.images, vec!["one.jpg", "two.jpg"]);
}

#[test]
fn rows_without_handle_are_ignored() {
    let records = vec![main_row("", "Gloves", "S1", "one.jpg")];
    assert!(group_by_handle(&records).is_empty());
}

#[test]
fn row_without_sku_contributes_only_images() {
    let records = vec![main_row("h1", "Gloves", "", "one.jpg")];
    let p = &group_by_handle(&records)[0];
    assert!(p.variants.is_empty());
    assert_eq!(p.images, vec!["one.jpg"]);
}

#[test]
fn variant_defaults_option_name_and_value() {
    let record = row(&[
        ("Handle", "h1"),
        ("Title", "Skipping Rope"),
        ("Variant SKU", "R1"),
        ("Variant Price", "9.99"),
    ]);
    let v = &group_by_handle(&[record])[0].variants[0];
    assert_eq!(v.option1_name, "Title");
    assert_eq!(v.option1_value, "Skipping Rope");
    assert!(v.option2_name.is_none());
    assert!(v.option2_value.is_none());
}

#[test]
fn follow_row_option_value_defaults_to_parent_title() {
    let records = vec![
        main_row("h1", "Gloves", "S1", ""),
        row(&[("Handle", "h1"), ("Variant SKU", "S2")]),
    ];
    let v = &group_by_handle(&records)[0].variants[1];
    assert_eq!(v.option1_value, "Gloves");
}

#[test]
fn variant_numeric_fields_parse_leniently() {
    let record = row(&[
        ("Handle", "h1"),
        ("Title", "Gloves"),
        ("Variant SKU", "S1"),
        ("Variant Price", "not a price"),
        ("Variant Compare At Price", "64.99"),
        ("Variant Grams", "-10"),
        ("Variant Inventory Qty", "4.0"),
        ("Option2 Name", "Colour"),
        ("Option2 Value", "Red"),
        ("Variant Images", "variant.jpg"),
    ]);
    let v = &group_by_handle(&[record])[0].variants[0];
    assert_eq!(v.price, Decimal::ZERO);
    assert_eq!(v.compare_at_price, Some(dec("64.99")));
    assert_eq!(v.weight_grams, 0);
    assert_eq!(v.inventory_qty, 4);
    assert!(v.in_stock);
    assert_eq!(v.option2_name.as_deref(), Some("Colour"));
    assert_eq!(v.option2_value.as_deref(), Some("Red"));
    assert_eq!(v.images, vec!["variant.jpg"]);
}

#[test]
fn zero_compare_at_price_is_absent() {
    let record = row(&[
        ("Handle", "h1"),
        ("Title", "Gloves"),
        ("Variant SKU", "S1"),
        ("Variant Price", "10"),
        ("Variant Compare At Price", "0.00"),
    ]);
    let v = &group_by_handle(&[record])[0].variants[0];
    assert!(v.compare_at_price.is_none());
}

#[test]
fn negative_compare_at_price_is_absent() {
    let record = row(&[
        ("Handle", "h1"),
        ("Title", "Gloves"),
        ("Variant SKU", "S1"),
        ("Variant Price", "10"),
        ("Variant Compare At Price", "-5"),
    ]);
    let v = &group_by_handle(&[record])[0].variants[0];
    assert!(v.compare_at_price.is_none());
    assert!(v.markdown_price().is_none());
}

#[test]
fn non_positive_inventory_is_out_of_stock() {
    let record = row(&[
        ("Handle", "h1"),
        ("Title", "Gloves"),
        ("Variant SKU", "S1"),
        ("Variant Inventory Qty", "-2"),
    ]);
    let v = &group_by_handle(&[record])[0].variants[0];
    assert_eq!(v.inventory_qty, -2);
    assert!(!v.in_stock);
}

#[test]
fn variant_images_stay_off_the_parent_gallery() {
    let record = row(&[
        ("Handle", "h1"),
        ("Title", "Gloves"),
        ("Variant SKU", "S1"),
        ("Variant Images", "variant.jpg"),
    ]);
    let p = &group_by_handle(&[record])[0];
    assert!(p.images.is_empty());
}
