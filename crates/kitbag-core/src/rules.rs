//! Lookup tables driving classification, brand inference and size handling.
//!
//! The built-in tables mirror the supplier feed the store imports today.
//! A YAML file may replace any top-level key; keys it omits keep their
//! built-in value.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::products::Category;
use crate::ConfigError;

/// Maps a supplier `Type` substring to a storefront category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCategory {
    pub supplier_type: String,
    pub category: Category,
}

/// Title keyword groups checked before the supplier type mapping.
///
/// Precedence between groups is fixed by the classifier; only the keyword
/// contents are configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleKeywords {
    pub accessories: Vec<String>,
    pub protection: Vec<String>,
    pub shinguards: Vec<String>,
    pub pads: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSynonym {
    /// Lowercased, trimmed raw option value.
    pub raw: String,
    pub canonical: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRank {
    pub size: String,
    pub rank: f64,
}

/// Immutable rule tables shared by the classifier, brand extractor and size
/// normalizer for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRules {
    /// Brand used when the title yields nothing better.
    pub fallback_brand: String,
    /// Appended to the category name to form its index description.
    pub category_description_suffix: String,
    /// Supplier types admitted into the catalog (case-insensitive substring).
    pub relevant_types: Vec<String>,
    /// Ordered; the first key contained in the supplier type wins.
    pub type_categories: Vec<TypeCategory>,
    pub title_keywords: TitleKeywords,
    /// Ordered; checked as case-insensitive title prefixes.
    pub known_brands: Vec<String>,
    /// First words that describe the product rather than name a brand.
    pub generic_words: Vec<String>,
    pub size_synonyms: Vec<SizeSynonym>,
    pub size_ranks: Vec<SizeRank>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for TitleKeywords {
    fn default() -> Self {
        Self {
            accessories: strings(&[
                "ankle support",
                "ankle wrap",
                "hand wrap inner",
                "gel hand wrap",
                "inner glove",
                "jump rope",
                "skipping rope",
                "speed rope",
            ]),
            protection: strings(&[
                "thigh pad",
                "knee pad",
                "forearm guard",
                "forearm protector",
                "belly pad",
                "body shield",
                "body protector",
                "body armour",
                "body armor",
                "chest guard",
                "chest protector",
                "rib guard",
                "belly protector",
                "head guard",
                "groin guard",
            ]),
            shinguards: strings(&["shin guard", "shin instep", "shin pad", "shin protection"]),
            pads: strings(&[
                "focus mitt",
                "focus pad",
                "punching mitt",
                "bag mitt",
                "strike shield",
                "training pad",
                "kick pad",
                "thai pad",
                "curved pad",
            ]),
        }
    }
}

impl Default for CatalogRules {
    fn default() -> Self {
        let type_categories = [
            ("Boxing Gloves", Category::BoxingGloves),
            ("Mixed Martial Arts And Grappling Gloves", Category::MmaGloves),
            ("Muay Thai Shorts", Category::Shorts),
            ("Boxing Shorts", Category::Shorts),
            ("Head Guards", Category::Protection),
            ("Shin Guards", Category::ShinGuards),
            ("Shin Protection", Category::ShinGuards),
            ("Lower Body Protection", Category::ShinGuards),
            ("Shin and Forearm Protection", Category::ShinGuards),
            ("Groin Guards", Category::Protection),
            ("Body Protection", Category::Protection),
            ("Muay Thai Body Shields & Belly Pads", Category::Protection),
            ("Chest Guards and Body Armour", Category::Protection),
            (
                "WT Approved Taekwondo Protective Equipment",
                Category::Protection,
            ),
            ("Hand Wraps", Category::Accessories),
            ("Punch Bags", Category::Bags),
            ("Training Equipment", Category::Accessories),
            ("Focus Pads", Category::Pads),
            ("Focus Mitts", Category::Pads),
            ("Thai Kick Pads", Category::Pads),
            ("Strike Shields And Kick Pads", Category::Pads),
            ("Strike Shields", Category::Pads),
            ("Kick Pads", Category::Pads),
            ("Belly Pads", Category::Pads),
            ("Training Pads", Category::Pads),
            ("Skipping Ropes", Category::Accessories),
        ]
        .into_iter()
        .map(|(supplier_type, category)| TypeCategory {
            supplier_type: supplier_type.to_owned(),
            category,
        })
        .collect();

        let size_synonyms = [
            ("x - small", "XS"),
            ("x-small", "XS"),
            ("xsmall", "XS"),
            ("small", "S"),
            ("medium", "M"),
            ("large", "L"),
            ("x - large", "XL"),
            ("x-large", "XL"),
            ("xlarge", "XL"),
            ("x large", "XL"),
            ("xx - large", "XXL"),
            ("xx-large", "XXL"),
            ("xxlarge", "XXL"),
            ("xx large", "XXL"),
            ("xxx - large", "XXXL"),
            ("xxx-large", "XXXL"),
            ("xxxlarge", "XXXL"),
            ("xxx large", "XXXL"),
            ("large / xlarge", "L/XL"),
            ("large / x large", "L/XL"),
            ("large/xlarge", "L/XL"),
            ("large/x large", "L/XL"),
        ]
        .into_iter()
        .map(|(raw, canonical)| SizeSynonym {
            raw: raw.to_owned(),
            canonical: canonical.to_owned(),
        })
        .collect();

        let size_ranks = [
            ("XS", 0.0),
            ("S", 1.0),
            ("M", 2.0),
            ("L", 3.0),
            ("L/XL", 3.5),
            ("XL", 4.0),
            ("XXL", 5.0),
            ("XXXL", 6.0),
        ]
        .into_iter()
        .map(|(size, rank)| SizeRank {
            size: size.to_owned(),
            rank,
        })
        .collect();

        Self {
            fallback_brand: "Playwell".to_owned(),
            category_description_suffix: "for all levels".to_owned(),
            relevant_types: strings(&[
                "Boxing Gloves",
                "Mixed Martial Arts",
                "Muay Thai Shorts",
                "Boxing Shorts",
                "Head Guard",
                "Shin Guard",
                "Shin Protection",
                "Lower Body Protection",
                "Shin and Forearm Protection",
                "Hand Wrap",
                "Focus Mitts",
                "Focus Pads",
                "Thai Kick Pads",
                "Strike Shields",
                "Kick Pads",
                "Belly Pads",
                "Body Shields",
                "Muay Thai Body Shields & Belly Pads",
                "Chest Guards and Body Armour",
                "WT Approved Taekwondo Protective Equipment",
                "Punch Bags",
                "Training Pads",
                "Skipping Ropes",
            ]),
            type_categories,
            title_keywords: TitleKeywords::default(),
            known_brands: strings(&[
                "Twins",
                "Fairtex",
                "Venum",
                "RDX",
                "Everlast",
                "Adidas",
                "Nike",
                "Reebok",
                "Rival",
                "Cleto Reyes",
                "Winning",
                "Grant",
                "Ringside",
                "Title",
                "Hayabusa",
                "Yokkao",
                "Top King",
                "Boon",
                "Raja",
                "Metal Boxe",
                "Bad Boy",
                "Cage Rage",
                "UFC",
                "Fumetsu",
                "Bytomic",
                "Pro Box",
                "Lonsdale",
                "Carbon Claw",
                "Century",
                "Revgear",
                "Anthem",
                "Sandee",
                "Blitz",
                "TUFF",
                "Wacoku",
                "Tusah",
                "Tatami",
                "Sting",
                "Choi",
                "Wicked1",
            ]),
            generic_words: strings(&[
                "adults",
                "adult",
                "childrens",
                "children",
                "kids",
                "youth",
                "junior",
                "boxing",
                "mma",
                "muay",
                "thai",
                "karate",
                "taekwondo",
                "kickboxing",
                "leather",
                "synthetic",
                "vinyl",
                "cotton",
                "mesh",
                "full",
                "semi",
                "curved",
                "square",
                "round",
                "custom",
                "deluxe",
                "elite",
                "focus",
                "kick",
                "punch",
                "strike",
                "training",
                "professional",
                "coaching",
                "weighted",
                "elasticated",
                "dipped",
                "free",
                "small",
                "large",
                "pvc",
                "eva",
                "wtf",
                "wukf",
                "xxxl",
                "instructors",
            ]),
            size_synonyms,
            size_ranks,
        }
    }
}

/// Load and validate rule tables from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<CatalogRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let rules: CatalogRules = serde_yaml::from_str(&content)?;

    validate_rules(&rules)?;

    Ok(rules)
}

fn validate_rules(rules: &CatalogRules) -> Result<(), ConfigError> {
    if rules.fallback_brand.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fallback_brand must be non-empty".to_string(),
        ));
    }

    let mut seen_types = HashSet::new();
    for mapping in &rules.type_categories {
        if mapping.supplier_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "type_categories entries must have a non-empty supplier_type".to_string(),
            ));
        }
        if !seen_types.insert(mapping.supplier_type.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate supplier_type in type_categories: '{}'",
                mapping.supplier_type
            )));
        }
    }

    let keywords = &rules.title_keywords;
    let keyword_groups = [
        ("accessories", &keywords.accessories),
        ("protection", &keywords.protection),
        ("shinguards", &keywords.shinguards),
        ("pads", &keywords.pads),
    ];
    for (group, words) in keyword_groups {
        if words.iter().any(|w| w.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "title_keywords.{group} contains an empty keyword"
            )));
        }
    }

    if rules.known_brands.iter().any(|b| b.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "known_brands contains an empty brand".to_string(),
        ));
    }

    if rules.relevant_types.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "relevant_types contains an empty type".to_string(),
        ));
    }

    for synonym in &rules.size_synonyms {
        if synonym.raw.trim().is_empty() || synonym.canonical.trim().is_empty() {
            return Err(ConfigError::Validation(
                "size_synonyms entries must have non-empty raw and canonical values".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
