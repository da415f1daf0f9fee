//! Storefront category assignment.

use kitbag_core::{CatalogRules, Category};

/// Maps a supplier type and product title to a storefront [`Category`].
///
/// Title keyword groups are checked first, in a fixed precedence:
/// accessories, protection, shin guards, pads. Protection precedes shin
/// guards, so a "thigh pad" listed under a shin guard supplier
/// type stays in protection. Only then is the supplier type matched against
/// the ordered type mapping, with accessories as the final fallback.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    rules: &'a CatalogRules,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(rules: &'a CatalogRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn classify(&self, supplier_type: &str, title: &str) -> Category {
        let title = title.to_lowercase();
        let keywords = &self.rules.title_keywords;

        let title_groups = [
            (&keywords.accessories, Category::Accessories),
            (&keywords.protection, Category::Protection),
            (&keywords.shinguards, Category::ShinGuards),
            (&keywords.pads, Category::Pads),
        ];
        for (words, category) in title_groups {
            if contains_any(&title, words) {
                return category;
            }
        }

        let supplier_type = supplier_type.to_lowercase();
        self.rules
            .type_categories
            .iter()
            .find(|m| supplier_type.contains(&m.supplier_type.to_lowercase()))
            .map_or(Category::Accessories, |m| m.category)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(needle.to_lowercase().as_str()))
}
