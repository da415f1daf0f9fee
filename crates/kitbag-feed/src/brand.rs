//! Brand inference from product titles.
//!
//! The supplier's `Vendor` column names the distributor, not the maker, so the
//! brand is read off the front of the title instead.

use kitbag_core::CatalogRules;

#[derive(Debug, Clone, Copy)]
pub struct BrandExtractor<'a> {
    rules: &'a CatalogRules,
}

impl<'a> BrandExtractor<'a> {
    #[must_use]
    pub fn new(rules: &'a CatalogRules) -> Self {
        Self { rules }
    }

    /// Infers a brand from `title`.
    ///
    /// 1. A known brand prefixing the title (case-insensitive) wins, in its
    ///    canonical casing.
    /// 2. A generic first word ("Adults", "Leather", ...) yields the fallback.
    /// 3. A capitalised first word of 3 to 19 characters is taken verbatim.
    /// 4. Anything else yields the fallback.
    #[must_use]
    pub fn extract(&self, title: &str) -> String {
        let lower_title = title.to_lowercase();
        if let Some(brand) = self
            .rules
            .known_brands
            .iter()
            .find(|brand| lower_title.starts_with(&brand.to_lowercase()))
        {
            return brand.clone();
        }

        let first_word = title.split(char::is_whitespace).next().unwrap_or_default();
        let lower_first = first_word.to_lowercase();
        if self
            .rules
            .generic_words
            .iter()
            .any(|word| word.to_lowercase() == lower_first)
        {
            return self.rules.fallback_brand.clone();
        }

        let len = first_word.chars().count();
        let capitalised = first_word
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());
        if capitalised && len > 2 && len < 20 {
            return first_word.to_owned();
        }

        self.rules.fallback_brand.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(title: &str) -> String {
        let rules = CatalogRules::default();
        BrandExtractor::new(&rules).extract(title)
    }

    #[test]
    fn known_brand_prefix() {
        assert_eq!(extract("Twins Special Boxing Gloves"), "Twins");
        assert_eq!(extract("Cleto Reyes Training Gloves"), "Cleto Reyes");
    }

    #[test]
    fn known_brand_uses_canonical_casing() {
        assert_eq!(extract("TOP KING Super Star Gloves"), "Top King");
        assert_eq!(extract("fairtex bgv1"), "Fairtex");
    }

    #[test]
    fn known_brand_matches_as_plain_prefix() {
        // "Boon" prefixes "Boonsong", mirroring the supplier catalogue's rules.
        assert_eq!(extract("Boonsong Thai Pads"), "Boon");
    }

    #[test]
    fn generic_first_word_falls_back() {
        assert_eq!(extract("Adults Boxing Gloves"), "Playwell");
        assert_eq!(extract("LEATHER Focus Mitts"), "Playwell");
    }

    #[test]
    fn capitalised_first_word_is_inferred() {
        assert_eq!(extract("Xendo Pro Gloves"), "Xendo");
    }

    #[test]
    fn short_or_lowercase_first_word_falls_back() {
        assert_eq!(extract("Ab Gloves"), "Playwell");
        assert_eq!(extract("xendo gloves"), "Playwell");
        assert_eq!(extract("12oz Bag Gloves"), "Playwell");
        assert_eq!(extract(""), "Playwell");
    }

    #[test]
    fn overlong_first_word_falls_back() {
        assert_eq!(extract("Supercalifragilisticexp Gloves"), "Playwell");
    }

    #[test]
    fn fallback_brand_is_configurable() {
        let rules = CatalogRules {
            fallback_brand: "Kitbag".to_string(),
            ..CatalogRules::default()
        };
        assert_eq!(BrandExtractor::new(&rules).extract("Kids Gloves"), "Kitbag");
    }
}
