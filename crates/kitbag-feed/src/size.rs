//! Canonical size tokens and their display order.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use kitbag_core::CatalogRules;

static OZ_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*oz").expect("valid oz value regex"));
static OZ_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)oz").expect("valid oz token regex"));

/// Rank given to sizes missing from the rank table.
const UNRANKED: f64 = 999.0;

#[derive(Debug, Clone)]
pub struct SizeNormalizer {
    synonyms: HashMap<String, String>,
    ranks: HashMap<String, f64>,
}

impl SizeNormalizer {
    #[must_use]
    pub fn new(rules: &CatalogRules) -> Self {
        let synonyms = rules
            .size_synonyms
            .iter()
            .map(|s| (s.raw.trim().to_lowercase(), s.canonical.clone()))
            .collect();
        let ranks = rules
            .size_ranks
            .iter()
            .map(|r| (r.size.clone(), r.rank))
            .collect();
        Self { synonyms, ranks }
    }

    /// Maps a raw option to its canonical size token.
    ///
    /// Glove weights become `"{n}oz"`, clothing sizes go through the synonym
    /// table (`"X - Large"` → `"XL"`). Anything else, including unmapped
    /// clothing sizes, is returned unchanged.
    #[must_use]
    pub fn normalize(&self, option_name: &str, option_value: &str) -> String {
        let name = option_name.to_lowercase();
        let value = option_value.to_lowercase();
        let value = value.trim();

        if name == "gloves" || value.contains("oz") {
            if let Some(caps) = OZ_VALUE_RE.captures(value) {
                return format!("{}oz", &caps[1]);
            }
        }

        if name == "size" {
            if let Some(canonical) = self.synonyms.get(value) {
                return canonical.clone();
            }
        }

        option_value.to_owned()
    }

    /// Deduplicates `sizes` (first occurrence kept) and sorts them for display.
    ///
    /// Glove weights sort numerically, ranked clothing sizes by rank, and
    /// everything else alphabetically (ignoring case) after them. Among equally ranked values
    /// glove weights come before other tokens.
    #[must_use]
    pub fn sort_sizes(&self, sizes: Vec<String>) -> Vec<String> {
        let mut distinct: Vec<String> = Vec::with_capacity(sizes.len());
        for size in sizes {
            if !distinct.contains(&size) {
                distinct.push(size);
            }
        }

        distinct.sort_by(|a, b| self.compare(a, b));
        distinct
    }

    fn rank(&self, size: &str) -> f64 {
        self.ranks.get(size).copied().unwrap_or(UNRANKED)
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.rank(a)
            .total_cmp(&self.rank(b))
            .then_with(|| match (oz_weight(a), oz_weight(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
            .then_with(|| a.cmp(b))
    }
}

/// Numeric weight of a normalized glove size such as `"12oz"`.
fn oz_weight(size: &str) -> Option<u64> {
    OZ_TOKEN_RE
        .captures(size)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> SizeNormalizer {
        SizeNormalizer::new(&CatalogRules::default())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn clothing_synonyms_map_to_xl() {
        let n = normalizer();
        assert_eq!(n.normalize("Size", "x-large"), "XL");
        assert_eq!(n.normalize("Size", "X - Large"), "XL");
        assert_eq!(n.normalize("Size", "xlarge"), "XL");
        assert_eq!(n.normalize("size", "  Large  "), "L");
    }

    #[test]
    fn combined_large_xlarge() {
        assert_eq!(normalizer().normalize("Size", "Large / XLarge"), "L/XL");
    }

    #[test]
    fn glove_weights_normalize() {
        let n = normalizer();
        assert_eq!(n.normalize("Gloves", "12 oz"), "12oz");
        assert_eq!(n.normalize("Gloves", "16OZ"), "16oz");
        assert_eq!(n.normalize("Colour", "Red 10oz"), "10oz");
    }

    #[test]
    fn glove_option_without_weight_passes_through() {
        assert_eq!(normalizer().normalize("Gloves", "Junior"), "Junior");
    }

    #[test]
    fn unmapped_size_keeps_original_casing() {
        assert_eq!(normalizer().normalize("Size", "Junior Small"), "Junior Small");
    }

    #[test]
    fn other_options_pass_through() {
        assert_eq!(normalizer().normalize("Colour", "Black/Gold"), "Black/Gold");
        assert_eq!(normalizer().normalize("Title", "Default Title"), "Default Title");
    }

    #[test]
    fn glove_weights_sort_numerically() {
        let sorted = normalizer().sort_sizes(strings(&["16oz", "8oz", "12oz"]));
        assert_eq!(sorted, strings(&["8oz", "12oz", "16oz"]));
    }

    #[test]
    fn clothing_sizes_sort_by_rank() {
        let sorted = normalizer().sort_sizes(strings(&["XL", "S", "L/XL", "XXXL", "L", "XS"]));
        assert_eq!(sorted, strings(&["XS", "S", "L", "L/XL", "XL", "XXXL"]));
    }

    #[test]
    fn unranked_sizes_sort_alphabetically_after_ranked() {
        let sorted = normalizer().sort_sizes(strings(&["Red", "M", "Blue"]));
        assert_eq!(sorted, strings(&["M", "Blue", "Red"]));
    }

    #[test]
    fn unranked_labels_sort_ignoring_case() {
        let sorted = normalizer().sort_sizes(strings(&["Red", "blue", "Black"]));
        assert_eq!(sorted, strings(&["Black", "blue", "Red"]));
    }

    #[test]
    fn case_only_differences_still_sort_deterministically() {
        let sorted = normalizer().sort_sizes(strings(&["red", "Red"]));
        assert_eq!(sorted, strings(&["Red", "red"]));
    }

    #[test]
    fn duplicates_are_removed() {
        let sorted = normalizer().sort_sizes(strings(&["M", "S", "M", "S"]));
        assert_eq!(sorted, strings(&["S", "M"]));
    }

    #[test]
    fn mixed_weights_and_labels_sort_without_panicking() {
        let sorted = normalizer().sort_sizes(strings(&["2oz", "1x", "10oz"]));
        assert_eq!(sorted, strings(&["2oz", "10oz", "1x"]));
    }
}
