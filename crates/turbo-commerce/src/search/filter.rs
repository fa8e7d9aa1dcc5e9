//! Text and tag filtering over a loaded product collection.

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How selected tags are matched against a product's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// The product must carry every selected tag.
    #[default]
    All,
    /// The product must carry at least one selected tag.
    Any,
}

impl TagMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagMatch::All => "all",
            TagMatch::Any => "any",
        }
    }

    /// Check a product's tags against the selection.
    ///
    /// An empty selection matches every product under both policies.
    pub fn matches(&self, product: &Product, selected: &[String]) -> bool {
        if selected.is_empty() {
            return true;
        }
        match self {
            TagMatch::All => selected.iter().all(|tag| product.has_tag(tag)),
            TagMatch::Any => selected.iter().any(|tag| product.has_tag(tag)),
        }
    }
}

impl FromStr for TagMatch {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TagMatch::All),
            "any" => Ok(TagMatch::Any),
            _ => Err(CommerceError::invalid_option("tag match", s)),
        }
    }
}

impl fmt::Display for TagMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which product fields the search text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MatchFields {
    /// Title only.
    #[default]
    Title,
    /// Title, description and tag names.
    TitleDescriptionTags,
}

impl MatchFields {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchFields::Title => "title",
            MatchFields::TitleDescriptionTags => "title-description-tags",
        }
    }

    /// Check whether `needle` (already lowercased) occurs in the product.
    fn contains(&self, product: &Product, needle: &str) -> bool {
        if product.title.to_lowercase().contains(needle) {
            return true;
        }
        match self {
            MatchFields::Title => false,
            MatchFields::TitleDescriptionTags => {
                product.description.to_lowercase().contains(needle)
                    || product
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(needle))
            }
        }
    }
}

impl FromStr for MatchFields {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(MatchFields::Title),
            "title-description-tags" | "all" => Ok(MatchFields::TitleDescriptionTags),
            _ => Err(CommerceError::invalid_option("match fields", s)),
        }
    }
}

impl fmt::Display for MatchFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matching policy for [`filter_products`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterOptions {
    #[serde(default)]
    pub match_fields: MatchFields,
    #[serde(default)]
    pub tag_match: TagMatch,
}

impl FilterOptions {
    pub fn new(match_fields: MatchFields, tag_match: TagMatch) -> Self {
        Self {
            match_fields,
            tag_match,
        }
    }

    /// Check a single product against search text and selected tags.
    pub fn matches(&self, product: &Product, search: &str, tags: &[String]) -> bool {
        let matches_search =
            search.trim().is_empty() || self.match_fields.contains(product, &search.to_lowercase());
        matches_search && self.tag_match.matches(product, tags)
    }
}

/// Keep the products matching `search` and `tags`, in input order.
///
/// Search is a case-insensitive substring test; whitespace-only search
/// text matches everything.
pub fn filter_products<'a>(
    products: &'a [Product],
    search: &str,
    tags: &[String],
    options: FilterOptions,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| options.matches(product, search, tags))
        .collect()
}

/// All distinct tags across `products`, sorted ascending.
pub fn unique_tags<'a, I>(products: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .flat_map(|product| product.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Add `tag` to the selection, or remove it if already selected.
pub fn toggle_tag(selected: &[String], tag: &str) -> Vec<String> {
    if selected.iter().any(|t| t == tag) {
        selected.iter().filter(|t| *t != tag).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(tag.to_string());
        next
    }
}

/// Narrow a tag picker's options by a case-insensitive search term.
pub fn filter_options<'a>(available: &'a [String], term: &str) -> Vec<&'a str> {
    let term = term.to_lowercase();
    available
        .iter()
        .map(String::as_str)
        .filter(|option| option.to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "iPhone 9", 549.0)
                .with_description("An apple mobile")
                .with_tags(["smartphones", "apple"]),
            Product::new(2, "Samsung Universe 9", 1249.0)
                .with_description("Samsung's new variant")
                .with_tags(["smartphones"]),
            Product::new(3, "MacBook Pro", 1749.0)
                .with_description("Laptop with phone sync")
                .with_tags(["laptops", "apple"]),
            Product::new(4, "Headphone Stand", 25.0).with_tags(["accessories"]),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let products = catalog();
        let result = filter_products(&products, "", &[], FilterOptions::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);

        let result = filter_products(&products, "   ", &[], FilterOptions::default());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let products = catalog();
        let result = filter_products(&products, "PHONE", &[], FilterOptions::default());
        assert_eq!(ids(&result), vec![1, 4]);
    }

    #[test]
    fn test_search_extended_fields() {
        let products = catalog();
        let options = FilterOptions::new(MatchFields::TitleDescriptionTags, TagMatch::All);
        let result = filter_products(&products, "phone", &[], options);
        // MacBook matches on description, Samsung on the "smartphones" tag.
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);

        let result = filter_products(&products, "apple", &[], options);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_tag_match_all() {
        let products = catalog();
        let selected = tags(&["smartphones", "apple"]);
        let result = filter_products(&products, "", &selected, FilterOptions::default());
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_tag_match_any() {
        let products = catalog();
        let selected = tags(&["smartphones", "apple"]);
        let options = FilterOptions::new(MatchFields::Title, TagMatch::Any);
        let result = filter_products(&products, "", &selected, options);
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_and_tags_combine() {
        let products = catalog();
        let selected = tags(&["apple"]);
        let result = filter_products(&products, "mac", &selected, FilterOptions::default());
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_unique_tags_sorted() {
        let products = catalog();
        assert_eq!(
            unique_tags(&products),
            vec!["accessories", "apple", "laptops", "smartphones"]
        );
    }

    #[test]
    fn test_toggle_tag() {
        let selected = tags(&["a", "b"]);
        assert_eq!(toggle_tag(&selected, "c"), tags(&["a", "b", "c"]));
        assert_eq!(toggle_tag(&selected, "a"), tags(&["b"]));
    }

    #[test]
    fn test_filter_options() {
        let available = tags(&["Beauty", "groceries", "furniture"]);
        assert_eq!(filter_options(&available, "U"), vec!["Beauty", "furniture"]);
        assert_eq!(filter_options(&available, ""), vec!["Beauty", "groceries", "furniture"]);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("ANY".parse::<TagMatch>().unwrap(), TagMatch::Any);
        assert!("some".parse::<TagMatch>().is_err());
        assert_eq!(
            "title-description-tags".parse::<MatchFields>().unwrap(),
            MatchFields::TitleDescriptionTags
        );
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        (
            0u64..1000,
            "[a-z ]{0,12}",
            0.0f64..2000.0,
            prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0..4),
        )
            .prop_map(|(id, title, price, tags)| Product::new(id, title, price).with_tags(tags))
    }

    proptest! {
        #[test]
        fn prop_tag_filter_is_policy_respecting_subset(
            products in prop::collection::vec(arb_product(), 0..30),
            selected in prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0..3),
            use_any in any::<bool>(),
        ) {
            let selected: Vec<String> = selected.into_iter().map(String::from).collect();
            let policy = if use_any { TagMatch::Any } else { TagMatch::All };
            let options = FilterOptions::new(MatchFields::Title, policy);
            let result = filter_products(&products, "", &selected, options);

            for product in &result {
                prop_assert!(policy.matches(product, &selected));
                prop_assert!(products.iter().any(|p| std::ptr::eq(p, *product)));
            }
            let expected = products.iter().filter(|p| policy.matches(p, &selected)).count();
            prop_assert_eq!(result.len(), expected);
        }
    }
}
