//! Product types as served by the catalog API.

use crate::catalog::Review;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Number of tags shown on a product card before collapsing into `+N`.
pub const CARD_TAG_LIMIT: usize = 3;

/// A product in the catalog.
///
/// Optional collections default to empty when the API omits them. Fields
/// the API sends that the showcase does not use are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Unit price in dollars.
    pub price: f64,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Tags for filtering/search.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Gallery image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Listing thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Customer reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Create a product with the required fields; collections start empty.
    pub fn new(id: u64, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: ProductId::new(id),
            title: title.into(),
            description: String::new(),
            price,
            rating: 0.0,
            tags: Vec::new(),
            images: Vec::new(),
            thumbnail: None,
            reviews: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether the product carries a tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Images to show in the gallery.
    ///
    /// Empty image URLs are skipped. When no image remains the thumbnail is
    /// used instead, so a product with only a thumbnail still shows one.
    pub fn gallery(&self) -> Vec<&str> {
        let images: Vec<&str> = self
            .images
            .iter()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
            .collect();
        if !images.is_empty() {
            return images;
        }
        self.thumbnail
            .as_deref()
            .filter(|url| !url.is_empty())
            .into_iter()
            .collect()
    }

    /// Tags shown on a listing card and the number collapsed into `+N`.
    pub fn card_tags(&self) -> (&[String], usize) {
        let shown = self.tags.len().min(CARD_TAG_LIMIT);
        (&self.tags[..shown], self.tags.len() - shown)
    }

    /// Reviews sorted newest first.
    ///
    /// Reviews whose date does not parse keep their relative order after
    /// all dated reviews.
    pub fn reviews_newest_first(&self) -> Vec<&Review> {
        let mut reviews: Vec<&Review> = self.reviews.iter().collect();
        reviews.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        reviews
    }

    /// Label such as "(3 reviews)"; `None` when there are no reviews.
    pub fn review_count_label(&self) -> Option<String> {
        match self.reviews.len() {
            0 => None,
            1 => Some("(1 review)".to_string()),
            n => Some(format!("({} reviews)", n)),
        }
    }
}

/// A page of products as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductsResponse {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Total number of products on the server.
    pub total: u64,
    /// Offset of this page.
    pub skip: u64,
    /// Requested page size.
    pub limit: u64,
}
