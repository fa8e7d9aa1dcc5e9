//! Review types embedded in a product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Individual customer review.
///
/// Missing fields default to empty so one incomplete review does not fail
/// decoding of the whole product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Star rating, nominally 1 to 5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    /// ISO-8601 timestamp.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

impl Review {
    /// Create a review without an email address.
    pub fn new(
        rating: f64,
        comment: impl Into<String>,
        date: impl Into<String>,
        reviewer_name: impl Into<String>,
    ) -> Self {
        Self {
            rating,
            comment: comment.into(),
            date: date.into(),
            reviewer_name: reviewer_name.into(),
            reviewer_email: String::new(),
        }
    }

    /// Parsed review date, if it is valid RFC 3339.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Render star rating as text.
    pub fn render_stars(&self) -> String {
        crate::display::render_stars(self.rating)
    }

    /// Reviewer initials for the avatar.
    pub fn initials(&self) -> String {
        crate::display::initials(&self.reviewer_name)
    }
}
