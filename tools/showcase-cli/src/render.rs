//! Plain-text rendering of products, pages and reviews.
//!
//! Functions here return unstyled strings; commands add colour when they
//! print them.

use chrono::{DateTime, Utc};
use turbo_commerce::catalog::{Product, Review};
use turbo_commerce::display::{format_price, format_relative_date, render_stars, RelativeDateStyle};
use turbo_commerce::search::{ListingPage, PageLink};

/// Title line of a product card, e.g. `#1  Essence Mascara`.
pub fn card_title(product: &Product) -> String {
    format!("#{}  {}", product.id, product.title)
}

/// Price and rating line, e.g. `$9.99  ★★★★★ 4.9`.
pub fn price_and_rating(product: &Product) -> String {
    format!(
        "{}  {} {:.1}",
        format_price(product.price),
        render_stars(product.rating),
        product.rating
    )
}

/// Tag chips for a card: the first few tags and a `+N` overflow marker.
pub fn card_tags(product: &Product) -> Option<String> {
    let (shown, hidden) = product.card_tags();
    if shown.is_empty() {
        return None;
    }
    let mut line = shown.join(", ");
    if hidden > 0 {
        line.push_str(&format!(" +{}", hidden));
    }
    Some(line)
}

/// Page navigation, e.g. `‹ Prev  1 … 8 9 [10] 11 12 … 20  Next ›`.
///
/// `None` when everything fits on one page.
pub fn page_bar(page: &ListingPage<'_>) -> Option<String> {
    let window = page.page_window();
    if window.is_empty() {
        return None;
    }

    let links: Vec<String> = window
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == page.page => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect();

    let mut parts = Vec::with_capacity(3);
    if page.has_prev() {
        parts.push("‹ Prev".to_string());
    }
    parts.push(links.join(" "));
    if page.has_next() {
        parts.push("Next ›".to_string());
    }
    Some(parts.join("  "))
}

/// Header line of a review: initials, name, stars and relative date.
pub fn review_header(review: &Review, now: DateTime<Utc>, style: RelativeDateStyle) -> String {
    format!(
        "({}) {}  {}  {}",
        review.initials(),
        review.reviewer_name,
        review.render_stars(),
        format_relative_date(&review.date, now, style)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use turbo_commerce::search::{FilterOptions, FilterState, ListingQuery};

    fn products(count: u64) -> Vec<Product> {
        (1..=count)
            .map(|i| Product::new(i, format!("Item {}", i), i as f64))
            .collect()
    }

    #[test]
    fn test_card_lines() {
        let product = Product::new(7, "Desk Lamp", 1234.5)
            .with_rating(4.56)
            .with_tags(["home", "lighting", "desk", "office", "led"]);
        assert_eq!(card_title(&product), "#7  Desk Lamp");
        assert_eq!(price_and_rating(&product), "$1,234.50  ★★★★★ 4.6");
        assert_eq!(card_tags(&product).as_deref(), Some("home, lighting, desk +2"));
        assert_eq!(card_tags(&Product::new(8, "Bare", 1.0)), None);
    }

    #[test]
    fn test_page_bar() {
        let items = products(200);
        let query = ListingQuery::new(FilterOptions::default(), 10);

        let page = query.run(&items, &FilterState::new().with_page(5));
        assert_eq!(
            page_bar(&page).as_deref(),
            Some("‹ Prev  1 … 3 4 [5] 6 7 … 20  Next ›")
        );

        let page = query.run(&items, &FilterState::new().with_page(1));
        assert_eq!(page_bar(&page).as_deref(), Some("[1] 2 3 … 20  Next ›"));

        let few = products(3);
        let page = query.run(&few, &FilterState::new());
        assert_eq!(page_bar(&page), None);
    }

    #[test]
    fn test_review_header() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let review = Review::new(4.0, "Solid", "2024-05-31T09:00:00Z", "jane roe");
        assert_eq!(
            review_header(&review, now, RelativeDateStyle::Days),
            "(JR) jane roe  ★★★★☆  Yesterday"
        );
    }
}
