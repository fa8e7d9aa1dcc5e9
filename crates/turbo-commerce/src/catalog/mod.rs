//! Product catalog module.
//!
//! Contains the product and review types served by the catalog API.

mod product;
mod review;

pub use product::{Product, ProductsResponse, CARD_TAG_LIMIT};
pub use review::Review;
