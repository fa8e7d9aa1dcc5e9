//! Product detail command.

use anyhow::{bail, Context as _, Result};
use chrono::Utc;
use console::style;
use serde_json::json;
use turbo_commerce::catalog::Product;
use turbo_commerce::display::{format_price, render_stars};
use turbo_commerce::search::{back_link, QueryParams};
use turbo_showcase::{DetailView, ViewError};

use super::{confirm_retry, ShowArgs};
use crate::context::Context;
use crate::render;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let back = back_link(&QueryParams::parse(&args.query));
    let client = ctx.client()?;
    let mut detail = DetailView::new(args.id);

    let spinner = ctx.output.spinner("Loading product...");
    detail.load(&client).await?;
    spinner.finish_and_clear();

    while let Some(err) = detail.state().error().cloned() {
        match err {
            ViewError::NotFound => {
                if ctx.output.is_json() {
                    ctx.output.json(&json!({ "error": "Product not found", "back": back }));
                } else {
                    ctx.output
                        .line("The product you're looking for doesn't exist.");
                    ctx.output.kv("Back to products", &back);
                }
                bail!("Product not found: {}", detail.id());
            }
            ViewError::Failed(message) => {
                let failure = format!("Error loading product: {}", message);
                if !confirm_retry(ctx, &failure)? {
                    bail!(failure);
                }
                let spinner = ctx.output.spinner("Retrying...");
                detail.reload(&client).await?;
                spinner.finish_and_clear();
            }
        }
    }

    let product = detail.product().context("Product is not loaded")?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "gallery": detail.gallery(),
            "reviews": detail.reviews_newest_first(),
            "back": back,
        }));
        return Ok(());
    }

    print_product(ctx, product);
    print_gallery(ctx, &detail);
    print_reviews(ctx, &detail);

    ctx.output.line("");
    ctx.output.kv("Back to products", &back);
    Ok(())
}

fn print_product(ctx: &Context, product: &Product) {
    ctx.output.header(&product.title);
    ctx.output.kv("Price", &format_price(product.price));

    let mut rating = format!("{} {:.2}", render_stars(product.rating), product.rating);
    if let Some(label) = product.review_count_label() {
        rating.push(' ');
        rating.push_str(&label);
    }
    ctx.output.kv("Rating", &rating);

    if !product.tags.is_empty() {
        ctx.output.kv("Tags", &product.tags.join(", "));
    }

    if !product.description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&format!("  {}", product.description));
    }
}

fn print_gallery(ctx: &Context, detail: &DetailView) {
    let images = detail.gallery();
    ctx.output.header("Images");
    if images.is_empty() {
        ctx.output.line("  No images available");
        return;
    }
    for url in images {
        ctx.output.list_item(url);
    }
}

fn print_reviews(ctx: &Context, detail: &DetailView) {
    let reviews = detail.reviews_newest_first();
    ctx.output.header(&format!("Customer Reviews ({})", reviews.len()));
    if reviews.is_empty() {
        ctx.output.line("  No reviews yet.");
        return;
    }

    let now = Utc::now();
    for review in reviews {
        let header = render::review_header(review, now, ctx.config.display.relative_dates);
        ctx.output.line(&format!("  {}", style(header).bold()));
        ctx.output.line(&format!("    {}", review.comment));
        ctx.output.line("");
    }
}
