//! Product listing command.

use anyhow::{bail, Context as _, Result};
use console::style;
use serde_json::json;
use turbo_commerce::search::{
    decode, decode_with_sort, encode, toggle_tag, FilterState, FilterUpdate, ListingPage,
    ListingQuery, QueryParams,
};
use turbo_showcase::ListingView;

use super::{confirm_retry, ListArgs};
use crate::context::Context;
use crate::render;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let params = apply_changes(&args, QueryParams::parse(&args.query));
    let state = decode_with_sort(&params, ctx.config.listing.default_sort);
    tracing::debug!(query = %params, ?state, "listing state");

    let query = ctx.config.listing_query(args.any_tag, args.match_all_fields);
    let listing = load_listing(ctx, query).await?;
    let page = listing
        .page(&state)
        .context("Product listing is not loaded")?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "query": params.to_query_string(),
            "state": &state,
            "total_matches": page.total_matches,
            "total_pages": page.total_pages,
            "page_size": page.page_size,
            "items": &page.items,
        }));
        return Ok(());
    }

    print_page(ctx, &state, &page);
    print_resume_hint(ctx, &params);
    Ok(())
}

/// Apply the command-line changes to `current`, the way the listing's
/// controls would: filter changes first (returning to page 1), then an
/// explicit page.
fn apply_changes(args: &ListArgs, current: QueryParams) -> QueryParams {
    let mut params = current;

    if args.clear {
        params = encode(&FilterUpdate::clear_filters(), &params);
    }

    let mut update = FilterUpdate {
        search: args.search.clone(),
        sort: args.sort,
        ..FilterUpdate::default()
    };
    if !args.tags.is_empty() {
        let selected = decode(&params).tags;
        let toggled = args
            .tags
            .iter()
            .fold(selected, |acc, tag| toggle_tag(&acc, tag));
        update.tags = Some(toggled);
    }
    if update.changes_filters() {
        params = encode(&update, &params);
    }

    if let Some(page) = args.page {
        params = encode(&FilterUpdate::page(page), &params);
    }

    params
}

/// Load the catalog, offering a retry on failure.
pub(crate) async fn load_listing(ctx: &Context, query: ListingQuery) -> Result<ListingView> {
    let client = ctx.client()?;
    let mut listing = ListingView::new(query).with_fetch_limit(ctx.config.api.fetch_limit);

    let spinner = ctx.output.spinner("Loading products...");
    listing.load(&client).await?;
    spinner.finish_and_clear();

    while let Some(err) = listing.state().error().map(ToString::to_string) {
        let message = format!("Error loading products: {}", err);
        if !confirm_retry(ctx, &message)? {
            bail!(message);
        }
        let spinner = ctx.output.spinner("Retrying...");
        listing.reload(&client).await?;
        spinner.finish_and_clear();
    }

    ctx.output.debug(&format!(
        "Loaded {} products from {}",
        listing.products().map_or(0, |products| products.len()),
        client.base_url()
    ));
    Ok(listing)
}

fn print_page(ctx: &Context, state: &FilterState, page: &ListingPage<'_>) {
    ctx.output.header("Products");
    if !state.search.is_empty() {
        ctx.output.kv("Search", &state.search);
    }
    if !state.tags.is_empty() {
        ctx.output.kv("Tags", &state.tags.join(", "));
    }
    ctx.output.kv("Sort", state.sort.display_name());
    ctx.output.line("");

    if page.total_matches == 0 {
        ctx.output.info("No products found");
        ctx.output.line("  Try adjusting your search or filters.");
        return;
    }

    ctx.output.line(&style(page.summary(&state.search)).dim().to_string());
    ctx.output.line("");

    if page.is_empty() {
        ctx.output.warn(&format!(
            "Page {} is empty; there are {} page(s)",
            page.page, page.total_pages
        ));
        return;
    }

    for product in &page.items {
        ctx.output.line(&style(render::card_title(product)).bold().to_string());
        ctx.output.line(&format!("    {}", render::price_and_rating(product)));
        if let Some(tags) = render::card_tags(product) {
            ctx.output.line(&format!("    {}", style(tags).cyan()));
        }
        ctx.output.line("");
    }

    if let Some(bar) = render::page_bar(page) {
        ctx.output.line(&format!("  {}", bar));
    }
}

fn print_resume_hint(ctx: &Context, params: &QueryParams) {
    let query = params.to_query_string();
    ctx.output.line("");
    ctx.output.kv("query", &query);
    ctx.output.list_item(&format!(
        "Continue with: showcase list --query '{}' ...",
        query
    ));
    ctx.output.list_item(&format!(
        "Open a product: showcase show <id> --query '{}'",
        query
    ));
}
