//! Tag listing command.

use anyhow::Result;
use turbo_commerce::search::filter_options;

use super::TagsArgs;
use super::list::load_listing;
use crate::context::Context;

/// Run the tags command.
pub async fn run(args: TagsArgs, ctx: &Context) -> Result<()> {
    let query = ctx.config.listing_query(false, false);
    let listing = load_listing(ctx, query).await?;

    let available = listing.available_tags();
    let term = args.filter.as_deref().unwrap_or("");
    let tags = filter_options(&available, term);

    if ctx.output.is_json() {
        ctx.output.json(&tags);
        return Ok(());
    }

    ctx.output.header("Tags");
    if tags.is_empty() {
        ctx.output.line("  No tags found");
        return Ok(());
    }
    for tag in &tags {
        ctx.output.list_item(tag);
    }
    ctx.output.line("");
    ctx.output.success(&format!("{} of {} tags", tags.len(), available.len()));
    Ok(())
}
