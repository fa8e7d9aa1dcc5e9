//! CLI command implementations.

pub mod config;
pub mod list;
pub mod show;
pub mod tags;

use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::Confirm;
use turbo_commerce::search::SortOption;

use crate::context::Context;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Current query string to start from (e.g. "search=phone&page=2").
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Set the search text; an empty value clears it.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Toggle a tag in the selection (repeatable).
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Sort order.
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortOption>,

    /// Go to a page. Applied after the other changes.
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Clear the search text and selected tags.
    #[arg(long)]
    pub clear: bool,

    /// Match products carrying any selected tag instead of all of them.
    #[arg(long)]
    pub any_tag: bool,

    /// Match search text against description and tags as well as title.
    #[arg(long)]
    pub match_all_fields: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: String,

    /// Listing query string to link back to.
    #[arg(short, long, default_value = "")]
    pub query: String,
}

/// Arguments for the tags command.
#[derive(Args)]
pub struct TagsArgs {
    /// Only show tags containing this text (case-insensitive).
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_sort(value: &str) -> Result<SortOption, String> {
    value.parse().map_err(|_| {
        let names: Vec<&str> = SortOption::ALL.iter().map(SortOption::as_str).collect();
        format!("expected one of: {}", names.join(", "))
    })
}

/// Report a failed load and ask whether to try again.
///
/// Returns `false` without asking when prompting is disabled; the caller
/// then reports the failure as an error.
fn confirm_retry(ctx: &Context, failure: &str) -> Result<bool> {
    if !ctx.can_prompt() {
        return Ok(false);
    }
    ctx.output.warn(failure);
    Ok(Confirm::new()
        .with_prompt("Try again?")
        .default(true)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("rating-desc"), Ok(SortOption::RatingDesc));
        let err = parse_sort("newest").unwrap_err();
        assert_eq!(err, "expected one of: all, price-asc, price-desc, rating-desc");
    }
}
