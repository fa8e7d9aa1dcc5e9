//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.line("");
    ctx.output.line("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("fetch_limit", &config.api.fetch_limit.to_string());

    ctx.output.line("");
    ctx.output.line("[listing]");
    ctx.output.kv("page_size", &config.listing.page_size.to_string());
    ctx.output.kv("tag_match", config.listing.tag_match.as_str());
    ctx.output.kv("match_fields", config.listing.match_fields.as_str());
    ctx.output.kv("default_sort", config.listing.default_sort.as_str());

    ctx.output.line("");
    ctx.output.line("[display]");
    ctx.output.kv("relative_dates", config.display.relative_dates.as_str());

    if config.listing.page_size == 0 {
        ctx.output.warn("listing.page_size is 0; every page will be empty");
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
