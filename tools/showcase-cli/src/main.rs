//! Showcase CLI - browse the product catalog from the terminal.
//!
//! Commands:
//! - `showcase list` - Search, filter, sort and page the catalog
//! - `showcase show` - Show one product with its gallery and reviews
//! - `showcase tags` - List the tags available for filtering
//! - `showcase config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ListArgs, ShowArgs, TagsArgs};

/// Showcase CLI - Browse the product catalog
#[derive(Parser)]
#[command(name = "showcase")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Never prompt; fail instead of offering a retry
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, applying search, tag, sort and page changes
    List(ListArgs),

    /// Show a single product
    Show(ShowArgs),

    /// List tags available for filtering
    Tags(TagsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone(), cli.yes) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Tags(args) => commands::tags::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
