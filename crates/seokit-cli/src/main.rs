//! `seokit`: render SEO head fragments and manage stored overrides.
//!
//! Usage:
//!   seokit render --url https://example.com/blog/hello --title "Hello"
//!   seokit expand templates/page.html --url https://example.com/about
//!   seokit override set 'App\Models\Post' 42 --title "Edited"
//!   seokit --json override list

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::override_cmd::OverrideAction;
use cli::render_cmd::PageArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seokit", version)]
#[command(about = "Assemble SEO meta tags, Open Graph, Twitter Cards and JSON-LD")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override database (defaults to ~/.seokit/seokit.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the head fragment for a page
    Render {
        #[command(flatten)]
        page: PageArgs,

        /// Join tags without newlines
        #[arg(long)]
        minify: bool,
    },

    /// Replace @seoKit directives in an HTML template
    Expand {
        /// Template file
        template: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Manage stored per-entity overrides
    Override {
        #[command(subcommand)]
        action: OverrideAction,
    },
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seokit=info,seokit_cli=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Output helpers read these instead of threading flags through every command.
    if cli.json {
        std::env::set_var("SEOKIT_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("SEOKIT_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("SEOKIT_NO_COLOR", "1");
    }
    init_tracing(cli.log_json);

    let config = cli.config.as_deref();
    let db = cli.db.as_deref();

    match &cli.command {
        Command::Render { page, minify } => cli::render_cmd::run(config, db, page, *minify),
        Command::Expand {
            template,
            output,
            page,
        } => cli::expand_cmd::run(config, db, template, output.as_deref(), page),
        Command::Override { action } => cli::override_cmd::run(config, db, action),
    }
}
