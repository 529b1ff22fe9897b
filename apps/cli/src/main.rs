//! Waldzell CLI - Serve and inspect a metagame library.
//!
//! `waldzell serve` runs the stdio MCP server. The other subcommands read the
//! same document tree for humans (or scripts, with `--json`).

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use waldzell_core::Config;

use commands::{get, list, serve};

/// Waldzell - Metagame library server
#[derive(Parser, Debug)]
#[command(
    name = "waldzell",
    author,
    version,
    about = "Waldzell - Serve markdown metagames over MCP",
    long_about = "Waldzell discovers markdown metagames under a root directory and serves them\nto MCP clients as `metagame://` resources and tools."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Metagame root directory (overrides WALDZELL_METAGAMES_PATH)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// List metagames
    ///
    /// Prints a table by default. With `--json` prints the same payload the
    /// `listMetagames` tool returns.
    List {
        #[command(flatten)]
        filter: list::FilterArgs,

        /// Print the JSON payload in this shape (list, tree, detailed). Implies --json.
        #[arg(long)]
        format: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show metagames grouped by category and subcategory
    Tree {
        #[command(flatten)]
        filter: list::FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a metagame document
    Get {
        /// Metagame name or relative path (e.g. `refactoring-game`, `foo/bar`)
        name: String,
    },
}

fn init_tracing(log_level: Option<&str>, json: bool) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(format!("waldzell_core={level},waldzell={level}")),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("waldzell_core=info,waldzell=info")),
    };

    // stdout belongs to the protocol.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref(), args.log_json);

    let config = Config::load(args.config.as_deref())?.with_root_override(args.root);
    tracing::debug!(root = %config.metagames.root.display(), "Configuration loaded");

    match args.command {
        Command::Serve => serve::execute(&config).await,
        Command::List { filter, format, json } => {
            list::execute_list(&config, &filter, format.as_deref(), json)
        }
        Command::Tree { filter, json } => list::execute_tree(&config, &filter, json),
        Command::Get { name } => get::execute(&config, &name),
    }
}
