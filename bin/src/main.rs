//! stargauge CLI - star-history analytics for GitHub repositories.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "stargauge")]
#[command(about = "Star-history analytics for GitHub repositories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository's star history
    Analyze {
        /// Repository slug (e.g., rust-lang/rust)
        repo: String,

        /// Fetch every page instead of sampling large repositories
        #[arg(long)]
        full_scan: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,

        /// GitHub token. Defaults to the GITHUB_TOKEN environment variable.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Show which stargazer pages would be fetched for a given star count
    Plan {
        /// Total star count to plan for
        stars: u64,

        /// Plan a full scan instead of sampling
        #[arg(long)]
        full_scan: bool,
    },

    /// Show the remaining GitHub API request quota
    Quota {
        /// GitHub token. Defaults to the GITHUB_TOKEN environment variable.
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Analyze {
            repo,
            full_scan,
            format,
            token,
        } => commands::analyze::analyze(&repo, full_scan, format, token, cli.quiet).await,
        Commands::Plan { stars, full_scan } => commands::plan::plan(stars, full_scan),
        Commands::Quota { token } => commands::quota::quota(token).await,
    }
}

/// Wires the verbosity flags to a tracing subscriber.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
