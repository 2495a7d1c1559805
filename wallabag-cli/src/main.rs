// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! wallabag CLI - talk to a wallabag server through its login form.
//!
//! # Examples
//!
//! ```bash
//! # Store the server and credentials
//! wallabag config set url https://bag.example.com
//! wallabag config set username alice
//! wallabag config set password secret
//!
//! # Check that login works
//! wallabag test
//!
//! # Fetch an authenticated page
//! wallabag fetch /unread/list
//!
//! # Discover and store the feeds credentials
//! wallabag feeds --save
//!
//! # Article actions
//! wallabag add https://example.org/article
//! wallabag archive 42
//! wallabag export-url 42 epub
//!
//! # JSON output
//! wallabag test --format json --pretty
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wallabag_client::ClientError;
use wallabag_store::StoreError;

use commands::{articles, config, diagnose, feeds, fetch};

// ============================================================================
// CLI Definition
// ============================================================================

/// wallabag CLI - session client for wallabag's web interface.
#[derive(Parser)]
#[command(name = "wallabag")]
#[command(about = "Session client for wallabag's web interface")]
#[command(long_about = r#"
Logs into a wallabag server through its HTML login form and keeps the
session alive across requests. Expired sessions are detected and renewed
transparently.

Examples:
  wallabag test                    # Diagnose URL, HTTP auth and login
  wallabag fetch /config           # Authenticated GET, prints the page
  wallabag feeds --save            # Discover feeds user id and token
  wallabag archive 42              # Toggle the archived flag
  wallabag config show             # Show stored settings
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default one.
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Server URL, overrides the stored one.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Login username, overrides the stored one.
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Login password, overrides the stored one.
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// HTTP Basic auth username.
    #[arg(long, global = true)]
    pub http_auth_username: Option<String>,

    /// HTTP Basic auth password.
    #[arg(long, global = true)]
    pub http_auth_password: Option<String>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the connection diagnostic.
    #[command(visible_alias = "t")]
    Test,

    /// GET a server path with an authenticated session.
    Fetch(fetch::FetchArgs),

    /// Discover the feeds user id and token.
    Feeds(feeds::FeedsArgs),

    /// Save a link.
    Add {
        /// Link to save.
        url: String,
    },

    /// Toggle the archived flag of an article.
    Archive {
        /// Article id.
        id: u64,
    },

    /// Toggle the starred flag of an article.
    Favorite {
        /// Article id.
        id: u64,
    },

    /// Delete an article.
    Delete {
        /// Article id.
        id: u64,
    },

    /// Print the download URL of an article export.
    ExportUrl {
        /// Article id.
        id: u64,
        /// Export format (epub, mobi, pdf, csv, json, txt, xml).
        #[arg(id = "export_format", value_name = "FORMAT")]
        format: wallabag_core::ExportFormat,
    },

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The server or the login did not behave as expected.
    ConnectionProblem = 2,
    /// No usable server configuration.
    NotConfigured = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(err: &anyhow::Error) -> Self {
        if let Some(store_err) = err.downcast_ref::<StoreError>() {
            return match store_err {
                StoreError::NotConfigured => Self::NotConfigured,
                _ => Self::Error,
            };
        }
        match err.downcast_ref::<ClientError>() {
            Some(ClientError::IncorrectConfiguration(_)) => Self::NotConfigured,
            Some(_) => Self::ConnectionProblem,
            None => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("wallabag=debug,info")
    } else {
        EnvFilter::new("wallabag=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Test => diagnose::run(&cli).await,
        Commands::Fetch(args) => fetch::run(args, &cli).await.map(|()| ExitCode::Success),
        Commands::Feeds(args) => feeds::run(args, &cli).await.map(|()| ExitCode::Success),
        Commands::Add { url } => articles::add(url, &cli).await.map(|()| ExitCode::Success),
        Commands::Archive { id } => articles::run(articles::Action::Archive, *id, &cli)
            .await
            .map(|()| ExitCode::Success),
        Commands::Favorite { id } => articles::run(articles::Action::Favorite, *id, &cli)
            .await
            .map(|()| ExitCode::Success),
        Commands::Delete { id } => articles::run(articles::Action::Delete, *id, &cli)
            .await
            .map(|()| ExitCode::Success),
        Commands::ExportUrl { id, format } => {
            articles::export_url(*id, *format, &cli).await.map(|()| ExitCode::Success)
        }
        Commands::Config(args) => config::run(args, &cli).await.map(|()| ExitCode::Success),
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            std::process::exit(ExitCode::for_error(&e) as i32);
        }
    }
}
