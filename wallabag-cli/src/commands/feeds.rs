//! Feeds command - discover the feeds user id and token.

use anyhow::{Result, bail};
use clap::Args;
use tracing::info;
use wallabag_store::ServerConfig;

use super::{config_path, connect};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the feeds command.
#[derive(Args)]
pub struct FeedsArgs {
    /// Store the discovered credentials in the config file.
    #[arg(long)]
    pub save: bool,

    /// Ask the server for a new token first.
    #[arg(long)]
    pub regenerate: bool,
}

/// Runs the feeds command.
pub async fn run(args: &FeedsArgs, cli: &Cli) -> Result<()> {
    let endpoint = connect(cli).await?;

    if args.regenerate {
        endpoint.generate_feeds_token().await?;
        info!("Generated new feeds token");
    }

    let Some(feeds) = endpoint.get_feeds_credentials().await? else {
        bail!("No feeds credentials found on the config page; generate a token first");
    };

    if args.save {
        // Overrides given on the command line are not persisted.
        let path = config_path(cli);
        let mut stored = ServerConfig::load_from(&path).await?;
        stored.set_feeds_credentials(&feeds);
        stored.save_to(&path).await?;
        info!(path = %path.display(), "Saved feeds credentials");
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_feeds(&feeds, endpoint.base_url()));
            if args.save {
                println!("Saved to {}", config_path(cli).display());
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!(
                "{}",
                formatter.format_feeds(&feeds, endpoint.base_url(), args.save)?
            );
        }
    }

    Ok(())
}
