//! Fetch command - authenticated GET of a server path.

use anyhow::Result;
use clap::Args;
use wallabag_client::ExecuteOptions;

use super::connect;
use crate::output::{JsonFormatter, PageOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Server path, e.g. `/unread/list`.
    pub path: String,

    /// Fail instead of logging in again when the session expired.
    #[arg(long)]
    pub no_relogin: bool,

    /// Accept any HTTP status code.
    #[arg(long)]
    pub no_check_status: bool,
}

impl FetchArgs {
    fn options(&self) -> ExecuteOptions {
        ExecuteOptions {
            check_response: !self.no_check_status,
            auto_relogin: !self.no_relogin,
        }
    }

    fn normalized_path(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }
}

/// Runs the fetch command.
pub async fn run(args: &FetchArgs, cli: &Cli) -> Result<()> {
    let endpoint = connect(cli).await?;
    let request = endpoint.get_request(&args.normalized_path())?;
    let body = endpoint
        .execute_request_for_result(&request, args.options())
        .await?;

    match cli.format {
        OutputFormat::Text => println!("{body}"),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = PageOutput {
                url: request.url().to_string(),
                body,
            };
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}
