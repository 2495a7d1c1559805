//! Test command - run the connection diagnostic.

use anyhow::Result;
use tracing::info;

use super::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the test command. Exits non-zero unless the connection works.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let endpoint = connect(cli).await?;
    let report = endpoint.test_connection_report().await?;
    info!(result = %report.result, "Connection test finished");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_connection(&report));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_connection(&report)?);
        }
    }

    Ok(if report.is_ok() {
        ExitCode::Success
    } else {
        ExitCode::ConnectionProblem
    })
}
