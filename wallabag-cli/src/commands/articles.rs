//! Article commands - save links and toggle article flags.

use anyhow::Result;
use wallabag_core::ExportFormat;

use super::connect;
use crate::output::{ActionOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Actions on a single article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Toggle the archived flag.
    Archive,
    /// Toggle the starred flag.
    Favorite,
    /// Delete the article.
    Delete,
}

impl Action {
    /// Returns the action name used in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Favorite => "favorite",
            Self::Delete => "delete",
        }
    }

    fn done_message(self, id: u64) -> String {
        match self {
            Self::Archive => format!("Toggled archived flag of article {id}"),
            Self::Favorite => format!("Toggled starred flag of article {id}"),
            Self::Delete => format!("Deleted article {id}"),
        }
    }
}

/// Runs an article action.
pub async fn run(action: Action, id: u64, cli: &Cli) -> Result<()> {
    let endpoint = connect(cli).await?;
    let success = match action {
        Action::Archive => endpoint.toggle_archive(id).await?,
        Action::Favorite => endpoint.toggle_favorite(id).await?,
        Action::Delete => endpoint.delete_article(id).await?,
    };

    let output = ActionOutput {
        action: action.name().to_string(),
        article_id: Some(id),
        url: None,
        success,
    };
    print_action(&output, &action.done_message(id), cli)
}

/// Saves a link.
pub async fn add(url: &str, cli: &Cli) -> Result<()> {
    let endpoint = connect(cli).await?;
    let success = endpoint.add_link(url).await?;

    let output = ActionOutput {
        action: "add".to_string(),
        article_id: None,
        url: Some(url.to_string()),
        success,
    };
    print_action(&output, &format!("Saved {url}"), cli)
}

/// Prints the export URL of an article.
pub async fn export_url(id: u64, format: ExportFormat, cli: &Cli) -> Result<()> {
    let endpoint = connect(cli).await?;
    let url = endpoint.export_url(id, format);

    match cli.format {
        OutputFormat::Text => println!("{url}"),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = serde_json::json!({
                "articleId": id,
                "format": format.extension(),
                "url": url,
            });
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

fn print_action(output: &ActionOutput, message: &str, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_action(message, output.success));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(output)?);
        }
    }
    Ok(())
}
