//! CLI command implementations.

pub mod articles;
pub mod config;
pub mod diagnose;
pub mod feeds;
pub mod fetch;

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;
use wallabag_client::ServiceEndpoint;
use wallabag_store::{ServerConfig, default_config_path};

use crate::Cli;

/// Returns the config file in use.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config_path.clone().unwrap_or_else(default_config_path)
}

/// Loads the stored configuration and applies the command line overrides.
pub async fn load_config(cli: &Cli) -> Result<ServerConfig> {
    let mut config = ServerConfig::load_from(&config_path(cli)).await?;
    apply_overrides(&mut config, cli);
    Ok(config)
}

/// Replaces stored values with the ones given on the command line.
pub fn apply_overrides(config: &mut ServerConfig, cli: &Cli) {
    let overrides = [
        (&mut config.url, &cli.url),
        (&mut config.username, &cli.username),
        (&mut config.password, &cli.password),
        (&mut config.http_auth_username, &cli.http_auth_username),
        (&mut config.http_auth_password, &cli.http_auth_password),
    ];
    for (stored, given) in overrides {
        if given.is_some() {
            stored.clone_from(given);
        }
    }
}

/// Creates the endpoint for the configured server.
pub async fn connect(cli: &Cli) -> Result<ServiceEndpoint> {
    let config = load_config(cli).await?;
    let url = config.require_url()?;
    let credentials = config.credentials();

    debug!(url = %url, http_auth = credentials.has_http_auth(), "Connecting");
    Ok(ServiceEndpoint::connect(url, credentials, config.timeout())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;
    use tempfile::TempDir;
    use wallabag_store::StoreError;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let cli = Cli::try_parse_from([
            "wallabag",
            "test",
            "--url",
            "https://other.example.com",
            "--password",
            "override",
        ])
        .unwrap();

        let mut config = ServerConfig::default();
        config.set_value("url", "https://bag.example.com").unwrap();
        config.set_value("username", "alice").unwrap();
        config.set_value("password", "stored").unwrap();

        apply_overrides(&mut config, &cli);

        assert_eq!(config.url.as_deref(), Some("https://other.example.com"));
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert_eq!(config.password.as_deref(), Some("override"));
    }

    #[tokio::test]
    async fn test_connect_uses_stored_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut config = ServerConfig::default();
        config.set_value("url", "https://bag.example.com/").unwrap();
        config.set_value("timeout_secs", "7").unwrap();
        config.save_to(&path).await.unwrap();

        let cli = Cli::try_parse_from(["wallabag", "--config", path.to_str().unwrap(), "test"])
            .unwrap();
        let endpoint = connect(&cli).await.unwrap();

        assert_eq!(endpoint.base_url(), "https://bag.example.com");
        assert_eq!(endpoint.transport().timeout(), Duration::from_secs(7));
        assert!(!endpoint.transport().uses_basic_auth());
    }

    #[tokio::test]
    async fn test_connect_without_url() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let cli = Cli::try_parse_from(["wallabag", "--config", path.to_str().unwrap(), "test"])
            .unwrap();
        let err = connect(&cli).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotConfigured)
        ));
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::try_parse_from(["wallabag", "config", "path", "--config", "/tmp/w.json"])
            .unwrap();
        assert_eq!(config_path(&cli), PathBuf::from("/tmp/w.json"));
    }
}
