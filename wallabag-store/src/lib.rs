// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Wallabag Store
//!
//! Configuration persistence for the wallabag client.
//!
//! This crate provides:
//!
//! - **ServerConfig**: Server URL, credentials and discovered feeds credentials
//! - **Persistence**: File I/O helpers for owner-only JSON files
//!
//! ## Usage
//!
//! ```ignore
//! use wallabag_store::{ServerConfig, default_config_path};
//!
//! let path = default_config_path();
//! let mut config = ServerConfig::load_from(&path).await?;
//! config.set_value("url", "https://bag.example.com")?;
//! config.save_to(&path).await?;
//!
//! let credentials = config.credentials();
//! ```

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{CONFIG_KEYS, ServerConfig};
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_config_path, load_json, load_json_or_missing, remove_file,
    save_json,
};
