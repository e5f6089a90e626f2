//! # Configuration
//!
//! A YAML file selected with `--config`. Every field has a default, and a missing file
//! means "all defaults", so the service starts with no configuration at all.
//!
//! ```yaml
//! server_address: "127.0.0.1:3000"
//! log_level: info
//! channel_buffer: 64
//! coupons:
//!   - { code: SAVE10, kind: percentage, value: 10 }
//! seed:
//!   products:
//!     - { name: Mug, description: Stoneware, price: 12.5, image: /img/mug.png }
//!   users:
//!     - name: Alice
//!       email: alice@example.com
//!       addresses:
//!         - { type: home, street: 1 Main St, city: Springfield, state: IL, zipCode: "62701", country: US }
//! ```

use crate::coupons::Coupon;
use crate::model::{NewAddress, ProductCreate};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/storefront.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub server_address: String,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Request queue capacity of every actor.
    pub channel_buffer: usize,
    pub coupons: Vec<Coupon>,
    pub seed: SeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
            channel_buffer: 32,
            coupons: Vec::new(),
            seed: SeedConfig::default(),
        }
    }
}

/// Documents created at startup for local runs.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SeedConfig {
    pub products: Vec<ProductCreate>,
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub addresses: Vec<NewAddress>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Like [`Config::load`], but a file that does not exist yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        serde_yml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
