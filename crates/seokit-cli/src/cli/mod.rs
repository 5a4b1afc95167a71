//! Subcommand implementations for the `seokit` binary.

pub mod expand_cmd;
pub mod output;
pub mod override_cmd;
pub mod render_cmd;

use anyhow::{Context, Result};
use seokit::store::SqliteStore;
use seokit::{PageRequest, SeoConfig, SeoData};
use std::path::Path;
use tracing::info;

/// Load the config file, or the built-in defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<SeoConfig> {
    match path {
        Some(path) => {
            let config = SeoConfig::load(path)
                .with_context(|| format!("failed to load config: {}", path.display()))?;
            info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(SeoConfig::default()),
    }
}

/// Open the override database at `path`, or the default one under the home directory.
pub fn open_store(path: Option<&Path>, config: &SeoConfig) -> Result<SqliteStore> {
    let store = match path {
        Some(path) => SqliteStore::open(path, &config.table_name)
            .with_context(|| format!("failed to open override store: {}", path.display()))?,
        None => SqliteStore::open_default(&config.table_name)
            .context("failed to open default override store")?,
    };
    Ok(store)
}

pub fn parse_request(url: Option<&str>) -> Result<Option<PageRequest>> {
    url.map(|u| PageRequest::parse(u).with_context(|| format!("invalid page url: {u}")))
        .transpose()
}

/// Read a JSON file holding SEO fields.
pub fn read_seo_data(path: &Path) -> Result<SeoData> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    SeoData::from_value(value).with_context(|| format!("{} is not a SEO field set", path.display()))
}
