//! `seokit render`: print the head fragment for one page.

use crate::cli::{load_config, open_store, output, parse_request, read_seo_data};
use anyhow::{Context, Result};
use clap::Args;
use seokit::store::{CachedOverrides, EntityKey, OverrideBackend};
use seokit::{SeoConfig, SeoKit};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Page inputs shared by `render` and `expand`.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Absolute URL of the page being rendered
    #[arg(long)]
    pub url: Option<String>,

    /// Page title
    #[arg(long)]
    pub title: Option<String>,

    /// Page description
    #[arg(long)]
    pub description: Option<String>,

    /// Social image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Canonical URL (also used for og:url)
    #[arg(long)]
    pub canonical: Option<String>,

    /// JSON file with SEO fields to apply
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Entity type whose stored override should be applied
    #[arg(long, requires = "entity_id")]
    pub entity_type: Option<String>,

    /// Entity id whose stored override should be applied
    #[arg(long, requires = "entity_type")]
    pub entity_id: Option<String>,
}

impl PageArgs {
    fn entity_key(&self) -> Option<EntityKey> {
        match (&self.entity_type, &self.entity_id) {
            (Some(t), Some(id)) => Some(EntityKey::new(t.as_str(), id)),
            _ => None,
        }
    }
}

/// Build the facade for `page`. Field sources apply in order: data file,
/// stored override, then explicit flags.
pub fn build_seo<B: OverrideBackend>(
    config: &SeoConfig,
    page: &PageArgs,
    overrides: Option<&CachedOverrides<B>>,
) -> Result<SeoKit> {
    let request = parse_request(page.url.as_deref())?;
    let mut seo = SeoKit::new(config, request.as_ref());

    if let Some(path) = &page.data {
        seo.apply_seo_data(&read_seo_data(path)?);
    }

    if let (Some(key), Some(overrides)) = (page.entity_key(), overrides) {
        match overrides
            .get(&key)
            .with_context(|| format!("failed to read override for {key}"))?
        {
            Some(record) => {
                info!("applying stored override for {key}");
                seo.apply_seo_data(&record.data);
            }
            None => warn!("no stored override for {key}"),
        }
    }

    if let Some(title) = &page.title {
        seo.title(title);
    }
    if let Some(description) = &page.description {
        seo.description(description);
    }
    if let Some(image) = &page.image {
        seo.image(image);
    }
    if let Some(canonical) = &page.canonical {
        seo.canonical(canonical);
    }

    Ok(seo)
}

/// Build the facade, opening the override store only when an entity was named.
pub fn build_for_cli(config: &SeoConfig, db: Option<&Path>, page: &PageArgs) -> Result<SeoKit> {
    if page.entity_key().is_some() {
        let overrides = CachedOverrides::new(open_store(db, config)?);
        build_seo(config, page, Some(&overrides))
    } else {
        build_seo::<seokit::store::SqliteStore>(config, page, None)
    }
}

pub fn run(config_path: Option<&Path>, db: Option<&Path>, page: &PageArgs, minify: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let seo = build_for_cli(&config, db, page)?;
    let html = seo.render(minify).context("failed to render head fragment")?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "html": html,
            "title": seo.meta().title(),
            "meta": seo.meta().to_map(),
            "opengraph": seo.opengraph().to_map(),
            "twitter": seo.twitter().to_map(),
            "json_ld": seo.json_ld().to_vec(),
        }));
    } else {
        println!("{html}");
    }
    Ok(())
}
