//! `seokit override`: manage stored per-entity overrides.

use crate::cli::output::{self, Styled};
use crate::cli::{load_config, open_store, read_seo_data};
use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use seokit::store::{DeletableBackend, EntityKey, OverrideBackend, SeoRecord, SqliteStore};
use seokit::SeoData;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum OverrideAction {
    /// Create or update the override for an entity
    Set {
        #[command(flatten)]
        entity: EntityArgs,

        #[command(flatten)]
        fields: FieldArgs,

        /// Mark the entity as cornerstone content
        #[arg(long)]
        cornerstone: bool,
    },

    /// Show the stored override for an entity
    Show {
        #[command(flatten)]
        entity: EntityArgs,
    },

    /// Delete the stored override for an entity
    Delete {
        #[command(flatten)]
        entity: EntityArgs,
    },

    /// List every entity with a stored override
    List,
}

#[derive(Args, Debug, Clone)]
pub struct EntityArgs {
    /// Entity type, e.g. `App\Models\Post`
    pub entity_type: String,

    /// Entity id
    pub entity_id: String,
}

impl EntityArgs {
    fn key(&self) -> EntityKey {
        EntityKey::new(self.entity_type.as_str(), &self.entity_id)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// JSON file with the fields to store; flags below take precedence
    #[arg(long)]
    pub data: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub canonical: Option<String>,

    #[arg(long)]
    pub robots: Option<String>,

    #[arg(long)]
    pub og_title: Option<String>,

    #[arg(long)]
    pub og_description: Option<String>,

    #[arg(long)]
    pub og_image: Option<String>,

    #[arg(long)]
    pub twitter_image: Option<String>,

    /// Structured data as a JSON string
    #[arg(long)]
    pub structured_data: Option<String>,
}

impl FieldArgs {
    fn to_seo_data(&self) -> Result<SeoData> {
        let mut data = match &self.data {
            Some(path) => read_seo_data(path)?,
            None => SeoData::default(),
        };

        if let Some(v) = &self.title {
            data.title = v.clone();
        }
        if let Some(v) = &self.description {
            data.description = v.clone();
        }
        if let Some(v) = &self.canonical {
            data.canonical = Some(v.clone());
        }
        if let Some(v) = &self.robots {
            data.robots = Some(v.clone());
        }
        if let Some(v) = &self.og_title {
            data.og_title = v.clone();
        }
        if let Some(v) = &self.og_description {
            data.og_description = v.clone();
        }
        if let Some(v) = &self.og_image {
            data.og_image = v.clone();
        }
        if let Some(v) = &self.twitter_image {
            data.twitter_image = Some(v.clone());
        }
        if let Some(raw) = &self.structured_data {
            let value = serde_json::from_str(raw).context("--structured-data is not valid JSON")?;
            data.structured_data = Some(value);
        }
        Ok(data)
    }
}

pub fn run(config_path: Option<&Path>, db: Option<&Path>, action: &OverrideAction) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(db, &config)?;

    match action {
        OverrideAction::Set {
            entity,
            fields,
            cornerstone,
        } => set(&store, entity, fields, *cornerstone),
        OverrideAction::Show { entity } => show(&store, entity),
        OverrideAction::Delete { entity } => delete(&store, entity),
        OverrideAction::List => list(&store),
    }
}

fn set(store: &SqliteStore, entity: &EntityArgs, fields: &FieldArgs, cornerstone: bool) -> Result<()> {
    let key = entity.key();
    let data = fields.to_seo_data()?;
    if data.is_empty() && !cornerstone {
        bail!("refusing to store an empty override for {key}");
    }

    let record = SeoRecord::new(key.clone(), data).cornerstone(cornerstone);
    store
        .save(&record)
        .with_context(|| format!("failed to save override for {key}"))?;
    info!("saved override for {key}");

    if output::is_json() {
        output::print_json(&serde_json::to_value(&record)?);
    } else if !output::is_quiet() {
        let s = Styled::new();
        eprintln!("  {} Saved override for {}.", s.ok_sym(), s.bold(&key.to_string()));
    }
    Ok(())
}

fn show(store: &SqliteStore, entity: &EntityArgs) -> Result<()> {
    let key = entity.key();
    let record = store
        .fetch(&key)
        .with_context(|| format!("failed to read override for {key}"))?;

    match record {
        Some(record) if output::is_json() => output::print_json(&serde_json::to_value(&record)?),
        Some(record) => {
            let s = Styled::new();
            eprintln!("  {}", s.bold(&key.to_string()));
            output::print_field(&s, "cache key", &key.cache_key());
            output::print_field(&s, "title", &record.data.title);
            output::print_field(&s, "description", &record.data.description);
            output::print_field(&s, "canonical", record.data.canonical.as_deref().unwrap_or("-"));
            output::print_field(&s, "robots", record.data.robots.as_deref().unwrap_or("-"));
            output::print_field(&s, "og:title", &record.data.og_title);
            output::print_field(&s, "og:image", &record.data.og_image);
            output::print_field(
                &s,
                "cornerstone",
                if record.is_cornerstone { "yes" } else { "no" },
            );
            output::print_field(&s, "updated", &record.updated_at.to_rfc3339());
        }
        None if output::is_json() => output::print_json(&serde_json::json!({
            "error": "not_found",
            "message": format!("No override for {key}"),
        })),
        None => eprintln!("  No override for {key}."),
    }
    Ok(())
}

fn delete(store: &SqliteStore, entity: &EntityArgs) -> Result<()> {
    let key = entity.key();
    let removed = store
        .delete(&key)
        .with_context(|| format!("failed to delete override for {key}"))?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "deleted": removed,
            "cache_key": key.cache_key(),
        }));
    } else if !output::is_quiet() {
        let s = Styled::new();
        if removed {
            eprintln!("  {} Deleted override for {key}.", s.ok_sym());
        } else {
            eprintln!("  {} No override for {key}.", s.info_sym());
        }
    }
    Ok(())
}

fn list(store: &SqliteStore) -> Result<()> {
    let keys = store.list_keys().context("failed to list overrides")?;

    if output::is_json() {
        output::print_json(&serde_json::to_value(&keys)?);
        return Ok(());
    }

    if keys.is_empty() {
        if !output::is_quiet() {
            eprintln!("  No stored overrides.");
        }
        return Ok(());
    }
    let s = Styled::new();
    for key in &keys {
        println!("{}\t{}", key, s.dim(&key.cache_key()));
    }
    if !output::is_quiet() {
        eprintln!("  {} override(s)", s.yellow(&keys.len().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> EntityArgs {
        EntityArgs {
            entity_type: r"App\Models\Post".into(),
            entity_id: "5".into(),
        }
    }

    #[test]
    fn test_set_then_show_and_delete() {
        let store = SqliteStore::in_memory("seokit").unwrap();
        let fields = FieldArgs {
            title: Some("Stored title".into()),
            structured_data: Some(r#"{"@type": "Article"}"#.into()),
            ..FieldArgs::default()
        };
        set(&store, &entity(), &fields, true).unwrap();

        let record = store.fetch(&entity().key()).unwrap().unwrap();
        assert_eq!(record.data.title, "Stored title");
        assert_eq!(record.data.structured_data.unwrap()["@type"], "Article");
        assert!(record.is_cornerstone);

        show(&store, &entity()).unwrap();
        delete(&store, &entity()).unwrap();
        assert!(store.fetch(&entity().key()).unwrap().is_none());
    }

    #[test]
    fn test_empty_override_rejected() {
        let store = SqliteStore::in_memory("seokit").unwrap();
        let err = set(&store, &entity(), &FieldArgs::default(), false).unwrap_err();
        assert!(err.to_string().contains("empty override"));
        assert!(store.list_keys().unwrap().is_empty());
    }

    #[test]
    fn test_flags_take_precedence_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        std::fs::write(&path, r#"{"title": "File", "description": "File desc"}"#).unwrap();

        let fields = FieldArgs {
            data: Some(path),
            title: Some("Flag".into()),
            ..FieldArgs::default()
        };
        let data = fields.to_seo_data().unwrap();
        assert_eq!(data.title, "Flag");
        assert_eq!(data.description, "File desc");
    }

    #[test]
    fn test_bad_structured_data() {
        let fields = FieldArgs {
            structured_data: Some("{not json".into()),
            ..FieldArgs::default()
        };
        assert!(fields.to_seo_data().is_err());
    }
}
