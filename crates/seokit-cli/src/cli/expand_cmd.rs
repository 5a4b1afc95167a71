//! `seokit expand`: replace `@seoKit` directives in an HTML template.

use crate::cli::output::{self, Styled};
use crate::cli::render_cmd::{build_for_cli, PageArgs};
use crate::cli::load_config;
use anyhow::{Context, Result};
use seokit::expand_directives;
use std::path::Path;
use tracing::info;

pub fn run(
    config_path: Option<&Path>,
    db: Option<&Path>,
    template: &Path,
    out: Option<&Path>,
    page: &PageArgs,
) -> Result<()> {
    let config = load_config(config_path)?;
    let seo = build_for_cli(&config, db, page)?;

    let source = std::fs::read_to_string(template)
        .with_context(|| format!("failed to read template: {}", template.display()))?;
    let expanded = expand_directives(&source, &seo).context("failed to expand directives")?;
    info!(
        "expanded {} ({} -> {} bytes)",
        template.display(),
        source.len(),
        expanded.len()
    );

    match out {
        Some(path) => {
            std::fs::write(path, &expanded)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if output::is_json() {
                output::print_json(&serde_json::json!({
                    "template": template.display().to_string(),
                    "output": path.display().to_string(),
                    "bytes": expanded.len(),
                }));
            } else if !output::is_quiet() {
                let s = Styled::new();
                eprintln!("  {} Wrote {}", s.ok_sym(), s.bold(&path.display().to_string()));
            }
        }
        None => print!("{expanded}"),
    }
    Ok(())
}
