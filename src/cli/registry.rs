//! Registry inspection commands (list, strip, rst).

use std::path::PathBuf;

use anyhow::{Context, Result};

use papercast_docs::plugins::{load_registry, strip_line_comments, PluginDescriptor};
use papercast_docs::rst::write_api_reference;

use super::{resolve_config, SourceArgs};

pub(crate) async fn cmd_list(
    config_path: Option<&PathBuf>,
    json: bool,
    source: SourceArgs,
) -> Result<()> {
    let config = resolve_config(config_path, &source)?;
    let registry = source.build(&config)?;
    let plugins = load_registry(registry.as_ref(), config.parse_mode)
        .await
        .with_context(|| format!("Failed to load registry from {}", registry.location()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plugins)?);
        return Ok(());
    }

    if plugins.is_empty() {
        println!("No plugins listed in {}", registry.location());
        return Ok(());
    }

    for plugin in &plugins {
        println!("{}", describe(plugin));
    }
    println!();
    println!("{} plugins", plugins.len());
    Ok(())
}

pub(crate) fn cmd_strip(file: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read registry file: {}", file.display()))?;
    println!("{}", strip_line_comments(&text));
    Ok(())
}

pub(crate) async fn cmd_rst(
    config_path: Option<&PathBuf>,
    out: PathBuf,
    source: SourceArgs,
) -> Result<()> {
    let config = resolve_config(config_path, &source)?;
    let registry = source.build(&config)?;
    let plugins = load_registry(registry.as_ref(), config.parse_mode)
        .await
        .with_context(|| format!("Failed to load registry from {}", registry.location()))?;

    let written = write_api_reference(&out, &plugins)
        .with_context(|| format!("Failed to write API reference under {}", out.display()))?;
    println!("Wrote {} pages under {}", written.len(), out.display());
    Ok(())
}

/// One-line summary: type, name, link and contribution count.
fn describe(plugin: &PluginDescriptor) -> String {
    let mut line = format!("{:<12} {}", plugin.plugin_type.label(), plugin.name);
    if let Some(url) = plugin.repo_url() {
        line.push_str(&format!("  {}", url));
    }
    let contributions = plugin.contribution_count();
    if contributions > 0 {
        line.push_str(&format!("  ({} contributions)", contributions));
    }
    line
}
