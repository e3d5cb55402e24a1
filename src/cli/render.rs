//! Render command - populate a host page with plugin cards.

use std::path::PathBuf;

use anyhow::{Context, Result};

use papercast_docs::pipeline::init;

use super::{resolve_config, SourceArgs, VariantArg};

pub(crate) async fn cmd_render(
    config_path: Option<&PathBuf>,
    template: PathBuf,
    output: Option<PathBuf>,
    variant: Option<VariantArg>,
    source: SourceArgs,
) -> Result<()> {
    let mut config = resolve_config(config_path, &source)?;
    if let Some(variant) = variant {
        config.variant = variant.into();
    }

    let page = std::fs::read_to_string(&template)
        .with_context(|| format!("Failed to read template: {}", template.display()))?;

    let registry = source.build(&config)?;
    let outcome = init(registry.as_ref(), &config, &page)
        .await
        .with_context(|| format!("Failed to render cards from {}", registry.location()))?;

    match output {
        Some(path) => {
            std::fs::write(&path, &outcome.html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            eprintln!(
                "Rendered {} cards from {} plugins into {} ({} skipped)",
                outcome.report.placed,
                outcome.plugins,
                path.display(),
                outcome.report.dropped
            );
        }
        None => print!("{}", outcome.html),
    }

    Ok(())
}
