//! The fetch → parse → render → inject pass.

use tracing::info;

use crate::config::{DocsConfig, Variant};
use crate::dispatch::{
    populate_contributions, populate_plugins, ContributionSlots, DispatchReport, PluginSlots,
};
use crate::error::Result;
use crate::page::inject;
use crate::plugins::{load_registry, RegistrySource};

/// Result of rendering one page.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Descriptors parsed from the registry.
    pub plugins: usize,
    pub report: DispatchReport,
    /// The host page with cards injected.
    pub html: String,
}

/// Populate the container slots of `template` from the registry.
///
/// Runs once, in order: read the registry from `source`, parse it with the
/// configured mode, dispatch cards for the configured variant, then inject
/// the containers into the page. Any failure aborts the whole pass.
pub async fn init(
    source: &dyn RegistrySource,
    config: &DocsConfig,
    template: &str,
) -> Result<RenderOutcome> {
    let plugins = load_registry(source, config.parse_mode).await?;

    let (report, html) = match config.variant {
        Variant::Plugins => {
            let mut slots = PluginSlots::new(&config.plugin_slots);
            let report = populate_plugins(&plugins, &mut slots);
            (report, inject(template, &slots.containers())?)
        }
        Variant::Contributions => {
            let mut slots = ContributionSlots::new(&config.contribution_slots);
            let report = populate_contributions(&plugins, &mut slots);
            (report, inject(template, &slots.containers())?)
        }
    };

    info!(
        variant = ?config.variant,
        plugins = plugins.len(),
        placed = report.placed,
        dropped = report.dropped,
        "Rendered plugin cards"
    );

    Ok(RenderOutcome {
        plugins: plugins.len(),
        report,
        html,
    })
}
