//! Community plugin registry for papercast-docs
//!
//! This module fetches and parses the Papercast community registry, a
//! JSON-with-comments document listing third-party plugins and the
//! capabilities ("contributions") each one provides.
//!
//! # Architecture
//!
//! - **types**: Registry records (`PluginDescriptor`, `Contribution`, `PluginType`)
//! - **jsonc**: Full-line comment stripping and strict/JSON5 parsing
//! - **source**: Where the registry text comes from (`HttpRegistry`, `FileRegistry`)
//!
//! # Example registry
//!
//! ```text
//! // Papercast community plugins
//! [
//!   {
//!     "name": "papercast-grobid",
//!     "type": "processor",
//!     "repo": "papercast-dev/papercast-grobid",
//!     "contributes": {
//!       "papercast.processors.GROBIDProcessor": {
//!         "short_description": "Extract text from PDFs",
//!         "input_types": { "pdf": "papercast.types.PDFFile" },
//!         "output_types": { "text": "str" }
//!       }
//!     }
//!   }
//! ]
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use papercast_docs::plugins::{load_registry, HttpRegistry, ParseMode, DEFAULT_REGISTRY_URL};
//!
//! # async fn run() -> papercast_docs::error::Result<()> {
//! let source = HttpRegistry::new(DEFAULT_REGISTRY_URL)?;
//! let plugins = load_registry(&source, ParseMode::Strict).await?;
//! println!("Loaded {} plugins", plugins.len());
//! # Ok(())
//! # }
//! ```

mod jsonc;
mod source;
pub mod types;

pub use jsonc::{parse_registry, strip_line_comments, ParseMode, LINE_COMMENT};
pub use source::{
    FileRegistry, HttpRegistry, RegistrySource, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT_SECS,
};
pub use types::{Contribution, OrderedMap, PluginDescriptor, PluginType};

use tracing::info;

use crate::error::Result;

/// Read the registry from `source` and parse it.
pub async fn load_registry(
    source: &dyn RegistrySource,
    mode: ParseMode,
) -> Result<Vec<PluginDescriptor>> {
    let text = source.read_text().await?;
    let plugins = parse_registry(&text, mode)?;
    info!(
        source = %source.location(),
        plugins = plugins.len(),
        "Loaded plugin registry"
    );
    Ok(plugins)
}
