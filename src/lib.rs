//! papercast-docs - render the Papercast community plugin registry into
//! documentation pages

pub mod config;
pub mod dispatch;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod plugins;
pub mod render;
pub mod rst;

pub use config::{DocsConfig, Variant};
pub use error::{DocsError, Result};
pub use pipeline::{init, RenderOutcome};
