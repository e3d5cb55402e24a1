//! reStructuredText API reference stubs.
//!
//! For Sphinx builds, every contribution gets a page with an `autoclass`
//! directive under `api_reference/<kind>/`, and every kind gets an index page
//! globbing its directory.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::plugins::PluginDescriptor;

/// Kinds that get an index page.
pub const CONTRIBUTION_KINDS: &[&str] = &["subscribers", "processors", "publishers", "types"];

/// Directory (relative to the docs root) holding the generated pages.
pub const API_REFERENCE_DIR: &str = "api_reference";

/// A generated stub for one contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPage {
    /// Second segment of the key, e.g. `processors`.
    pub kind: String,
    /// File name, e.g. `grobidprocessor.rst`.
    pub file_name: String,
    pub content: String,
}

/// Index page for one contribution kind.
pub fn parent_rst(kind: &str) -> String {
    let title = title_case(kind);
    format!(
        "{title}\n{underline}\n\n.. toctree::\n    :maxdepth: 2\n    :glob:\n\n    {kind}/*\n",
        underline = "=".repeat(title.chars().count()),
    )
}

/// Stub page for one contribution key such as `papercast.processors.Foo`.
///
/// Returns `None` for keys with fewer than two segments.
pub fn child_rst(key: &str) -> Option<ChildPage> {
    let mut segments = key.split('.');
    let _package = segments.next()?;
    let kind = segments.next()?.to_string();
    let name = key.rsplit('.').next()?;
    if kind.is_empty() || name.is_empty() {
        return None;
    }

    let content = format!(
        "{name}\n{underline}\n\n.. autoclass:: {key}\n    :members:\n    :undoc-members:\n",
        underline = "=".repeat(name.chars().count()),
    );

    Some(ChildPage {
        kind,
        file_name: format!("{}.rst", name.to_lowercase()),
        content,
    })
}

/// Write index and stub pages under `<docs_root>/api_reference`.
///
/// Returns the paths written, index pages first.
pub fn write_api_reference(docs_root: &Path, plugins: &[PluginDescriptor]) -> Result<Vec<PathBuf>> {
    let base = docs_root.join(API_REFERENCE_DIR);
    std::fs::create_dir_all(&base)?;

    let mut written = Vec::new();
    for kind in CONTRIBUTION_KINDS {
        let path = base.join(format!("{}.rst", kind));
        std::fs::write(&path, parent_rst(kind))?;
        written.push(path);
    }

    for plugin in plugins {
        for (key, _) in plugin.contributions() {
            let Some(page) = child_rst(key) else {
                warn!(plugin = %plugin.name, contribution = key, "Contribution key has no kind segment, skipping");
                continue;
            };
            let dir = base.join(&page.kind);
            std::fs::create_dir_all(&dir)?;
            let path = dir.join(&page.file_name);
            std::fs::write(&path, &page.content)?;
            written.push(path);
        }
    }

    info!(dir = %base.display(), pages = written.len(), "Wrote API reference stubs");
    Ok(written)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{parse_registry, ParseMode};

    #[test]
    fn test_parent_rst() {
        assert_eq!(
            parent_rst("processors"),
            "Processors\n==========\n\n.. toctree::\n    :maxdepth: 2\n    :glob:\n\n    processors/*\n"
        );
    }

    #[test]
    fn test_parent_rst_underline_matches_title() {
        let page = parent_rst("subscribers");
        let mut lines = page.lines();
        let title = lines.next().unwrap();
        let underline = lines.next().unwrap();
        assert_eq!(title, "Subscribers");
        assert_eq!(underline.len(), title.len());
    }

    #[test]
    fn test_child_rst() {
        let page = child_rst("papercast.processors.GROBIDProcessor").unwrap();
        assert_eq!(page.kind, "processors");
        assert_eq!(page.file_name, "grobidprocessor.rst");
        assert_eq!(
            page.content,
            "GROBIDProcessor\n===============\n\n.. autoclass:: papercast.processors.GROBIDProcessor\n    :members:\n    :undoc-members:\n"
        );
    }

    #[test]
    fn test_child_rst_requires_kind_segment() {
        assert!(child_rst("Standalone").is_none());
        assert!(child_rst("papercast..Foo").is_none());
    }

    #[test]
    fn test_write_api_reference() {
        let dir = tempfile::tempdir().unwrap();
        let plugins = parse_registry(
            r#"[{
                "name": "core",
                "type": "processor",
                "contributes": {
                    "papercast.processors.GROBIDProcessor": {},
                    "papercast.types.PDFFile": {},
                    "Standalone": {}
                }
            }]"#,
            ParseMode::Strict,
        )
        .unwrap();

        let written = write_api_reference(dir.path(), &plugins).unwrap();
        assert_eq!(written.len(), CONTRIBUTION_KINDS.len() + 2);

        let base = dir.path().join(API_REFERENCE_DIR);
        assert!(base.join("types.rst").is_file());
        let stub = std::fs::read_to_string(base.join("processors").join("grobidprocessor.rst")).unwrap();
        assert!(stub.contains(".. autoclass:: papercast.processors.GROBIDProcessor"));
        assert!(base.join("types").join("pdffile.rst").is_file());
    }
}
