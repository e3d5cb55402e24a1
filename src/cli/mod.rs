//! Command-line interface definitions and shared helpers.

mod registry;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use papercast_docs::config::{DocsConfig, Variant};
use papercast_docs::plugins::{FileRegistry, HttpRegistry, ParseMode, RegistrySource};

#[derive(Parser)]
#[command(name = "papercast-docs")]
#[command(about = "Render the Papercast community plugin registry", long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.papercast/docs.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch the registry and inject plugin cards into an HTML page
    Render {
        /// Host page containing the container slots
        #[arg(short, long)]
        template: PathBuf,
        /// Where to write the populated page (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Card layout and slot set
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the plugins in the registry
    List {
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print a registry file with full-line comments removed
    Strip {
        /// Registry file
        file: PathBuf,
    },
    /// Write Sphinx API reference stubs for every contribution
    Rst {
        /// Docs source root; pages go to <out>/api_reference
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show version information
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum VariantArg {
    Plugins,
    Contributions,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Plugins => Variant::Plugins,
            VariantArg::Contributions => Variant::Contributions,
        }
    }
}

/// Where to read the registry from and how to parse it.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct SourceArgs {
    /// Registry URL (overrides config)
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,
    /// Read the registry from a local file instead of fetching it
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Parse as JSON5, accepting inline comments and trailing commas
    #[arg(long)]
    pub json5: bool,
    /// Ask caches to revalidate the registry
    #[arg(long)]
    pub no_cache: bool,
}

impl SourceArgs {
    /// Fold command-line flags into the loaded config.
    pub(crate) fn apply(&self, config: &mut DocsConfig) {
        if let Some(url) = &self.url {
            config.registry_url = url.clone();
        }
        if self.json5 {
            config.parse_mode = ParseMode::Json5;
        }
        if self.no_cache {
            config.no_cache = true;
        }
    }

    pub(crate) fn build(&self, config: &DocsConfig) -> Result<Box<dyn RegistrySource>> {
        if let Some(path) = &self.file {
            return Ok(Box::new(FileRegistry::new(path)));
        }
        let registry = HttpRegistry::with_options(
            config.registry_url.clone(),
            Duration::from_secs(config.timeout_secs),
            config.no_cache,
        )
        .with_context(|| "Failed to build HTTP client")?;
        Ok(Box::new(registry))
    }
}

/// Load config and apply the command's source flags.
pub(crate) fn resolve_config(path: Option<&PathBuf>, source: &SourceArgs) -> Result<DocsConfig> {
    let mut config = DocsConfig::load(path.map(PathBuf::as_path))
        .with_context(|| "Failed to load configuration")?;
    source.apply(&mut config);
    Ok(config)
}

pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_ref();
    match cli.command {
        Some(Commands::Version) | None => {
            println!("papercast-docs {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Render {
            template,
            output,
            variant,
            source,
        }) => render::cmd_render(config_path, template, output, variant, source).await,
        Some(Commands::List { json, source }) => {
            registry::cmd_list(config_path, json, source).await
        }
        Some(Commands::Strip { file }) => registry::cmd_strip(file),
        Some(Commands::Rst { out, source }) => registry::cmd_rst(config_path, out, source).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "papercast-docs",
            "render",
            "--template",
            "index.html",
            "--variant",
            "contributions",
            "--file",
            "plugins.jsonc",
            "--json5",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Render {
                template,
                output,
                variant,
                source,
            }) => {
                assert_eq!(template, PathBuf::from("index.html"));
                assert!(output.is_none());
                assert!(matches!(variant, Some(VariantArg::Contributions)));
                assert_eq!(source.file, Some(PathBuf::from("plugins.jsonc")));
                assert!(source.json5);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_url_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "papercast-docs",
            "list",
            "--url",
            "https://example.com/plugins.jsonc",
            "--file",
            "plugins.jsonc",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_source_args_apply() {
        let mut config = DocsConfig::default();
        let args = SourceArgs {
            url: Some("https://mirror.example.com/plugins.jsonc".to_string()),
            file: None,
            json5: true,
            no_cache: true,
        };
        args.apply(&mut config);
        assert_eq!(config.registry_url, "https://mirror.example.com/plugins.jsonc");
        assert_eq!(config.parse_mode, ParseMode::Json5);
        assert!(config.no_cache);
    }

    #[test]
    fn test_source_args_build_file() {
        let args = SourceArgs {
            file: Some(PathBuf::from("/tmp/plugins.jsonc")),
            ..SourceArgs::default()
        };
        let source = args.build(&DocsConfig::default()).unwrap();
        assert_eq!(source.location(), "/tmp/plugins.jsonc");
    }

    #[test]
    fn test_source_args_build_http() {
        let source = SourceArgs::default().build(&DocsConfig::default()).unwrap();
        assert_eq!(
            source.location(),
            papercast_docs::plugins::DEFAULT_REGISTRY_URL
        );
    }
}
