use clap::Parser;
use std::path::{Path, PathBuf};

use crate::application::dto::FormatterType;
use crate::application::use_cases::DEFAULT_MAX_CONCURRENCY;
use crate::config::ConfigFile;
use crate::dep_graph::services::DEFAULT_PACKAGE_MANAGER;
use crate::shared::error::DepGraphError;
use crate::shared::Result;

/// Build a dependency graph from a flat Gradle dependency map
#[derive(Parser, Debug)]
#[command(name = "gradle-dep-graph")]
#[command(version)]
#[command(
    about = "Build a canonical, cycle-free dependency graph from a flat Gradle dependency map",
    long_about = None
)]
pub struct Args {
    /// Flat dependency map (JSON object of id -> {name, version, parentIds})
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Root package name (defaults to the input file name without extension)
    #[arg(long)]
    pub root_name: Option<String>,

    /// Root package version (defaults to 0.0.0)
    #[arg(long)]
    pub root_version: Option<String>,

    /// Output format: json or tree
    #[arg(short, long)]
    pub format: Option<FormatterType>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON object mapping record ids to replacement name@version coordinates
    #[arg(long, value_name = "FILE")]
    pub coordinates: Option<PathBuf>,

    /// JSON object mapping record ids to artifact sha1 hashes, resolved
    /// against Maven Central
    #[arg(long, value_name = "FILE")]
    pub hashes: Option<PathBuf>,

    /// Package manager name recorded in the graph (defaults to gradle)
    #[arg(long)]
    pub package_manager: Option<String>,

    /// Config file (defaults to gradle-dep-graph.config.yml next to INPUT)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of concurrent coordinate lookups
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_concurrency: Option<u16>,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Effective options after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOptions {
    pub input: PathBuf,
    pub root_name: String,
    pub root_version: Option<String>,
    pub format: FormatterType,
    pub output: Option<PathBuf>,
    pub coordinates: Option<PathBuf>,
    pub hashes: Option<PathBuf>,
    pub package_manager: String,
    pub max_concurrency: usize,
}

impl MergedOptions {
    /// CLI flag > config file > default, field by field.
    ///
    /// # Errors
    /// Returns an error if the config holds an unknown format, or no root
    /// name can be derived.
    pub fn merge(args: Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(name)) => name
                .parse::<FormatterType>()
                .map_err(|message| DepGraphError::Validation { message })?,
            (None, None) => FormatterType::default(),
        };

        let root_name = match args.root_name.or(config.root_name) {
            Some(name) => name,
            None => default_root_name(&args.input)?,
        };

        Ok(Self {
            root_name,
            root_version: args.root_version.or(config.root_version),
            format,
            output: args.output,
            coordinates: args.coordinates.or(config.coordinate_map),
            hashes: args.hashes.or(config.hash_index),
            package_manager: args
                .package_manager
                .or(config.package_manager)
                .unwrap_or_else(|| DEFAULT_PACKAGE_MANAGER.to_string()),
            max_concurrency: args
                .max_concurrency
                .map(usize::from)
                .or(config.max_concurrency)
                .unwrap_or(DEFAULT_MAX_CONCURRENCY),
            input: args.input,
        })
    }
}

fn default_root_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            DepGraphError::InvalidRootPackage {
                reason: format!(
                    "cannot derive a root name from '{}'",
                    input.display()
                ),
            }
            .into()
        })
}
