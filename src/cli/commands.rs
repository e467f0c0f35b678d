use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use docsync::config::Config;
use docsync::error::Result;
use docsync::sync::SyncPlan;
use docsync::{QueryEngine, TypeExtractor};

#[derive(Parser)]
#[command(name = "docsync")]
#[command(about = "Regenerate types.lua and the README setup sample from init.lua")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Regenerate both files in the current project
    docsync

    # Fail if either generated file is out of date (for CI)
    docsync check

    # Machine readable status
    docsync check --format json

    # Print the type listing without writing it
    docsync types

    # Run against another checkout
    docsync --root ../render-markdown.nvim update
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project root that configured paths are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Config file (defaults to <root>/docsync.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate the type file and the README sample
    Update,

    /// Verify generated files are up to date without writing
    Check {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the generated type listing to stdout
    Types,
}

pub fn load_config(root: &Path, config: Option<&Path>) -> Result<Config> {
    match config {
        Some(path) => Config::load(path),
        None => Config::discover(root),
    }
}

pub fn update(root: &Path, config: &Config) -> Result<()> {
    let plan = SyncPlan::build(root, config)?;
    let written = plan.apply()?;

    if written.is_empty() {
        tracing::info!("Generated files already up to date");
    } else {
        tracing::info!("Wrote {} file(s)", written.len());
    }
    Ok(())
}

pub fn check(root: &Path, config: &Config, format: &str) -> Result<()> {
    let plan = SyncPlan::build(root, config)?;
    let report = plan.report();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&report).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
        _ => {
            for file in &report {
                println!("{}: {}", file.path.display(), file.status.as_str());
            }
        }
    }

    plan.check()
}

pub fn print_types(root: &Path, config: &Config) -> Result<()> {
    let engine = QueryEngine::default();
    let listing = TypeExtractor::new(&engine, &config.strip_prefix)
        .extract_file(&config.source_path(root))?;
    print!("{}", listing);
    Ok(())
}
