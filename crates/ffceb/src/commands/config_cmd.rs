//! Config command implementation

use anyhow::Result;
use clap::Args;
use ffceb_core::{ResolvedConfig, Verbosity};
use serde::Serialize;
use std::path::PathBuf;

/// Show effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigReport {
    profile: SourcedValue,
    config_file: Option<PathBuf>,
    verbosity: Verbosity,
    search_paths: Vec<SearchPath>,
}

#[derive(Debug, Serialize)]
struct SourcedValue {
    value: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchPath {
    path: PathBuf,
    exists: bool,
}

/// Execute the config command
pub fn execute(args: &ConfigArgs, config: &ResolvedConfig) -> Result<()> {
    let report = build_report(config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let profile = report.profile.value.as_deref().unwrap_or("(not set)");
    match report.profile.source.as_deref() {
        Some(source) => println!("profile: {profile} (from {source})"),
        None => println!("profile: {profile}"),
    }
    match &report.config_file {
        Some(path) => println!("config file: {}", path.display()),
        None => println!("config file: (none)"),
    }
    println!("verbosity: {}", report.verbosity);

    if !report.search_paths.is_empty() {
        println!();
        println!("Config file search order:");
        for entry in &report.search_paths {
            let status = if entry.exists { "(found)" } else { "(not found)" };
            println!("  {} {status}", entry.path.display());
        }
    }

    Ok(())
}

fn build_report(config: &ResolvedConfig) -> ConfigReport {
    ConfigReport {
        profile: SourcedValue {
            value: config.profile.as_ref().map(|p| p.display().to_string()),
            source: config.registry.source_of("profile").map(str::to_string),
        },
        config_file: config.config_file.clone(),
        verbosity: config.verbosity,
        search_paths: config
            .search_paths
            .iter()
            .map(|path| SearchPath {
                path: path.clone(),
                exists: path.exists(),
            })
            .collect(),
    }
}
