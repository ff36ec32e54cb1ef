//! CLI command dispatch and execution

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use ffceb_core::{GlobalFlags, Verbosity};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

mod config_cmd;

/// ffceb - Backup exceptions to deleting Firefox cookies on close
#[derive(Parser, Debug)]
#[command(
    name = "ffceb",
    version,
    about = "Backup exceptions to deleting Firefox cookies on close",
    long_about = "Firefox can automatically delete cookies when you close the browser.\n\
                  This tool backs up the exceptions to deleting cookies on close."
)]
pub struct Cli {
    /// Config file (default is $HOME/.ffceb.toml)
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<OsString>,

    /// Firefox profile directory
    #[arg(short, long, global = true, value_name = "PATH", value_hint = ValueHint::DirPath)]
    profile: Option<String>,

    /// Print verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not print output, this overrides verbose
    #[arg(long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show effective configuration
    Config(config_cmd::ConfigArgs),
}

impl Cli {
    /// Log verbosity requested on the command line
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.silent)
    }

    fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            config: self.config.clone().map(PathBuf::from),
            profile: self.profile.clone(),
            verbose: self.verbose,
            silent: self.silent,
        }
    }

    /// Resolve configuration, then execute the CLI command.
    ///
    /// Without a subcommand this only prints help.
    pub fn execute(self) -> Result<()> {
        let Some(command) = self.command.as_ref() else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let config = ffceb_core::resolve(&self.global_flags())?;
        debug!(
            profile = ?config.profile,
            verbosity = %config.verbosity,
            "configuration resolved"
        );

        match command {
            Commands::Config(args) => config_cmd::execute(args, &config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["ffceb", "config", "-p", "/tmp/p", "--silent", "-v"]).unwrap();
        let flags = cli.global_flags();

        assert_eq!(flags.profile.as_deref(), Some("/tmp/p"));
        assert!(flags.verbose);
        assert!(flags.silent);
        assert_eq!(cli.verbosity(), Verbosity::Silent);
    }

    #[test]
    fn test_unset_flags() {
        let cli = Cli::try_parse_from(["ffceb", "config"]).unwrap();
        let flags = cli.global_flags();

        assert!(flags.config.is_none());
        assert!(flags.profile.is_none());
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["ffceb", "--config", "/etc/ffceb.toml", "config"]).unwrap();
        assert_eq!(cli.global_flags().config, Some(PathBuf::from("/etc/ffceb.toml")));
    }

    #[test]
    fn test_empty_config_flag_is_accepted() {
        let cli = Cli::try_parse_from(["ffceb", "--config", "", "config"]).unwrap();
        let flags = cli.global_flags();

        assert_eq!(flags.config, Some(PathBuf::new()));
        assert!(flags.config_path().is_none());
    }

    #[test]
    fn test_subcommand_is_optional() {
        let cli = Cli::try_parse_from(["ffceb", "--verbose"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
