//! CLI for the pixivlist manifest parser.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use pixivlist_core::config;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_parse};

/// Top-level CLI for pixivlist.
#[derive(Debug, Parser)]
#[command(name = "pixivlist")]
#[command(about = "pixivlist: read member and artwork download lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Parse a list file and print its download targets.
    Parse {
        /// List file (defaults to `list_file` from config.toml).
        file: Option<PathBuf>,
        /// Directory substituted for %root% in list paths.
        #[arg(long, value_name = "DIR")]
        root_dir: Option<String>,
        /// Print one JSON object per entry instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Report lines that would be skipped; exits non-zero if any are found.
    Check {
        /// List file (defaults to `list_file` from config.toml).
        file: Option<PathBuf>,
        /// Directory substituted for %root% in list paths.
        #[arg(long, value_name = "DIR")]
        root_dir: Option<String>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Parse {
                file,
                root_dir,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let file = cfg.resolve_list_file(file.as_deref());
                run_parse(&file, cfg.resolve_root_dir(root_dir.as_deref()), json)?;
            }
            CliCommand::Check { file, root_dir } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let file = cfg.resolve_list_file(file.as_deref());
                run_check(&file, cfg.resolve_root_dir(root_dir.as_deref()))?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
