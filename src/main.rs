mod cli;
mod commands;
mod config;
mod engine;
mod resource;
#[cfg(test)]
mod testing;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    /// Manifest path given with `--config` or `SUBNETCTL_CONFIG`
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Status(args) => commands::status::run(&ctx, args.target.as_deref()),
        Command::Apply(args) => {
            commands::apply::run(&ctx, args.target.as_deref(), args.dry_run, args.yes)
        }
        Command::List(args) => commands::list::run(&ctx, args.json),
        Command::Networks => commands::networks::run(&ctx),
        Command::Destroy(args) => commands::destroy::run(&ctx, &args.name, args.yes),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "subnetctl", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = &result {
        ui::error_advice(err);
    }
    result
}
