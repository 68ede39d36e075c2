//! schemagen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use schemagen_cli_lib::{Cli, GenerateCommand};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            err.print().context("Failed to print usage error")?;
            eprintln!("{}", style("Invalid arguments, nothing was generated.").red());
            std::process::exit(err.exit_code());
        }
        Err(err) => err.exit(),
    };

    schemagen::observability::init(cli.verbose).context("Failed to initialize logging")?;

    GenerateCommand::new(cli).execute().await
}
