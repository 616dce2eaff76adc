// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod committee;
mod hub;
mod init;
mod query;
mod token;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use qameti::config::{self, Local};

use committee::{ContributeCmd, CreateCmd, DistributeCmd};
use hub::{CliError, Hub};
use init::InitCmd;
use query::{EventsCmd, InfoCmd, ListCmd};
use token::{ApproveCmd, BalanceCmd, FaucetCmd};

/// CLI for running rotating savings committees
#[derive(Parser)]
#[clap(name = "qameti", version = "0.1")]
#[clap(author = "Quentin M. Kniep <hello@quentinkniep.com>")]
#[clap(arg_required_else_help = true)]
struct RootCmd {
    /// Data directory holding config.json and the database [default: ~/.qameti]
    #[clap(short = 'd', long, global = true)]
    datadir: Option<String>,
    /// Unix time to use instead of the system clock
    #[clap(long, global = true)]
    now: Option<u64>,
    #[clap(subcommand)]
    subcmd: SubCmd,
}

#[derive(Subcommand)]
enum SubCmd {
    /// Set up a new registry and token
    Init(InitCmd),
    /// Mint test tokens
    Faucet(FaucetCmd),
    /// Allow a committee to collect contributions
    Approve(ApproveCmd),
    Balance(BalanceCmd),
    /// Create a committee
    Create(CreateCmd),
    /// Pay the contribution for the current round
    Contribute(ContributeCmd),
    /// Pay out the current round
    Distribute(DistributeCmd),
    /// Show a committee's progress
    Info(InfoCmd),
    /// List committees
    List(ListCmd),
    /// Print the event log
    Events(EventsCmd),
}

fn main() {
    let cmd: RootCmd = RootCmd::parse();

    let datadir = match data_dir(&cmd.datadir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("[Error] {}", e);
            std::process::exit(1);
        }
    };
    let local = match Local::load_or_default(&datadir) {
        Ok(local) => local,
        Err(e) => {
            eprintln!("[Error] Could not load config: {}", e);
            std::process::exit(1);
        }
    };
    let _guard = match init_logging(&local) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("[Error] Could not set up logging: {}", e);
            std::process::exit(1);
        }
    };

    let hub = Hub::new(datadir, local, cmd.now);
    let res = match &cmd.subcmd {
        SubCmd::Init(c) => c.entrypoint(&hub),
        SubCmd::Faucet(c) => c.entrypoint(&hub),
        SubCmd::Approve(c) => c.entrypoint(&hub),
        SubCmd::Balance(c) => c.entrypoint(&hub),
        SubCmd::Create(c) => c.entrypoint(&hub),
        SubCmd::Contribute(c) => c.entrypoint(&hub),
        SubCmd::Distribute(c) => c.entrypoint(&hub),
        SubCmd::Info(c) => c.entrypoint(&hub),
        SubCmd::List(c) => c.entrypoint(&hub),
        SubCmd::Events(c) => c.entrypoint(&hub),
    };

    if let Err(e) = res {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn data_dir(custom: &Option<String>) -> Result<PathBuf, CliError> {
    match custom {
        Some(dir) => Ok(config::expand_path(dir)?),
        None => Ok(config::get_default_data_dir()?),
    }
}

/// Logs to stderr and, if configured, to a daily rolling file.
fn init_logging(local: &Local) -> config::Result<Option<WorkerGuard>> {
    let level = LevelFilter::from_level(local.log_level()?);
    let (file_layer, guard) = match local.log_dir()? {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "qameti.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(level)
        .init();
    Ok(guard)
}
