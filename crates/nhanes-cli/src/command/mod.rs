use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::{self, LogTarget};

use self::{dashboard::DashboardArg, summary::SummaryArg};

mod dashboard;
mod filter_arg;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Write log events to this file (while the dashboard runs they are otherwise dropped)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Explore a dataset in the terminal dashboard
    Dashboard(#[clap(flatten)] DashboardArg),
    /// Print the dashboard figures as JSON
    Summary(#[clap(flatten)] SummaryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or_else(|| Mode::Dashboard(DashboardArg::default()));

    let log_target = match (&args.log_file, &mode) {
        (Some(path), _) => LogTarget::File(path),
        (None, Mode::Dashboard(_)) => LogTarget::Discard,
        (None, Mode::Summary(_)) => LogTarget::Stderr,
    };
    logging::init(log_target)?;

    match mode {
        Mode::Dashboard(arg) => dashboard::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
    }
    Ok(())
}
