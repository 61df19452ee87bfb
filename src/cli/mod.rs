mod logging;
mod session;

use std::io::{stdin, stdout};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::domain::Ledger;

pub use logging::init_tracing;
pub use session::*;

/// Budget Tracker - record income and expenses, see totals, export to CSV
#[derive(Parser, Debug)]
#[command(name = "budget-tracker")]
#[command(about = "An interactive personal budget tracker")]
#[command(version)]
pub struct Cli {
    /// Default file offered when saving transactions to CSV
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    pub output: String,

    /// How transactions and summaries are displayed
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated rows and plain text totals
    Table,
    /// Pretty-printed JSON
    Json,
}

pub const DEFAULT_EXPORT_FILE: &str = "transactions.csv";

impl Cli {
    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            default_export_file: self.output.clone(),
            format: self.format,
        }
    }

    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);
        tracing::debug!(output = %self.output, format = ?self.format, "starting session");

        let settings = self.settings();
        let mut ledger = Ledger::new();
        let input = stdin().lock();
        let output = stdout().lock();

        Session::new(&mut ledger, input, output, settings).run()
    }
}
