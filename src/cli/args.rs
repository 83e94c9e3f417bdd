use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run the bookkeeping demo scenarios
#[derive(Parser, Debug)]
#[command(name = "bookkeeping-engine")]
#[command(about = "Run the library lending and bank ledger demo scenarios", long_about = None)]
pub struct CliArgs {
    /// Which demo scenario to run
    #[arg(
        long = "demo",
        value_name = "DEMO",
        default_value = "all",
        help = "Demo to run: 'library', 'bank', or 'all'"
    )]
    pub demo: DemoKind,

    /// Optional CSV export of the bank demo's statement
    #[arg(
        long = "export-statement",
        value_name = "PATH",
        help = "Write the first bank account's statement to this CSV file"
    )]
    pub export_statement: Option<PathBuf>,
}

/// Available demo scenarios
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    Library,
    Bank,
    All,
}

impl DemoKind {
    /// Whether the library scenario is part of this selection
    pub fn includes_library(&self) -> bool {
        matches!(self, DemoKind::Library | DemoKind::All)
    }

    /// Whether the bank scenario is part of this selection
    pub fn includes_bank(&self) -> bool {
        matches!(self, DemoKind::Bank | DemoKind::All)
    }
}
