use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::category::Category;

#[derive(Parser, Debug)]
#[command(
    name = "kira-agreementqc",
    version,
    about = "Inter-reviewer agreement and consensus-based model correctness evaluation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chance-corrected agreement between reviewers.
    Agreement(AnalysisArgs),
    /// Model correctness against the reviewers' majority verdict.
    Evaluate(AnalysisArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Reviewer export, once per reviewer. The first file is reviewer 1.
    #[arg(long = "input", required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    /// Restrict the analysis to these categories (defaults depend on the command).
    #[arg(long = "category", value_enum)]
    pub categories: Vec<Category>,
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
