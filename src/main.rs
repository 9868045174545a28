mod cli;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::error::Error;

use clap::Parser;

use crate::cli::{AnalysisArgs, Cli, Commands};
use crate::model::category::CategorySet;
use crate::model::thresholds::AnalysisProfile;
use crate::pipeline::stage6_report::{write_agreement_reports, write_evaluation_reports};
use crate::pipeline::{AnalysisError, analyze_agreement, analyze_evaluation};

fn main() {
    logging::init_tracing();

    if let Err(err) = run(Cli::parse()) {
        tracing::error!(error = %err, "command failed");
        let mut cause = err.source();
        while let Some(c) = cause {
            tracing::error!(cause = %c, "caused by");
            cause = c.source();
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AnalysisError> {
    let profile = AnalysisProfile::default_v1();
    match cli.command {
        Commands::Agreement(args) => run_agreement_command(&args, &profile),
        Commands::Evaluate(args) => run_evaluate_command(&args, &profile),
    }
}

fn run_agreement_command(
    args: &AnalysisArgs,
    profile: &AnalysisProfile,
) -> Result<(), AnalysisError> {
    let categories = if args.categories.is_empty() {
        CategorySet::agreement_default()
    } else {
        CategorySet::new(&args.categories)?
    };
    log_reviewer_order(args);

    let run = analyze_agreement(&args.inputs, &categories, profile)?;
    let paths = reviewer_paths(args);
    for path in write_agreement_reports(&run, &paths, &args.out, profile)? {
        tracing::info!(path = %path.display(), "wrote report");
    }
    Ok(())
}

fn run_evaluate_command(
    args: &AnalysisArgs,
    profile: &AnalysisProfile,
) -> Result<(), AnalysisError> {
    let categories = if args.categories.is_empty() {
        CategorySet::evaluation_default()
    } else {
        CategorySet::for_evaluation(&args.categories)?
    };
    log_reviewer_order(args);

    let run = analyze_evaluation(&args.inputs, &categories, profile)?;
    for path in write_evaluation_reports(&run, &args.out, profile)? {
        tracing::info!(path = %path.display(), "wrote report");
    }
    Ok(())
}

fn reviewer_paths(args: &AnalysisArgs) -> Vec<String> {
    args.inputs.iter().map(|p| p.display().to_string()).collect()
}

fn log_reviewer_order(args: &AnalysisArgs) {
    for (idx, path) in args.inputs.iter().enumerate() {
        tracing::info!(
            reviewer = idx + 1,
            path = %path.display(),
            "reviewer assignment by input order"
        );
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
