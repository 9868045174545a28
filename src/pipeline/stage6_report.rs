use std::fs;
use std::path::{Path, PathBuf};

use crate::model::thresholds::AnalysisProfile;
use crate::pipeline::{AgreementRun, AnalysisError, EvaluationRun};
use crate::report::json::{
    agreement_export, disagreements_export, evaluation_details_export, evaluation_export,
    render_json,
};
use crate::report::text::{render_agreement_text, render_evaluation_text};

pub const AGREEMENT_SUMMARY_FILE: &str = "agreement_summary.json";
pub const DISAGREEMENTS_FILE: &str = "disagreements.json";
pub const AGREEMENT_REPORT_FILE: &str = "agreement_report.txt";
pub const EVALUATION_SUMMARY_FILE: &str = "evaluation_summary.json";
pub const EVALUATION_DETAILS_FILE: &str = "evaluation_details.json";
pub const EVALUATION_REPORT_FILE: &str = "evaluation_report.txt";

pub fn write_agreement_reports(
    run: &AgreementRun,
    reviewer_paths: &[String],
    out_dir: &Path,
    profile: &AnalysisProfile,
) -> Result<Vec<PathBuf>, AnalysisError> {
    create_dir(out_dir)?;
    let decimals = profile.export_decimals;

    let summary = agreement_export(&run.output.summary, &run.diagnostics, decimals);
    let summary_path = out_dir.join(AGREEMENT_SUMMARY_FILE);
    write_text(&summary_path, &render_json(&summary)?)?;

    let disagreements = disagreements_export(&run.output.disagreements);
    let disagreements_path = out_dir.join(DISAGREEMENTS_FILE);
    write_text(&disagreements_path, &render_json(&disagreements)?)?;

    let report_path = out_dir.join(AGREEMENT_REPORT_FILE);
    let report = render_agreement_text(&run.output.summary, reviewer_paths, &run.diagnostics);
    write_text(&report_path, &report)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        disagreements = disagreements.len(),
        "agreement reports written"
    );
    Ok(vec![summary_path, disagreements_path, report_path])
}

pub fn write_evaluation_reports(
    run: &EvaluationRun,
    out_dir: &Path,
    profile: &AnalysisProfile,
) -> Result<Vec<PathBuf>, AnalysisError> {
    create_dir(out_dir)?;
    let decimals = profile.export_decimals;

    let summary = evaluation_export(&run.summary, &run.diagnostics, decimals);
    let summary_path = out_dir.join(EVALUATION_SUMMARY_FILE);
    write_text(&summary_path, &render_json(&summary)?)?;

    let details = evaluation_details_export(&run.summary, decimals);
    let details_path = out_dir.join(EVALUATION_DETAILS_FILE);
    write_text(&details_path, &render_json(&details)?)?;

    let report_path = out_dir.join(EVALUATION_REPORT_FILE);
    let report = render_evaluation_text(&run.summary, &run.diagnostics);
    write_text(&report_path, &report)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        problem_items = run.summary.problem_items.len(),
        "evaluation reports written"
    );
    Ok(vec![summary_path, details_path, report_path])
}

fn create_dir(dir: &Path) -> Result<(), AnalysisError> {
    fs::create_dir_all(dir).map_err(|source| AnalysisError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, contents: &str) -> Result<(), AnalysisError> {
    fs::write(path, contents).map_err(|source| AnalysisError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
