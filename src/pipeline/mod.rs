pub mod stage1_extract;
pub mod stage2_matrix;
pub mod stage3_agreement;
pub mod stage4_consensus;
pub mod stage5_evaluate;
pub mod stage6_report;

use std::path::Path;

use crate::input::{InputError, load_reviewer_sources};
use crate::model::category::{CategorySet, CategorySetError};
use crate::model::flags::Diagnostics;
use crate::model::thresholds::AnalysisProfile;
use crate::pipeline::stage1_extract::{extract_evaluations, extract_ratings};
use crate::pipeline::stage3_agreement::{Stage3Output, run_agreement};
use crate::pipeline::stage5_evaluate::{EvaluationSummary, run_evaluation};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("need at least {required} reviewers to compare, found {found}")]
    InsufficientReviewers { required: usize, found: usize },
    #[error("invalid category selection: {0}")]
    InvalidCategorySet(#[from] CategorySetError),
    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn require_reviewers(found: usize, required: usize) -> Result<(), AnalysisError> {
    if found < required {
        return Err(AnalysisError::InsufficientReviewers { required, found });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AgreementRun {
    pub output: Stage3Output,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct EvaluationRun {
    pub summary: EvaluationSummary,
    pub diagnostics: Diagnostics,
}

/// Reads one export per reviewer, in the given order, and computes agreement.
pub fn analyze_agreement<P: AsRef<Path>>(
    paths: &[P],
    categories: &CategorySet,
    profile: &AnalysisProfile,
) -> Result<AgreementRun, AnalysisError> {
    require_reviewers(paths.len(), profile.min_reviewers.max(2))?;
    let sources = load_reviewer_sources(paths)?;
    let mut diagnostics = Diagnostics::new();
    let table = extract_ratings(&sources, categories, &mut diagnostics);
    let output = run_agreement(&table, categories, profile, &mut diagnostics)?;
    Ok(AgreementRun {
        output,
        diagnostics,
    })
}

/// Reads one export per reviewer, in the given order, and scores the model against
/// reviewer consensus.
pub fn analyze_evaluation<P: AsRef<Path>>(
    paths: &[P],
    categories: &CategorySet,
    profile: &AnalysisProfile,
) -> Result<EvaluationRun, AnalysisError> {
    require_reviewers(paths.len(), profile.min_reviewers.max(2))?;
    for category in categories.iter() {
        if category.prediction_field().is_none() {
            return Err(CategorySetError::NoPredictionField(category).into());
        }
    }
    let sources = load_reviewer_sources(paths)?;
    let mut diagnostics = Diagnostics::new();
    let table = extract_evaluations(&sources, categories, &mut diagnostics);
    let summary = run_evaluation(&table, categories, profile, &mut diagnostics)?;
    Ok(EvaluationRun {
        summary,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/end_to_end.rs"]
mod tests;
